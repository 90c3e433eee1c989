use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};

use roxmltree::{Attribute, Document, Node};
use serde::{Deserialize, Serialize};

use super::{ReportingHandler, SchemaEngine, SchemaError, profiles};
use crate::core::markup::TEMPLATE_ELEMENTS;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Content model of one element.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefinition {
    /// Allowed children: element names, `%group` references, `#text` for
    /// character data and `!name` to remove an element pulled in by a group.
    /// An empty list declares an empty element.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Serializable description of a schema profile.
///
/// Custom profiles are JSON files of this shape. With `extends`, the named
/// predefined profile is the base: group members are appended to the base
/// groups, elements replace base elements of the same name, and global
/// attributes are added.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub elements: BTreeMap<String, ElementDefinition>,
    #[serde(default)]
    pub global_attributes: Vec<String>,
    #[serde(default)]
    pub global_attribute_prefixes: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ProfileDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add members to a group, creating it if needed.
    pub fn group(&mut self, name: &str, members: &[&str]) {
        self.groups
            .entry(name.to_string())
            .or_default()
            .extend(owned(members));
    }

    /// Define (or redefine) elements sharing one content model.
    pub fn define(&mut self, names: &[&str], content: &[&str], attributes: &[&str]) {
        for name in names {
            self.elements.insert(
                name.to_string(),
                ElementDefinition {
                    content: owned(content),
                    attributes: owned(attributes),
                    required: Vec::new(),
                },
            );
        }
    }

    pub fn require(&mut self, name: &str, attributes: &[&str]) {
        if let Some(element) = self.elements.get_mut(name) {
            element.required.extend(owned(attributes));
        }
    }

    pub fn allow(&mut self, names: &[&str], attributes: &[&str]) {
        for name in names {
            if let Some(element) = self.elements.get_mut(*name) {
                element.attributes.extend(owned(attributes));
            }
        }
    }

    pub fn forbid(&mut self, names: &[&str], attributes: &[&str]) {
        for name in names {
            if let Some(element) = self.elements.get_mut(*name) {
                element.attributes.retain(|a| !attributes.contains(&a.as_str()));
                element.required.retain(|a| !attributes.contains(&a.as_str()));
            }
        }
    }

    pub fn set_content(&mut self, names: &[&str], content: &[&str]) {
        for name in names {
            if let Some(element) = self.elements.get_mut(*name) {
                element.content = owned(content);
            }
        }
    }

    /// Remove elements along with every reference to them.
    pub fn remove_elements(&mut self, names: &[&str]) {
        let is_removed = |item: &String| {
            let name = item.strip_prefix('!').unwrap_or(item);
            names.contains(&name)
        };
        for name in names {
            self.elements.remove(*name);
        }
        for members in self.groups.values_mut() {
            members.retain(|m| !is_removed(m));
        }
        for element in self.elements.values_mut() {
            element.content.retain(|c| !is_removed(c));
        }
    }

    /// Apply this definition on top of `base`.
    pub fn merged_onto(self, mut base: ProfileDefinition) -> ProfileDefinition {
        base.name = self.name;
        base.extends = None;
        for (group, members) in self.groups {
            base.groups.entry(group).or_default().extend(members);
        }
        base.elements.extend(self.elements);
        base.global_attributes.extend(self.global_attributes);
        base.global_attribute_prefixes
            .extend(self.global_attribute_prefixes);
        base
    }
}

#[derive(Debug, Default)]
struct Expansion {
    children: HashSet<String>,
    excluded: Vec<String>,
    text: bool,
}

fn expand_item(
    item: &str,
    groups: &BTreeMap<String, Vec<String>>,
    context: &str,
    expansion: &mut Expansion,
    stack: &mut Vec<String>,
) -> Result<(), SchemaError> {
    if item == "#text" {
        expansion.text = true;
    } else if let Some(group) = item.strip_prefix('%') {
        if stack.iter().any(|g| g == group) {
            return Err(SchemaError::RecursiveGroup(group.to_string()));
        }
        let members = groups.get(group).ok_or_else(|| SchemaError::UnknownGroup {
            group: group.to_string(),
            context: context.to_string(),
        })?;
        stack.push(group.to_string());
        for member in members {
            expand_item(member, groups, context, expansion, stack)?;
        }
        stack.pop();
    } else if let Some(name) = item.strip_prefix('!') {
        expansion.excluded.push(name.to_string());
    } else {
        expansion.children.insert(item.to_string());
    }
    Ok(())
}

#[derive(Debug)]
struct ElementModel {
    children: HashSet<String>,
    text: bool,
    empty: bool,
    attributes: HashSet<String>,
    required: Vec<String>,
}

/// Content-model schema compiled from a [`ProfileDefinition`].
#[derive(Debug)]
pub struct ProfileSchema {
    name: String,
    elements: HashMap<String, ElementModel>,
    global_attributes: HashSet<String>,
    global_attribute_prefixes: Vec<String>,
}

impl ProfileSchema {
    /// One of the built-in profiles, by name.
    pub fn predefined(name: &str) -> Result<Self, SchemaError> {
        let definition = profiles::predefined_definition(name)
            .ok_or_else(|| SchemaError::UnknownProfile(name.to_string()))?;
        Self::compile(definition)
    }

    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let definition: ProfileDefinition =
            serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::compile(definition)
    }

    pub fn compile(definition: ProfileDefinition) -> Result<Self, SchemaError> {
        let definition = match definition.extends.clone() {
            Some(base) => {
                let base_definition = profiles::predefined_definition(&base)
                    .ok_or(SchemaError::UnknownProfile(base))?;
                definition.merged_onto(base_definition)
            }
            None => definition,
        };

        for name in TEMPLATE_ELEMENTS {
            if !definition.elements.contains_key(*name) {
                return Err(SchemaError::MissingTemplateElement(name.to_string()));
            }
        }

        let mut elements = HashMap::with_capacity(definition.elements.len());
        for (name, element) in &definition.elements {
            let mut expansion = Expansion::default();
            for item in &element.content {
                expand_item(item, &definition.groups, name, &mut expansion, &mut Vec::new())?;
            }
            for excluded in &expansion.excluded {
                expansion.children.remove(excluded);
            }
            // report the first undefined child by name
            let mut children: Vec<&String> = expansion.children.iter().collect();
            children.sort();
            if let Some(child) = children
                .into_iter()
                .find(|c| !definition.elements.contains_key(*c))
            {
                return Err(SchemaError::UndefinedElement {
                    parent: name.clone(),
                    child: child.clone(),
                });
            }

            elements.insert(
                name.clone(),
                ElementModel {
                    children: expansion.children,
                    text: expansion.text,
                    empty: element.content.is_empty(),
                    attributes: element.attributes.iter().cloned().collect(),
                    required: element.required.clone(),
                },
            );
        }

        Ok(Self {
            name: definition.name,
            elements,
            global_attributes: definition.global_attributes.into_iter().collect(),
            global_attribute_prefixes: definition.global_attribute_prefixes,
        })
    }

    fn allows_attribute(&self, model: &ElementModel, name: &str) -> bool {
        model.attributes.contains(name)
            || self.global_attributes.contains(name)
            || self
                .global_attribute_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }

    fn check_element(&self, node: Node<'_, '_>, handler: &mut ReportingHandler) {
        let name = node.tag_name().name();
        let Some(model) = self.elements.get(name) else {
            handler.error(format!(
                "Element \"{}\" is not defined in schema {}",
                name, self.name
            ));
            return;
        };

        for attribute in node.attributes() {
            let attribute_name = qualified_name(&attribute);
            if !self.allows_attribute(model, &attribute_name) {
                handler.error(format!(
                    "Attribute \"{}\" is not allowed on element \"{}\"",
                    attribute_name, name
                ));
            }
        }
        for required in &model.required {
            if node.attribute(required.as_str()).is_none() {
                handler.error(format!(
                    "Element \"{}\" is missing required attribute \"{}\"",
                    name, required
                ));
            }
        }

        for child in node.children() {
            if child.is_element() {
                let child_name = child.tag_name().name();
                if model.empty {
                    handler.error(format!("Element \"{}\" must be empty", name));
                } else if self.elements.contains_key(child_name)
                    && !model.children.contains(child_name)
                {
                    handler.error(format!(
                        "Element \"{}\" is not allowed inside \"{}\"",
                        child_name, name
                    ));
                }
                self.check_element(child, handler);
            } else if child.is_text()
                && child.text().is_some_and(|t| !t.trim().is_empty())
            {
                if model.empty {
                    handler.error(format!("Element \"{}\" must be empty", name));
                } else if !model.text {
                    handler.error(format!("Text is not allowed inside \"{}\"", name));
                }
            }
        }
    }
}

fn qualified_name(attribute: &Attribute<'_, '_>) -> String {
    match attribute.namespace() {
        Some(XML_NAMESPACE) => format!("xml:{}", attribute.name()),
        Some(namespace) => format!("{{{}}}{}", namespace, attribute.name()),
        None => attribute.name().to_string(),
    }
}

impl SchemaEngine for ProfileSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, document: &Document<'_>, handler: &mut ReportingHandler) {
        self.check_element(document.root_element(), handler);
    }
}
