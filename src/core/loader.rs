//! Discovery of `.properties` files and grouping into resource families.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::{ResourceFamily, ResourceFile, parsers::parse_properties_file};

/// Result of loading resource files.
#[derive(Debug)]
pub struct LoadResult {
    pub families: Vec<ResourceFamily>,
    pub file_count: usize,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
}

fn compile_patterns(patterns: &[String], field: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, p))
        })
        .collect()
}

fn is_properties_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("properties")
}

/// Relative path with `/` separators, used as the file name in reports.
fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Find the resource files under `root` selected by the include/ignore globs.
pub fn scan_properties_files(
    root: &Path,
    includes: &[String],
    ignores: &[String],
) -> Result<(Vec<(String, PathBuf)>, usize)> {
    let includes = compile_patterns(includes, "includes")?;
    let ignores = compile_patterns(ignores, "ignores")?;

    let mut files = Vec::new();
    let mut skipped_count = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_properties_file(path) {
            continue;
        }

        let name = relative_name(root, path);
        if !includes.iter().any(|p| p.matches(&name)) || ignores.iter().any(|p| p.matches(&name))
        {
            continue;
        }
        files.push((name, path.to_path_buf()));
    }

    Ok((files, skipped_count))
}

/// Load every resource family under `base_dir/<propertyDir>`.
///
/// Families are keyed by directory and bundle base name, so `a/Messages.properties`
/// and `b/Messages.properties` are distinct families.
pub fn load_families(base_dir: &Path, config: &Config) -> Result<LoadResult> {
    let root = base_dir.join(&config.property_dir);
    if !root.is_dir() {
        bail!("Property directory not found: {:?}", root);
    }

    let (paths, skipped_count) = scan_properties_files(&root, &config.includes, &config.ignores)?;

    // Parallel read and parse, input order preserved
    let files: Vec<ResourceFile> = paths
        .par_iter()
        .map(|(name, path)| {
            let entries = parse_properties_file(path)?;
            tracing::debug!(file = name.as_str(), keys = entries.len(), "Loaded properties file");
            Ok(ResourceFile::new(name.clone(), entries))
        })
        .collect::<Result<_>>()?;

    let file_count = files.len();
    let mut grouped: BTreeMap<(String, String), Vec<ResourceFile>> = BTreeMap::new();
    for file in files {
        let dir = file
            .file_name()
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();
        grouped
            .entry((dir, file.bundle_name().to_string()))
            .or_default()
            .push(file);
    }

    let families = grouped
        .into_iter()
        .map(|((dir, base_name), files)| {
            ResourceFamily::new(files)
                .with_context(|| format!("Invalid resource family {}/{}", dir, base_name))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        families = families.len(),
        files = file_count,
        "Loaded resource families"
    );

    Ok(LoadResult {
        families,
        file_count,
        skipped_count,
    })
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::core::loader::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn config(property_dir: &str) -> Config {
        Config {
            property_dir: property_dir.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_single_family() {
        let dir = tempdir().unwrap();
        let res = dir.path().join("res");
        fs::create_dir_all(&res).unwrap();
        fs::write(res.join("Bundle.properties"), "a=1\nb=2\n").unwrap();
        fs::write(res.join("Bundle_fr.properties"), "a=un\n").unwrap();
        fs::write(res.join("notes.txt"), "ignored").unwrap();

        let result = load_families(dir.path(), &config("res")).unwrap();
        assert_eq!(result.file_count, 2);
        assert_eq!(result.families.len(), 1);

        let family = &result.families[0];
        assert_eq!(family.base_name(), "Bundle");
        assert_eq!(family.root_file().unwrap().file_name(), "Bundle.properties");
        assert_eq!(family.keys().into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_families_by_directory_and_base_name() {
        let dir = tempdir().unwrap();
        let res = dir.path().join("res");
        fs::create_dir_all(res.join("admin")).unwrap();
        fs::write(res.join("Messages.properties"), "a=1").unwrap();
        fs::write(res.join("Labels_de.properties"), "a=1").unwrap();
        fs::write(res.join("admin/Messages_en.properties"), "a=1").unwrap();

        let result = load_families(dir.path(), &config("res")).unwrap();
        let names: Vec<_> = result
            .families
            .iter()
            .map(|f| f.files()[0].file_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Labels_de.properties", "Messages.properties", "admin/Messages_en.properties"]
        );
    }

    #[test]
    fn test_word_suffix_bundle_is_own_family() {
        let dir = tempdir().unwrap();
        let res = dir.path().join("res");
        fs::create_dir_all(&res).unwrap();
        fs::write(res.join("site.properties"), "a=1\n").unwrap();
        fs::write(res.join("site_fr.properties"), "a=un\n").unwrap();
        fs::write(res.join("site_nav.properties"), "menu=Menu\n").unwrap();

        let result = load_families(dir.path(), &config("res")).unwrap();
        let families: Vec<(&str, usize)> = result
            .families
            .iter()
            .map(|f| (f.base_name(), f.len()))
            .collect();
        assert_eq!(families, vec![("site", 2), ("site_nav", 1)]);
    }

    #[test]
    fn test_ignores() {
        let dir = tempdir().unwrap();
        let res = dir.path().join("res");
        fs::create_dir_all(res.join("legacy")).unwrap();
        fs::write(res.join("Bundle.properties"), "a=1").unwrap();
        fs::write(res.join("legacy/Old.properties"), "a=1").unwrap();

        let cfg = Config {
            ignores: vec!["legacy/**".to_string()],
            ..config("res")
        };
        let result = load_families(dir.path(), &cfg).unwrap();
        assert_eq!(result.file_count, 1);
    }

    #[test]
    fn test_missing_property_dir() {
        let dir = tempdir().unwrap();
        let err = load_families(dir.path(), &config("nope")).unwrap_err();
        assert!(err.to_string().contains("Property directory not found"));
    }

    #[test]
    fn test_malformed_file_aborts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Bundle.properties"), "bad=\\uZZZZ").unwrap();
        assert!(load_families(dir.path(), &config(".")).is_err());
    }

    #[test]
    fn test_relative_name() {
        let root = Path::new("/a/b");
        assert_eq!(relative_name(root, Path::new("/a/b/c/D.properties")), "c/D.properties");
    }
}
