//! Built-in content models: XHTML 1.0 transitional and strict, and XHTML5.

use super::ProfileDefinition;

pub const XHTML1_TRANSITIONAL: &str = "xhtml1-transitional";
pub const XHTML1_STRICT: &str = "xhtml1-strict";
pub const XHTML5: &str = "xhtml5";

pub const PREDEFINED_PROFILES: &[&str] = &[XHTML1_TRANSITIONAL, XHTML1_STRICT, XHTML5];

const CORE_ATTRIBUTES: &[&str] = &["id", "class", "style", "title"];
const I18N_ATTRIBUTES: &[&str] = &["lang", "xml:lang", "dir"];
const EVENT_ATTRIBUTES: &[&str] = &[
    "onclick",
    "ondblclick",
    "onmousedown",
    "onmouseup",
    "onmouseover",
    "onmousemove",
    "onmouseout",
    "onkeypress",
    "onkeydown",
    "onkeyup",
];
const FOCUS_ATTRIBUTES: &[&str] = &["accesskey", "tabindex", "onfocus", "onblur"];
const CELL_ALIGN_ATTRIBUTES: &[&str] = &["align", "char", "charoff", "valign"];
const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const PHRASE_ELEMENTS: &[&str] = &[
    "span", "bdo", "em", "strong", "dfn", "code", "q", "samp", "kbd", "var", "cite", "abbr",
    "acronym", "sub", "sup", "tt", "i", "b", "big", "small", "u", "s", "strike",
];

pub(super) fn predefined_definition(name: &str) -> Option<ProfileDefinition> {
    match name {
        XHTML1_TRANSITIONAL => Some(xhtml1_transitional()),
        XHTML1_STRICT => Some(xhtml1_strict()),
        XHTML5 => Some(xhtml5()),
        _ => None,
    }
}

fn xhtml1_transitional() -> ProfileDefinition {
    let mut p = ProfileDefinition::new(XHTML1_TRANSITIONAL);
    p.global_attributes = [CORE_ATTRIBUTES, I18N_ATTRIBUTES, EVENT_ATTRIBUTES]
        .concat()
        .into_iter()
        .map(str::to_string)
        .collect();

    p.group(
        "inline",
        &[
            "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button",
            "cite", "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins",
            "kbd", "label", "map", "noscript", "object", "q", "s", "samp", "script", "select",
            "small", "span", "strike", "strong", "sub", "sup", "textarea", "tt", "u", "var",
        ],
    );
    p.group(
        "block",
        &[
            "address", "blockquote", "center", "del", "dir", "div", "dl", "fieldset", "form",
            "h1", "h2", "h3", "h4", "h5", "h6", "hr", "ins", "menu", "noscript", "ol", "p",
            "pre", "script", "table", "ul",
        ],
    );
    p.group("phrasing", &["#text", "%inline"]);
    p.group("flow", &["#text", "%inline", "%block"]);

    // document
    p.define(&["html"], &["head", "body"], &[]);
    p.define(
        &["head"],
        &["title", "base", "meta", "link", "style", "script", "object"],
        &["profile"],
    );
    p.define(&["title"], &["#text"], &[]);
    p.define(&["base"], &[], &["href", "target"]);
    p.define(&["meta"], &[], &["http-equiv", "name", "content", "scheme"]);
    p.define(
        &["link"],
        &[],
        &["charset", "href", "hreflang", "type", "rel", "rev", "media", "target"],
    );
    p.define(&["style"], &["#text"], &["type", "media", "xml:space"]);
    p.define(
        &["script"],
        &["#text"],
        &["type", "src", "charset", "defer", "language", "xml:space"],
    );
    p.define(&["noscript"], &["%flow"], &[]);
    p.define(
        &["body"],
        &["%flow"],
        &["onload", "onunload", "background", "bgcolor", "text", "link", "vlink", "alink"],
    );

    // blocks
    p.define(&["div"], &["%flow"], &["align"]);
    p.define(&["p"], &["%phrasing"], &["align"]);
    p.define(HEADINGS, &["%phrasing"], &["align"]);
    p.define(&["address"], &["%phrasing", "p"], &[]);
    p.define(&["hr"], &[], &["align", "noshade", "size", "width"]);
    p.define(
        &["pre"],
        &[
            "%phrasing", "!img", "!object", "!applet", "!big", "!small", "!sub", "!sup", "!font",
            "!basefont",
        ],
        &["width", "xml:space"],
    );
    p.define(&["blockquote"], &["%flow"], &["cite"]);
    p.define(&["center"], &["%flow"], &[]);
    p.define(&["ins", "del"], &["%flow"], &["cite", "datetime"]);

    // lists
    p.define(&["ul"], &["li"], &["type", "compact"]);
    p.define(&["ol"], &["li"], &["type", "compact", "start"]);
    p.define(&["menu", "dir"], &["li"], &["compact"]);
    p.define(&["li"], &["%flow"], &["type", "value"]);
    p.define(&["dl"], &["dt", "dd"], &["compact"]);
    p.define(&["dt"], &["%phrasing"], &[]);
    p.define(&["dd"], &["%flow"], &[]);

    // inline
    let anchor_attributes = [
        &[
            "charset", "type", "name", "href", "hreflang", "rel", "rev", "shape", "coords",
            "target",
        ][..],
        FOCUS_ATTRIBUTES,
    ]
    .concat();
    p.define(&["a"], &["%phrasing", "!a"], &anchor_attributes);
    p.define(PHRASE_ELEMENTS, &["%phrasing"], &[]);
    p.allow(&["q"], &["cite"]);
    p.define(&["font"], &["%phrasing"], &["size", "color", "face"]);
    p.define(&["basefont"], &[], &["id", "size", "color", "face"]);
    p.define(&["br"], &[], &["clear"]);
    p.define(
        &["img"],
        &[],
        &[
            "src", "alt", "name", "longdesc", "height", "width", "usemap", "ismap", "align",
            "border", "hspace", "vspace",
        ],
    );
    p.require("img", &["src", "alt"]);

    // objects
    p.define(
        &["object"],
        &["param", "%flow"],
        &[
            "declare", "classid", "codebase", "data", "type", "codetype", "archive", "standby",
            "height", "width", "usemap", "name", "tabindex", "align", "border", "hspace",
            "vspace",
        ],
    );
    p.define(&["param"], &[], &["id", "name", "value", "valuetype", "type"]);
    p.define(
        &["applet"],
        &["param", "%flow"],
        &[
            "codebase", "archive", "code", "object", "alt", "name", "width", "height", "align",
            "hspace", "vspace",
        ],
    );
    p.define(&["map"], &["area", "%block"], &["name"]);
    let area_attributes = [
        &["shape", "coords", "href", "nohref", "alt", "target"][..],
        FOCUS_ATTRIBUTES,
    ]
    .concat();
    p.define(&["area"], &[], &area_attributes);
    p.require("area", &["alt"]);
    p.define(
        &["iframe"],
        &["%flow"],
        &[
            "longdesc", "name", "src", "frameborder", "marginwidth", "marginheight", "scrolling",
            "align", "height", "width",
        ],
    );

    // forms
    p.define(
        &["form"],
        &["%flow", "!form"],
        &[
            "action", "method", "name", "enctype", "onsubmit", "onreset", "accept",
            "accept-charset", "target",
        ],
    );
    p.define(
        &["label"],
        &["%phrasing", "!label"],
        &["for", "accesskey", "onfocus", "onblur"],
    );
    let input_attributes = [
        &[
            "type", "name", "value", "checked", "disabled", "readonly", "size", "maxlength",
            "src", "alt", "usemap", "onselect", "onchange", "accept", "align",
        ][..],
        FOCUS_ATTRIBUTES,
    ]
    .concat();
    p.define(&["input"], &[], &input_attributes);
    p.define(
        &["select"],
        &["optgroup", "option"],
        &[
            "name", "size", "multiple", "disabled", "tabindex", "onfocus", "onblur", "onchange",
        ],
    );
    p.define(&["optgroup"], &["option"], &["disabled", "label"]);
    p.require("optgroup", &["label"]);
    p.define(
        &["option"],
        &["#text"],
        &["selected", "disabled", "label", "value"],
    );
    let textarea_attributes = [
        &["name", "rows", "cols", "disabled", "readonly", "onselect", "onchange"][..],
        FOCUS_ATTRIBUTES,
    ]
    .concat();
    p.define(&["textarea"], &["#text"], &textarea_attributes);
    p.define(&["fieldset"], &["legend", "%flow"], &[]);
    p.define(&["legend"], &["%phrasing"], &["accesskey", "align"]);
    let button_attributes = [&["name", "value", "type", "disabled"][..], FOCUS_ATTRIBUTES].concat();
    p.define(
        &["button"],
        &[
            "%flow", "!a", "!form", "!input", "!select", "!textarea", "!label", "!button",
            "!iframe", "!fieldset",
        ],
        &button_attributes,
    );

    // tables
    p.define(
        &["table"],
        &["caption", "col", "colgroup", "thead", "tfoot", "tbody", "tr"],
        &[
            "summary", "width", "border", "frame", "rules", "cellspacing", "cellpadding",
            "align", "bgcolor",
        ],
    );
    p.define(&["caption"], &["%phrasing"], &["align"]);
    let column_attributes = [&["span", "width"][..], CELL_ALIGN_ATTRIBUTES].concat();
    p.define(&["colgroup"], &["col"], &column_attributes);
    p.define(&["col"], &[], &column_attributes);
    p.define(&["thead", "tfoot", "tbody"], &["tr"], CELL_ALIGN_ATTRIBUTES);
    p.define(&["tr"], &["th", "td"], CELL_ALIGN_ATTRIBUTES);
    p.allow(&["tr"], &["bgcolor"]);
    let cell_attributes = [
        &[
            "abbr", "axis", "headers", "scope", "rowspan", "colspan", "nowrap", "bgcolor",
            "width", "height",
        ][..],
        CELL_ALIGN_ATTRIBUTES,
    ]
    .concat();
    p.define(&["th", "td"], &["%flow"], &cell_attributes);

    p
}

fn xhtml1_strict() -> ProfileDefinition {
    let mut p = xhtml1_transitional();
    p.name = XHTML1_STRICT.to_string();

    p.remove_elements(&[
        "applet", "basefont", "center", "dir", "font", "iframe", "menu", "s", "strike", "u",
    ]);

    // no character data directly in these
    p.set_content(&["body", "blockquote", "noscript"], &["%block"]);
    p.set_content(&["form"], &["%block", "!form"]);

    p.forbid(
        &[
            "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "img", "caption", "legend",
            "object", "input", "table",
        ],
        &["align"],
    );
    p.forbid(&["body", "table", "tr", "td", "th"], &["bgcolor"]);
    p.forbid(&["body"], &["background", "text", "link", "vlink", "alink"]);
    p.forbid(&["a", "area", "form", "base", "link"], &["target"]);
    p.forbid(&["br"], &["clear"]);
    p.forbid(&["hr"], &["noshade", "size", "width"]);
    p.forbid(&["ul", "ol", "dl"], &["compact", "type"]);
    p.forbid(&["ol"], &["start"]);
    p.forbid(&["li"], &["type", "value"]);
    p.forbid(&["img"], &["border", "hspace", "vspace", "name"]);
    p.forbid(&["object"], &["border", "hspace", "vspace"]);
    p.forbid(&["td", "th"], &["nowrap", "width", "height"]);
    p.forbid(&["pre"], &["width"]);
    p.forbid(&["script"], &["language"]);
    p.forbid(&["form"], &["name"]);

    p
}

fn xhtml5() -> ProfileDefinition {
    let mut p = xhtml1_transitional();
    p.name = XHTML5.to_string();

    p.remove_elements(&[
        "acronym", "applet", "basefont", "big", "center", "dir", "font", "strike", "tt",
    ]);

    p.global_attributes.extend(
        [
            "hidden",
            "tabindex",
            "accesskey",
            "contenteditable",
            "draggable",
            "spellcheck",
            "translate",
            "role",
            "autofocus",
            "inputmode",
            "nonce",
        ]
        .map(str::to_string),
    );
    p.global_attribute_prefixes
        .extend(["aria-", "data-"].map(str::to_string));

    p.group(
        "block",
        &[
            "article", "aside", "details", "dialog", "figure", "footer", "header", "hgroup",
            "main", "nav", "section",
        ],
    );
    p.group(
        "inline",
        &[
            "audio", "bdi", "canvas", "data", "embed", "mark", "meter", "output", "picture",
            "progress", "ruby", "template", "time", "video", "wbr",
        ],
    );

    p.define(
        &["article", "aside", "footer", "header", "main", "nav", "section", "template"],
        &["%flow"],
        &[],
    );
    p.define(&["hgroup"], &["h1", "h2", "h3", "h4", "h5", "h6", "p"], &[]);
    p.define(&["figure"], &["figcaption", "%flow"], &[]);
    p.define(&["figcaption"], &["%flow"], &[]);
    p.define(&["details"], &["summary", "%flow"], &["open"]);
    p.define(&["summary"], &["%phrasing"], &[]);
    p.define(&["dialog"], &["%flow"], &["open"]);
    p.define(&["mark", "bdi"], &["%phrasing"], &[]);
    p.define(&["time"], &["%phrasing"], &["datetime"]);
    p.define(&["data"], &["%phrasing"], &["value"]);
    p.define(&["wbr"], &[], &[]);
    p.define(&["output"], &["%phrasing"], &["for", "form", "name"]);
    p.define(&["progress"], &["%phrasing", "!progress"], &["value", "max"]);
    p.define(
        &["meter"],
        &["%phrasing", "!meter"],
        &["value", "min", "max", "low", "high", "optimum"],
    );
    p.define(&["ruby"], &["rt", "rp", "%phrasing"], &[]);
    p.define(&["rt", "rp"], &["%phrasing"], &[]);
    p.define(
        &["audio", "video"],
        &["source", "track", "%flow", "!audio", "!video"],
        &[
            "src", "controls", "autoplay", "loop", "muted", "preload", "poster", "width",
            "height", "crossorigin", "playsinline",
        ],
    );
    p.define(&["source"], &[], &["src", "type", "srcset", "sizes", "media"]);
    p.define(&["track"], &[], &["kind", "src", "srclang", "label", "default"]);
    p.define(&["picture"], &["source", "img"], &[]);
    p.define(&["canvas"], &["%flow"], &["width", "height"]);
    p.define(&["embed"], &[], &["src", "type", "width", "height"]);

    // anchors may wrap flow content
    p.set_content(&["a"], &["%flow", "!a"]);
    p.allow(&["a"], &["download", "ping", "referrerpolicy"]);
    p.allow(
        &["img"],
        &["srcset", "sizes", "crossorigin", "loading", "decoding", "referrerpolicy"],
    );
    // alt stays allowed but is no longer required
    p.forbid(&["img"], &["alt"]);
    p.allow(&["img"], &["alt"]);
    p.allow(
        &["input"],
        &[
            "placeholder", "required", "autocomplete", "pattern", "min", "max", "step",
            "multiple", "list", "form",
        ],
    );
    p.allow(&["script"], &["async", "crossorigin", "integrity", "nomodule"]);
    p.allow(&["iframe"], &["allow", "allowfullscreen", "loading", "sandbox", "srcdoc"]);
    p.allow(&["ol"], &["reversed"]);
    p.allow(&["meta"], &["charset"]);

    p.forbid(
        &[
            "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "caption", "legend", "table",
            "iframe", "input", "object",
        ],
        &["align"],
    );
    p.forbid(&["body", "table", "tr", "td", "th"], &["bgcolor"]);
    p.forbid(&["body"], &["background", "text", "link", "vlink", "alink"]);
    p.forbid(&["br"], &["clear"]);
    p.forbid(&["hr"], &["noshade", "size", "width"]);
    p.forbid(&["img"], &["align", "border", "hspace", "vspace", "name", "longdesc"]);
    p.forbid(&["td", "th"], &["nowrap", "width", "height", "axis", "abbr"]);
    p.forbid(&["script"], &["language"]);

    p
}
