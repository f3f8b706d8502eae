use std::{collections::BTreeMap, fmt::Write};

/// Property name to value, in the camelCase/shorthand form used by theme documents.
pub type Declarations = BTreeMap<String, String>;

pub const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "bg",
    "background",
    "backgroundColor",
    "borderColor",
    "fill",
    "stroke",
    "outlineColor",
];

pub fn is_color_property(property: &str) -> bool {
    COLOR_PROPERTIES.contains(&property)
}

// the token category a bare declaration value is looked up in
pub fn token_category(property: &str) -> Option<&'static str> {
    match property {
        p if is_color_property(p) => Some("colors"),
        "fontWeight" => Some("fontWeights"),
        "fontSize" => Some("fontSizes"),
        "borderRadius" => Some("radii"),
        "p" | "px" | "py" | "m" | "mx" | "my" | "gap" | "padding" | "paddingInline"
        | "paddingBlock" | "margin" | "marginInline" | "marginBlock" | "top" | "left" | "right"
        | "bottom" => Some("spacing"),
        "w" | "h" | "width" | "height" | "minWidth" | "maxWidth" | "minHeight" | "maxHeight" => {
            Some("sizes")
        }
        _ => None,
    }
}

fn shorthand(property: &str) -> Option<&'static str> {
    match property {
        "bg" => Some("background"),
        "p" => Some("padding"),
        "px" => Some("padding-inline"),
        "py" => Some("padding-block"),
        "m" => Some("margin"),
        "mx" => Some("margin-inline"),
        "my" => Some("margin-block"),
        "w" => Some("width"),
        "h" => Some("height"),
        _ => None,
    }
}

pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

pub fn css_property(property: &str) -> String {
    match shorthand(property) {
        Some(v) => v.to_owned(),
        None => kebab_case(property),
    }
}

pub fn css_var_name(category: &str, name: &str) -> String {
    format!("--{}-{}", kebab_case(category), name.replace('.', "-"))
}

// render one rule; declarations are already css property/value pairs
pub fn write_rule(
    out: &mut String,
    selector: &str,
    declarations: impl IntoIterator<Item = (String, String)>,
) {
    let _ = writeln!(out, "{selector} {{");
    for (property, value) in declarations {
        let _ = writeln!(out, "  {property}: {value};");
    }
    let _ = writeln!(out, "}}");
}

pub fn inline_style<'a>(declarations: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    declarations
        .into_iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}
