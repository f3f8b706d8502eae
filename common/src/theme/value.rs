use std::sync::LazyLock;

use regex::Regex;

use crate::theme::{ConfigurationError, token::parse_reference};

// value grammars
//
// these are deliberately loose: the goal is to catch typos and wrong-category values at
// startup, not to reimplement a css parser
pub const HEX_COLOR_REGEX: &str = r"^#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$";
pub const FUNCTIONAL_COLOR_REGEX: &str = r"^(rgba?|hsla?)\(\s*[^()]+\)$";
pub const CSS_VAR_REGEX: &str = r"^var\(\s*--[a-zA-Z0-9_-]+\s*(,[^()]*)?\)$";
pub const CALC_REGEX: &str = r"^calc\(.+\)$";
pub const LENGTH_REGEX: &str = r"^-?(\d+(\.\d+)?|\.\d+)(px|em|rem|%|vh|vw|vmin|vmax|ch|ex)$";
pub const FONT_WEIGHT_REGEX: &str = r"^([1-9]00|normal|bold|bolder|lighter)$";

pub const COLOR_KEYWORDS: &[&str] = &[
    "transparent",
    "currentcolor",
    "inherit",
    "initial",
    "unset",
    "black",
    "white",
    "gray",
    "grey",
    "silver",
    "red",
    "maroon",
    "orange",
    "yellow",
    "olive",
    "lime",
    "green",
    "teal",
    "aqua",
    "cyan",
    "blue",
    "navy",
    "purple",
    "fuchsia",
    "magenta",
    "pink",
    "indigo",
    "violet",
];

// token categories whose values must be css lengths
pub const LENGTH_CATEGORIES: &[&str] = &["spacing", "sizes", "fontSizes", "radii"];

pub const GLOBAL_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

// keywords a declaration may use in place of a length, per token category
pub const LENGTH_KEYWORDS: &[&str] = &["auto", "none", "fit-content", "min-content", "max-content"];
pub const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller", "larger",
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in value pattern failed to compile")
}

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| compile(HEX_COLOR_REGEX));
static FUNCTIONAL_COLOR: LazyLock<Regex> = LazyLock::new(|| compile(FUNCTIONAL_COLOR_REGEX));
static CSS_VAR: LazyLock<Regex> = LazyLock::new(|| compile(CSS_VAR_REGEX));
static CALC: LazyLock<Regex> = LazyLock::new(|| compile(CALC_REGEX));
static LENGTH: LazyLock<Regex> = LazyLock::new(|| compile(LENGTH_REGEX));
static FONT_WEIGHT: LazyLock<Regex> = LazyLock::new(|| compile(FONT_WEIGHT_REGEX));

pub fn is_color(value: &str) -> bool {
    let value = value.trim();

    HEX_COLOR.is_match(value)
        || FUNCTIONAL_COLOR.is_match(value)
        || CSS_VAR.is_match(value)
        || COLOR_KEYWORDS.contains(&value.to_ascii_lowercase().as_str())
}

pub fn is_length(value: &str) -> bool {
    let value = value.trim();

    value == "0" || LENGTH.is_match(value) || CALC.is_match(value) || CSS_VAR.is_match(value)
}

pub fn is_font_weight(value: &str) -> bool {
    let value = value.trim();

    FONT_WEIGHT.is_match(value) || CSS_VAR.is_match(value)
}

// check a fully resolved token value against the grammar of its category
//
// categories without a grammar only need to be non-empty
pub fn validate_token(category: &str, key: &str, value: &str) -> Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::invalid(key, value, "token values must not be empty"));
    }

    let ok = match category {
        "colors" => is_color(value),
        "fontWeights" => is_font_weight(value),
        c if LENGTH_CATEGORIES.contains(&c) => is_length(value),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        let reason = match category {
            "colors" => "not a recognizable color expression",
            "fontWeights" => "not a font weight",
            _ => "not a css length",
        };
        Err(ConfigurationError::invalid(key, value, reason))
    }
}

// split at whitespace outside parentheses, so calc(100% - 8px) stays one component
fn components(value: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    out.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        out.push(&value[s..]);
    }

    out
}

// check a declaration value for a property that reads tokens of one category
//
// bare token names have already been matched by the caller, so what is left must be css
// that fits the category; {category.path} components pass, their targets are checked
// separately
pub fn validate_declaration(category: &str, key: &str, value: &str) -> Result<(), ConfigurationError> {
    let lowered = value.trim().to_ascii_lowercase();
    if GLOBAL_KEYWORDS.contains(&lowered.as_str()) {
        return Ok(());
    }

    let (ok, reason) = match category {
        "colors" => (
            is_color(value),
            "not a recognizable color expression or color token",
        ),
        "fontWeights" => (
            is_font_weight(value) || parse_reference(value).is_some(),
            "not a font weight or font weight token",
        ),
        "fontSizes" => (
            is_length(value)
                || parse_reference(value).is_some()
                || FONT_SIZE_KEYWORDS.contains(&lowered.as_str()),
            "not a font size or font size token",
        ),
        c if LENGTH_CATEGORIES.contains(&c) => (
            components(value).iter().all(|part| {
                is_length(part) || parse_reference(part).is_some() || LENGTH_KEYWORDS.contains(part)
            }),
            "not a css length or token of the property's category",
        ),
        _ => (true, ""),
    };

    if ok {
        Ok(())
    } else {
        Err(ConfigurationError::invalid(key, value, reason))
    }
}
