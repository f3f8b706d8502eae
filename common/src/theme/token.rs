use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::{TOKEN_NAME_REGEX, theme::ConfigurationError};

// {category.path} inside a token value
pub const REFERENCE_REGEX: &str = r"\{([a-zA-Z][a-zA-Z0-9_]*)\.([a-zA-Z0-9_.-]+)\}";

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REFERENCE_REGEX).expect("token reference pattern failed to compile"));
static TOKEN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_NAME_REGEX).expect("token name pattern failed to compile"));

/// A token or a group of tokens as written in a theme document.
///
/// Groups nest arbitrarily; the dotted path from the category root to a leaf is the
/// token's name, so `[tokens.colors.ui.main]` defines the token `ui.main` in `colors`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TokenNode {
    Leaf(TokenDef),
    Group(BTreeMap<String, TokenNode>),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TokenDef {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TokenDef {
    pub fn new(value: impl Into<String>) -> Self {
        TokenDef {
            value: value.into(),
            description: None,
        }
    }
}

/// A resolved token: every reference replaced, value validated against its category.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: String,
    pub description: Option<String>,
}

pub type TokenTable = BTreeMap<String, TokenNode>;
pub type FlatTokens = BTreeMap<String, TokenDef>;

pub(crate) fn token_key(category: &str, name: &str) -> String {
    format!("tokens.{category}.{name}")
}

// insert a leaf at a dotted path, replacing whatever was there
//
// an existing leaf along the path is turned into a group, so the later registration wins
pub(crate) fn insert_path(table: &mut TokenTable, path: &str, def: TokenDef) {
    let mut parts = path.split('.').peekable();
    let mut table = table;

    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            table.insert(part.to_owned(), TokenNode::Leaf(def));
            return;
        }

        let node = table
            .entry(part.to_owned())
            .or_insert_with(|| TokenNode::Group(BTreeMap::new()));

        if let TokenNode::Leaf(_) = node {
            *node = TokenNode::Group(BTreeMap::new());
        }

        table = match node {
            TokenNode::Group(group) => group,
            TokenNode::Leaf(_) => unreachable!("leaf replaced by group above"),
        };
    }
}

// flatten a category tree into dotted names
//
// quoted dotted keys ("ui.main") and nested groups (ui.main) land on the same name; defining
// both is a conflict rather than a silent overwrite
pub(crate) fn flatten(category: &str, table: &TokenTable) -> Result<FlatTokens, ConfigurationError> {
    fn walk(
        category: &str,
        prefix: &str,
        table: &TokenTable,
        out: &mut FlatTokens,
    ) -> Result<(), ConfigurationError> {
        for (name, node) in table {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            match node {
                TokenNode::Leaf(def) => {
                    if !TOKEN_NAME.is_match(&path) {
                        return Err(ConfigurationError::invalid(
                            token_key(category, &path),
                            &path,
                            "token names may only contain letters, digits, '_' and '-'",
                        ));
                    }
                    if out.insert(path.clone(), def.clone()).is_some() {
                        return Err(ConfigurationError::Conflict {
                            key: token_key(category, &path),
                        });
                    }
                }
                TokenNode::Group(group) => walk(category, &path, group, out)?,
            }
        }
        Ok(())
    }

    let mut out = FlatTokens::new();
    walk(category, "", table, &mut out)?;
    Ok(out)
}

// structural merge of one category: extension leaves win, base-only leaves are kept
//
// a name that is a leaf on one side and a group on the other cannot be merged leaf by leaf
pub(crate) fn merge(
    category: &str,
    base: FlatTokens,
    extension: FlatTokens,
) -> Result<FlatTokens, ConfigurationError> {
    let mut merged = base;
    merged.extend(extension);

    for name in merged.keys() {
        let mut prefix = name.as_str();
        while let Some((parent, _)) = prefix.rsplit_once('.') {
            if merged.contains_key(parent) {
                return Err(ConfigurationError::Conflict {
                    key: token_key(category, parent),
                });
            }
            prefix = parent;
        }
    }

    Ok(merged)
}

// replaces {category.path} references with the referenced values, depth first
struct Resolver<'a> {
    raw: &'a BTreeMap<String, FlatTokens>,
    resolved: BTreeMap<(String, String), String>,
    stack: BTreeSet<(String, String)>,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, category: &str, name: &str) -> Result<String, ConfigurationError> {
        let id = (category.to_owned(), name.to_owned());

        if let Some(value) = self.resolved.get(&id) {
            return Ok(value.clone());
        }

        if !self.stack.insert(id.clone()) {
            return Err(ConfigurationError::CyclicReference {
                key: token_key(category, name),
            });
        }

        let tokens: &'a BTreeMap<String, FlatTokens> = self.raw;
        let raw = &tokens[category][name].value;
        let mut value = String::with_capacity(raw.len());
        let mut last = 0;

        for caps in REFERENCE.captures_iter(raw) {
            let (Some(whole), Some(ref_category), Some(ref_name)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let exists = tokens
                .get(ref_category.as_str())
                .is_some_and(|tokens| tokens.contains_key(ref_name.as_str()));

            if !exists {
                return Err(ConfigurationError::UnresolvedReference {
                    key: token_key(category, name),
                    reference: whole.as_str().to_owned(),
                });
            }

            value.push_str(&raw[last..whole.start()]);
            value.push_str(&self.resolve(ref_category.as_str(), ref_name.as_str())?);
            last = whole.end();
        }
        value.push_str(&raw[last..]);

        self.stack.remove(&id);
        self.resolved.insert(id, value.clone());

        Ok(value)
    }
}

pub(crate) fn resolve_all(
    raw: &BTreeMap<String, FlatTokens>,
) -> Result<BTreeMap<String, BTreeMap<String, Token>>, ConfigurationError> {
    let mut resolver = Resolver {
        raw,
        resolved: BTreeMap::new(),
        stack: BTreeSet::new(),
    };

    let mut out = BTreeMap::new();

    for (category, tokens) in raw {
        let mut table = BTreeMap::new();

        for (name, def) in tokens {
            let value = resolver.resolve(category, name)?;
            table.insert(
                name.clone(),
                Token {
                    value,
                    description: def.description.clone(),
                },
            );
        }

        out.insert(category.clone(), table);
    }

    Ok(out)
}

// a declaration value of the exact form {category.path}
pub(crate) fn parse_reference(value: &str) -> Option<(&str, &str)> {
    let caps = REFERENCE.captures(value.trim())?;
    let whole = caps.get(0)?;

    if whole.as_str().len() != value.trim().len() {
        return None;
    }

    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

// every {category.path} inside a value, as (whole, category, path)
pub(crate) fn references(value: &str) -> impl Iterator<Item = (&str, &str, &str)> {
    REFERENCE.captures_iter(value).filter_map(|caps| {
        Some((
            caps.get(0)?.as_str(),
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
        ))
    })
}

// substitute each embedded reference; references the callback can't place are left as written
pub(crate) fn replace_references<'a>(
    value: &'a str,
    mut replace: impl FnMut(&str, &str) -> Option<String>,
) -> Cow<'a, str> {
    REFERENCE.replace_all(value, |caps: &Captures| {
        replace(&caps[1], &caps[2]).unwrap_or_else(|| caps[0].to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_references() {
        let value = "1px solid {colors.gray.200}";

        assert_eq!(
            references(value).collect::<Vec<_>>(),
            vec![("{colors.gray.200}", "colors", "gray.200")]
        );
        assert_eq!(
            replace_references(value, |category, name| Some(format!("var(--{category}-{name})"))),
            "1px solid var(--colors-gray.200)"
        );
        assert_eq!(replace_references("{sizes.nope} auto", |_, _| None), "{sizes.nope} auto");
        assert_eq!(parse_reference(value), None);
    }

    fn table(entries: &[(&str, &str)]) -> TokenTable {
        let mut table = TokenTable::new();
        for (path, value) in entries {
            insert_path(&mut table, path, TokenDef::new(*value));
        }
        table
    }

    #[test]
    fn flatten_nested_groups() {
        let flat = flatten("colors", &table(&[("ui.main", "#7e22ce"), ("gray.100", "#f4f4f5")])).unwrap();

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["ui.main"].value, "#7e22ce");
        assert_eq!(flat["gray.100"].value, "#f4f4f5");
    }

    #[test]
    fn quoted_and_nested_names_conflict() {
        let mut t = table(&[("ui.main", "#7e22ce")]);
        t.insert("ui.main".to_owned(), TokenNode::Leaf(TokenDef::new("#000000")));

        let err = flatten("colors", &t).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Conflict {
                key: "tokens.colors.ui.main".to_owned()
            }
        );
    }

    #[test]
    fn leaf_over_group_conflicts() {
        let base = flatten("colors", &table(&[("ui.main", "#000000")])).unwrap();
        let ext = flatten("colors", &table(&[("ui", "#ffffff")])).unwrap();

        let err = merge("colors", base, ext).unwrap_err();
        assert_eq!(err.key(), Some("tokens.colors.ui"));
    }

    #[test]
    fn references_resolve_across_categories() {
        let mut raw = BTreeMap::new();
        raw.insert(
            "colors".to_owned(),
            flatten("colors", &table(&[("gray.100", "#f4f4f5"), ("bg.muted", "{colors.gray.100}")])).unwrap(),
        );
        raw.insert(
            "borders".to_owned(),
            flatten("borders", &table(&[("muted", "1px solid {colors.bg.muted}")])).unwrap(),
        );

        let resolved = resolve_all(&raw).unwrap();
        assert_eq!(resolved["colors"]["bg.muted"].value, "#f4f4f5");
        assert_eq!(resolved["borders"]["muted"].value, "1px solid #f4f4f5");
    }

    #[test]
    fn dangling_and_cyclic_references() {
        let mut raw = BTreeMap::new();
        raw.insert(
            "colors".to_owned(),
            flatten("colors", &table(&[("a", "{colors.missing}")])).unwrap(),
        );
        assert!(matches!(
            resolve_all(&raw),
            Err(ConfigurationError::UnresolvedReference { .. })
        ));

        raw.insert(
            "colors".to_owned(),
            flatten("colors", &table(&[("a", "{colors.b}"), ("b", "{colors.a}")])).unwrap(),
        );
        assert!(matches!(
            resolve_all(&raw),
            Err(ConfigurationError::CyclicReference { .. })
        ));
    }

    #[test]
    fn whole_value_references() {
        assert_eq!(parse_reference("{colors.ui.main}"), Some(("colors", "ui.main")));
        assert_eq!(parse_reference("1px solid {colors.ui.main}"), None);
        assert_eq!(parse_reference("ui.main"), None);
    }
}
