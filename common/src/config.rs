use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use toml;
use tracing::{Level, debug, instrument};

use crate::theme::{
    ConfigurationError,
    css::Declarations,
    recipe::Recipe,
    token::{TokenDef, TokenNode, TokenTable, insert_path},
};

const BASE_THEME: &str = include_str!("theme/base.toml");

// theme configuration
//
// the same shape serves as the base design system and as an application's extension of it;
// every table is optional so an extension only names what it changes
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    // selector -> declarations, applied document-wide
    #[serde(default)]
    pub global_css: BTreeMap<String, Declarations>,
    // category -> token tree
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenTable>,
    // component kind -> recipe
    #[serde(default)]
    pub recipes: BTreeMap<String, Recipe>,
    // bucket name -> minimum width
    #[serde(default)]
    pub breakpoints: BTreeMap<String, String>,
}

impl ThemeConfig {
    pub fn new() -> Self {
        ThemeConfig::default()
    }

    // the design system shipped with this crate
    pub fn base() -> Result<Self, ConfigurationError> {
        ThemeConfig::from_toml(BASE_THEME)
    }

    #[instrument(level=Level::DEBUG, skip(doc))]
    pub fn from_toml(doc: &str) -> Result<Self, ConfigurationError> {
        debug!("parsing theme document");

        let config: ThemeConfig = toml::from_str(doc)?;

        debug!(
            categories = config.tokens.len(),
            recipes = config.recipes.len(),
            rules = config.global_css.len(),
            "successfully parsed theme document"
        );
        Ok(config)
    }

    // builders
    //
    // registering the same key twice keeps the later registration
    pub fn with_token(
        mut self,
        category: impl Into<String>,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        let table = self.tokens.entry(category.into()).or_default();
        insert_path(table, name, TokenDef::new(value));
        self
    }

    pub fn with_recipe(mut self, kind: impl Into<String>, recipe: Recipe) -> Self {
        self.recipes.insert(kind.into(), recipe);
        self
    }

    pub fn with_global_rule<K, V>(
        mut self,
        selector: impl Into<String>,
        declarations: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let declarations = declarations
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        self.global_css.insert(selector.into(), declarations);
        self
    }

    pub fn with_breakpoint(mut self, name: impl Into<String>, min_width: impl Into<String>) -> Self {
        self.breakpoints.insert(name.into(), min_width.into());
        self
    }

    // the raw definition at a dotted path, if there is a leaf there
    pub fn token_def(&self, category: &str, name: &str) -> Option<&TokenDef> {
        let mut table = self.tokens.get(category)?;
        let mut parts = name.split('.').peekable();

        while let Some(part) = parts.next() {
            match (table.get(part)?, parts.peek()) {
                (TokenNode::Leaf(def), None) => return Some(def),
                (TokenNode::Group(group), Some(_)) => table = group,
                _ => return None,
            }
        }

        None
    }
}
