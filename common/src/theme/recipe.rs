use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CLASS_NAME_REGEX, theme::ConfigurationError, theme::css::Declarations};

static CLASS_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLASS_NAME_REGEX).expect("class name pattern failed to compile"));

/// The style variants of one component kind.
///
/// Recipes are atomic: registering a recipe for a kind that already has one replaces it
/// outright, including its variants and defaults.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub base: Declarations,
    // variant group -> variant value -> declarations
    #[serde(default)]
    pub variants: BTreeMap<String, BTreeMap<String, Declarations>>,
    #[serde(default)]
    pub default_variants: BTreeMap<String, String>,
}

impl Recipe {
    pub fn new() -> Self {
        Recipe::default()
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_base(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.insert(property.into(), value.into());
        self
    }

    pub fn with_variant<K, V>(
        mut self,
        group: impl Into<String>,
        value: impl Into<String>,
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

        self.variants
            .entry(group.into())
            .or_default()
            .insert(value.into(), declarations);
        self
    }

    pub fn with_default_variant(mut self, group: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_variants.insert(group.into(), value.into());
        self
    }

    pub fn class_name<'a>(&'a self, kind: &'a str) -> &'a str {
        self.class_name.as_deref().unwrap_or(kind)
    }

    pub fn variant_class(class_name: &str, group: &str, value: &str) -> String {
        format!("{class_name}--{group}-{value}")
    }

    // the class list for a set of variant selections
    //
    // explicit selections win over defaults; selections naming unknown groups or values are
    // dropped so a stale call site degrades to the default look
    pub fn classes(&self, kind: &str, selections: &[(&str, &str)]) -> Vec<String> {
        let class_name = self.class_name(kind);
        let mut classes = vec![class_name.to_owned()];

        for (group, values) in &self.variants {
            let selected = selections
                .iter()
                .rev()
                .find(|(g, v)| *g == group.as_str() && values.contains_key(*v))
                .map(|(_, v)| *v)
                .or_else(|| self.default_variants.get(group).map(String::as_str));

            if let Some(value) = selected {
                classes.push(Recipe::variant_class(class_name, group, value));
            }
        }

        classes
    }

    pub(crate) fn validate(&self, kind: &str) -> Result<(), ConfigurationError> {
        let class_name = self.class_name(kind);
        if !CLASS_NAME.is_match(class_name) {
            return Err(ConfigurationError::invalid(
                format!("recipes.{kind}.className"),
                class_name,
                "not a valid css class name",
            ));
        }

        for (group, values) in &self.variants {
            for value in values.keys() {
                if !CLASS_NAME.is_match(&format!("{group}-{value}")) {
                    return Err(ConfigurationError::invalid(
                        format!("recipes.{kind}.variants.{group}.{value}"),
                        value,
                        "variant names may only contain letters, digits, '_' and '-'",
                    ));
                }
            }
        }

        for (group, value) in &self.default_variants {
            let known = self
                .variants
                .get(group)
                .is_some_and(|values| values.contains_key(value));

            if !known {
                return Err(ConfigurationError::UnknownVariant {
                    key: format!("recipes.{kind}.defaultVariants.{group}"),
                });
            }
        }

        Ok(())
    }

    // every declaration block with the key prefix used in error messages
    pub(crate) fn blocks<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = (String, String, &'a Declarations)> + 'a {
        let class_name = self.class_name(kind);

        let base = std::iter::once((
            format!("recipes.{kind}.base"),
            format!(".{class_name}"),
            &self.base,
        ));

        let variants = self.variants.iter().flat_map(move |(group, values)| {
            values.iter().map(move |(value, declarations)| {
                (
                    format!("recipes.{kind}.variants.{group}.{value}"),
                    format!(".{}", Recipe::variant_class(class_name, group, value)),
                    declarations,
                )
            })
        });

        base.chain(variants)
    }
}
