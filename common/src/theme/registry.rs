use std::collections::{BTreeMap, BTreeSet};

use tracing::{Level, debug, instrument};

use crate::{
    breakpoint::Breakpoints,
    config::ThemeConfig,
    theme::{
        ConfigurationError, ThemeSystem,
        css::{self, Declarations},
        token::{self, TokenTable, token_key},
        value,
    },
};

/// Builds the resolved [`ThemeSystem`] from a base configuration and an extension.
pub struct ThemeRegistry;

impl ThemeRegistry {
    // merge rules
    //
    // tokens, global rules and breakpoints merge leaf by leaf with the extension winning; a
    // recipe in the extension replaces the base recipe for its component kind whole
    //
    // this is a pure function of its inputs, so building twice from the same documents gives
    // equal systems
    #[instrument(level=Level::DEBUG, skip_all)]
    pub fn build(base: &ThemeConfig, extension: &ThemeConfig) -> Result<ThemeSystem, ConfigurationError> {
        let empty = TokenTable::new();

        let categories: BTreeSet<&String> = base.tokens.keys().chain(extension.tokens.keys()).collect();

        let mut raw = BTreeMap::new();
        for category in categories {
            let base_tokens = token::flatten(category, base.tokens.get(category).unwrap_or(&empty))?;
            let ext_tokens = token::flatten(category, extension.tokens.get(category).unwrap_or(&empty))?;

            raw.insert(category.clone(), token::merge(category, base_tokens, ext_tokens)?);
        }

        let tokens = token::resolve_all(&raw)?;

        // ui.main and ui-main both render as --colors-ui-main
        let mut variables = BTreeSet::new();
        for (category, table) in &tokens {
            for (name, token) in table {
                let key = token_key(category, name);
                value::validate_token(category, &key, &token.value)?;

                if !variables.insert(css::css_var_name(category, name)) {
                    return Err(ConfigurationError::Conflict { key });
                }
            }
        }

        let mut recipes = base.recipes.clone();
        recipes.extend(extension.recipes.clone());

        let mut global_css = base.global_css.clone();
        for (selector, declarations) in &extension.global_css {
            global_css
                .entry(selector.clone())
                .or_default()
                .extend(declarations.clone());
        }

        let mut breakpoints = base.breakpoints.clone();
        breakpoints.extend(extension.breakpoints.clone());
        let breakpoints = Breakpoints::from_config(&breakpoints)?;

        let system = ThemeSystem {
            tokens,
            recipes,
            global_css,
            breakpoints,
        };

        for (kind, recipe) in &system.recipes {
            recipe.validate(kind)?;

            for (key, _, declarations) in recipe.blocks(kind) {
                check_declarations(&system, &key, declarations)?;
            }
        }

        for (selector, declarations) in &system.global_css {
            if selector.trim().is_empty() {
                return Err(ConfigurationError::invalid(
                    "globalCss",
                    selector,
                    "selectors must not be empty",
                ));
            }

            check_declarations(&system, &format!("globalCss.{selector}"), declarations)?;
        }

        debug!(
            categories = system.tokens.len(),
            recipes = system.recipes.len(),
            rules = system.global_css.len(),
            "built theme system"
        );
        Ok(system)
    }

    // build and store the process-wide system in one step
    pub fn install(
        base: &ThemeConfig,
        extension: &ThemeConfig,
    ) -> Result<&'static ThemeSystem, ConfigurationError> {
        ThemeRegistry::build(base, extension)?.install()
    }
}

fn check_declarations(
    system: &ThemeSystem,
    prefix: &str,
    declarations: &Declarations,
) -> Result<(), ConfigurationError> {
    for (property, value) in declarations {
        let key = format!("{prefix}.{property}");

        if value.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                key,
                value,
                "declaration values must not be empty",
            ));
        }

        for (reference, category, name) in token::references(value) {
            if system.token(category, name).is_none() {
                return Err(ConfigurationError::UnresolvedReference {
                    key,
                    reference: reference.to_owned(),
                });
            }
        }

        if let Some(category) = css::token_category(property) {
            if system.token_reference(property, value).is_none() {
                value::validate_declaration(category, &key, value)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Recipe;

    fn base() -> ThemeConfig {
        ThemeConfig::new()
            .with_token("colors", "ui.main", "#000000")
            .with_token("colors", "ui.accent", "#22c55e")
            .with_token("fontWeights", "bold", "700")
    }

    #[test]
    fn extension_wins_and_base_is_kept() {
        let ext = ThemeConfig::new().with_token("colors", "ui.main", "#7e22ce");
        let system = ThemeRegistry::build(&base(), &ext).unwrap();

        assert_eq!(system.color("ui.main"), Some("#7e22ce"));
        assert_eq!(system.color("ui.accent"), Some("#22c55e"));
        assert_eq!(system.token("fontWeights", "bold"), Some("700"));
    }

    #[test]
    fn global_rules_merge_per_property() {
        let base = base().with_global_rule(".main-link", [("color", "ui.main"), ("fontWeight", "bold")]);
        let ext = ThemeConfig::new().with_global_rule(".main-link", [("color", "ui.accent")]);

        let system = ThemeRegistry::build(&base, &ext).unwrap();
        let rule = system.global_rule(".main-link").unwrap();

        assert_eq!(rule["color"], "ui.accent");
        assert_eq!(rule["fontWeight"], "bold");
    }

    #[test]
    fn malformed_color_names_the_token() {
        let ext = ThemeConfig::new().with_token("colors", "ui.main", "#7e22c");
        let err = ThemeRegistry::build(&base(), &ext).unwrap_err();

        assert_eq!(err.key(), Some("tokens.colors.ui.main"));
    }

    #[test]
    fn malformed_declaration_color_names_the_declaration() {
        let ext = ThemeConfig::new().with_recipe(
            "button",
            Recipe::new().with_variant("visual", "solid", [("bg", "ui.mian")]),
        );
        let err = ThemeRegistry::build(&base(), &ext).unwrap_err();
        assert_eq!(err.key(), Some("recipes.button.variants.visual.solid.bg"));

        let ext = ThemeConfig::new().with_global_rule(".main-link", [("color", "purpleish")]);
        let err = ThemeRegistry::build(&base(), &ext).unwrap_err();
        assert_eq!(err.key(), Some("globalCss..main-link.color"));
    }

    #[test]
    fn dangling_declaration_reference() {
        let ext = ThemeConfig::new().with_global_rule("body", [("borderTop", "{borders.thin}")]);

        assert!(matches!(
            ThemeRegistry::build(&base(), &ext),
            Err(ConfigurationError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn non_color_declarations_are_checked() {
        let ext = ThemeConfig::new().with_recipe(
            "button",
            Recipe::new().with_variant("size", "sm", [("fontSize", "smm")]),
        );
        let err = ThemeRegistry::build(&base(), &ext).unwrap_err();
        assert_eq!(err.key(), Some("recipes.button.variants.size.sm.fontSize"));

        let ext = ThemeConfig::new().with_recipe("button", Recipe::new().with_base("fontWeight", "bodl"));
        let err = ThemeRegistry::build(&base(), &ext).unwrap_err();
        assert_eq!(err.key(), Some("recipes.button.base.fontWeight"));

        let ext = ThemeConfig::new().with_global_rule("main", [("p", "1rem auto"), ("fontWeight", "bold")]);
        assert!(ThemeRegistry::build(&base(), &ext).is_ok());
    }

    #[test]
    fn embedded_references_must_exist() {
        let ext = ThemeConfig::new().with_global_rule("hr", [("border", "1px solid {colors.nope}")]);

        assert_eq!(
            ThemeRegistry::build(&base(), &ext).unwrap_err(),
            ConfigurationError::UnresolvedReference {
                key: "globalCss.hr.border".to_owned(),
                reference: "{colors.nope}".to_owned(),
            }
        );
    }

    #[test]
    fn colliding_custom_properties() {
        let ext = ThemeConfig::new()
            .with_token("colors", "ui-main", "#000000")
            .with_global_rule(".a", [("color", "ui-main")]);

        assert_eq!(
            ThemeRegistry::build(&base(), &ext).unwrap_err(),
            ConfigurationError::Conflict {
                key: "tokens.colors.ui.main".to_owned()
            }
        );
    }

    #[test]
    fn breakpoints_merge_by_name() {
        let base = base().with_breakpoint("sm", "30em").with_breakpoint("md", "48em");
        let ext = ThemeConfig::new().with_breakpoint("md", "40em").with_breakpoint("lg", "64em");

        let system = ThemeRegistry::build(&base, &ext).unwrap();
        let names: Vec<&str> = system.breakpoints().names().collect();

        assert_eq!(names, vec!["base", "sm", "md", "lg"]);
        assert_eq!(system.breakpoints().get("md").unwrap().min_width, 640.0);
    }
}
