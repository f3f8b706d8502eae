use std::{
    collections::BTreeMap,
    fmt::Write,
    sync::OnceLock,
};

use tracing::info;

use crate::{
    breakpoint::Breakpoints,
    theme::{
        ConfigurationError, Recipe, Token,
        css::{self, Declarations},
        token::{parse_reference, replace_references},
    },
};

// process-wide theme
//
// set once at startup and never torn down; readers get a plain &'static with no locking
static THEME_SYSTEM: OnceLock<ThemeSystem> = OnceLock::new();

/// The fully resolved design system: tokens, recipes, global rules and breakpoints.
///
/// Built by [`ThemeRegistry`](crate::ThemeRegistry) and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeSystem {
    pub(crate) tokens: BTreeMap<String, BTreeMap<String, Token>>,
    pub(crate) recipes: BTreeMap<String, Recipe>,
    pub(crate) global_css: BTreeMap<String, Declarations>,
    pub(crate) breakpoints: Breakpoints,
}

impl ThemeSystem {
    pub fn install(self) -> Result<&'static ThemeSystem, ConfigurationError> {
        THEME_SYSTEM
            .set(self)
            .map_err(|_| ConfigurationError::AlreadyInstalled)?;

        info!("installed theme system");
        THEME_SYSTEM.get().ok_or(ConfigurationError::AlreadyInstalled)
    }

    pub fn try_get() -> Option<&'static ThemeSystem> {
        THEME_SYSTEM.get()
    }

    // tokens

    pub fn token(&self, category: &str, name: &str) -> Option<&str> {
        self.lookup(category, name).map(|(_, _, token)| token.value.as_str())
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        self.token("colors", name)
    }

    pub fn tokens(&self, category: &str) -> impl Iterator<Item = (&str, &Token)> {
        self.tokens
            .get(category)
            .into_iter()
            .flat_map(|table| table.iter().map(|(name, token)| (name.as_str(), token)))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn css_var(&self, category: &str, name: &str) -> Option<String> {
        self.lookup(category, name)
            .map(|(category, name, _)| css::css_var_name(category, name))
    }

    fn lookup(&self, category: &str, name: &str) -> Option<(&str, &str, &Token)> {
        let (category, table) = self.tokens.get_key_value(category)?;
        let (name, token) = table.get_key_value(name)?;

        Some((category.as_str(), name.as_str(), token))
    }

    // the token a declaration value stands for
    //
    // either an explicit {category.path} reference, or a bare name looked up in the category
    // associated with the property (color -> colors, fontWeight -> fontWeights, ...)
    pub fn token_reference(&self, property: &str, value: &str) -> Option<(&str, &str, &Token)> {
        if let Some((category, name)) = parse_reference(value) {
            return self.lookup(category, name);
        }

        self.lookup(css::token_category(property)?, value.trim())
    }

    // the plain css value, with embedded references such as 1px solid {colors.gray.200}
    // replaced by the token values
    pub fn resolve_value(&self, property: &str, value: &str) -> String {
        match self.token_reference(property, value) {
            Some((_, _, token)) => token.value.clone(),
            None => replace_references(value, |category, name| self.token(category, name).map(str::to_owned))
                .into_owned(),
        }
    }

    fn css_value(&self, property: &str, value: &str) -> String {
        match self.token_reference(property, value) {
            Some((category, name, _)) => format!("var({})", css::css_var_name(category, name)),
            None => replace_references(value, |category, name| {
                self.css_var(category, name).map(|var| format!("var({var})"))
            })
            .into_owned(),
        }
    }

    // recipes

    pub fn recipe(&self, kind: &str) -> Option<&Recipe> {
        self.recipes.get(kind)
    }

    pub fn recipe_classes(&self, kind: &str, selections: &[(&str, &str)]) -> Option<String> {
        self.recipe(kind)
            .map(|recipe| recipe.classes(kind, selections).join(" "))
    }

    // global rules

    pub fn global_rule(&self, selector: &str) -> Option<&Declarations> {
        self.global_css.get(selector)
    }

    pub fn global_rules(&self) -> impl Iterator<Item = (&str, &Declarations)> {
        self.global_css.iter().map(|(selector, rule)| (selector.as_str(), rule))
    }

    pub fn resolve_declaration(&self, selector: &str, property: &str) -> Option<String> {
        let value = self.global_rule(selector)?.get(property)?;

        Some(self.resolve_value(property, value))
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    // rendering
    //
    // tokens become custom properties on :root and every declaration that names a token
    // reads it through var(), so the stylesheet and the token table can't disagree
    pub fn stylesheet(&self) -> String {
        let mut out = String::new();

        css::write_rule(
            &mut out,
            ":root",
            self.tokens.iter().flat_map(|(category, table)| {
                table
                    .iter()
                    .map(move |(name, token)| (css::css_var_name(category, name), token.value.clone()))
            }),
        );

        for (selector, declarations) in &self.global_css {
            css::write_rule(&mut out, selector, self.render_declarations(declarations));
        }

        for (kind, recipe) in &self.recipes {
            let _ = writeln!(out, "/* {kind} */");
            for (_, selector, declarations) in recipe.blocks(kind) {
                css::write_rule(&mut out, &selector, self.render_declarations(declarations));
            }
        }

        out
    }

    fn render_declarations<'a>(
        &'a self,
        declarations: &'a Declarations,
    ) -> impl Iterator<Item = (String, String)> + 'a {
        declarations
            .iter()
            .map(|(property, value)| (css::css_property(property), self.css_value(property, value)))
    }
}
