use common::{
    BarLayout, ConfigurationError, Display, ThemeConfig, ThemeRegistry, VisibilityPolicy,
    layout::BarSlot,
    theme::Recipe,
};

const APP_THEME: &str = r##"
[globalCss.".main-link"]
color = "ui.main"
fontWeight = "bold"

[tokens.colors.ui]
main = { value = "#7e22ce" }

[recipes.button]
className = "button"

[recipes.button.base]
fontWeight = "bold"

[recipes.button.variants.visual.solid]
bg = "ui.main"
color = "white"

[recipes.button.defaultVariants]
visual = "solid"
"##;

fn base() -> ThemeConfig {
    ThemeConfig::base()
        .unwrap()
        .with_token("colors", "ui.main", "#000000")
}

#[test]
fn build_is_idempotent() {
    let ext = ThemeConfig::from_toml(APP_THEME).unwrap();

    let first = ThemeRegistry::build(&base(), &ext).unwrap();
    let second = ThemeRegistry::build(&base(), &ext).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.stylesheet(), second.stylesheet());
}

#[test]
fn override_wins_and_base_is_preserved() {
    let base = base();
    let ext = ThemeConfig::from_toml(APP_THEME).unwrap();
    let system = ThemeRegistry::build(&base, &ext).unwrap();

    assert_eq!(system.color("ui.main"), Some("#7e22ce"));

    for category in system.categories() {
        for (name, token) in system.tokens(category) {
            if category == "colors" && name == "ui.main" {
                continue;
            }
            let raw = base.token_def(category, name).unwrap();
            if !raw.value.contains('{') {
                assert_eq!(token.value, raw.value, "{category}.{name} should come from the base");
            }
        }
    }
}

#[test]
fn recipes_replace_atomically() {
    let first = Recipe::new()
        .with_base("cursor", "pointer")
        .with_variant("size", "sm", [("fontSize", "sm")])
        .with_variant("visual", "solid", [("bg", "ui.main")])
        .with_default_variant("size", "sm");
    let second = Recipe::new().with_variant("visual", "ghost", [("color", "ui.main")]);

    let base = base().with_recipe("button", first);
    let ext = ThemeConfig::new().with_recipe("button", second.clone());
    let system = ThemeRegistry::build(&base, &ext).unwrap();

    let button = system.recipe("button").unwrap();
    assert_eq!(button, &second);
    assert!(button.base.is_empty());
    assert!(!button.variants.contains_key("size"));
    assert!(button.default_variants.is_empty());
    assert_eq!(
        system.recipe_classes("button", &[("visual", "ghost")]).as_deref(),
        Some("button button--visual-ghost")
    );
}

#[test]
fn visibility_follows_the_threshold() {
    let system = ThemeRegistry::build(&base(), &ThemeConfig::new()).unwrap();
    let policy = VisibilityPolicy::default();
    let names: Vec<&str> = system.breakpoints().names().collect();
    let threshold = names.iter().position(|n| *n == "md").unwrap();

    for (i, bucket) in names.iter().enumerate() {
        let layout = BarLayout::resolve(Some(&system), Some(*bucket), &policy).unwrap();
        let expected = if i < threshold { Display::Hidden } else { Display::Flex };

        assert_eq!(layout.display, expected, "bucket {bucket}");
    }
}

#[test]
fn brand_link_takes_the_extension_color() {
    let base = ThemeConfig::new().with_token("colors", "ui.main", "#000000");
    let ext = ThemeConfig::new().with_token("colors", "ui.main", "#7e22ce");
    let system = ThemeRegistry::build(&base, &ext).unwrap();

    let layout = BarLayout::resolve(Some(&system), Some("base"), &VisibilityPolicy::default()).unwrap();
    assert_eq!(layout.brand.color, "#7e22ce");
}

#[test]
fn bar_hidden_on_base_and_shown_on_md() {
    let ext = ThemeConfig::from_toml(APP_THEME).unwrap();
    let system = ThemeRegistry::build(&base(), &ext).unwrap();
    let policy = VisibilityPolicy::default();

    let small = BarLayout::resolve(Some(&system), Some("base"), &policy).unwrap();
    assert_eq!(small.display, Display::Hidden);
    assert!(small.container_style().starts_with("display: none;"));

    let wide = BarLayout::resolve(Some(&system), Some("md"), &policy).unwrap();
    assert!(wide.is_visible());
    assert_eq!(wide.slots, [BarSlot::Brand, BarSlot::Actions]);
    assert_eq!(wide.brand.to, "/");
    assert_eq!(wide.brand.class, "main-link");
    assert_eq!(wide.brand.color, "#7e22ce");
}

#[test]
fn missing_context_is_not_an_error_for_the_page() {
    let policy = VisibilityPolicy::default();

    assert!(BarLayout::resolve(None, None, &policy).is_err());
    assert!(BarLayout::resolve(None, Some("md"), &policy).is_err());
}

#[test]
fn misconfiguration_fails_fast() {
    let ext = ThemeConfig::from_toml(&APP_THEME.replace("#7e22ce", "#7e22cg")).unwrap();
    let err = ThemeRegistry::build(&base(), &ext).unwrap_err();
    assert_eq!(err.key(), Some("tokens.colors.ui.main"));
    assert!(err.to_string().contains("tokens.colors.ui.main"));

    let ext = ThemeConfig::from_toml(&APP_THEME.replace("visual = \"solid\"", "visual = \"flat\"")).unwrap();
    assert_eq!(
        ThemeRegistry::build(&base(), &ext).unwrap_err(),
        ConfigurationError::UnknownVariant {
            key: "recipes.button.defaultVariants.visual".to_owned()
        }
    );

    let ext = ThemeConfig::new().with_token("colors", "ui", "#ffffff");
    assert_eq!(
        ThemeRegistry::build(&base(), &ext).unwrap_err(),
        ConfigurationError::Conflict {
            key: "tokens.colors.ui".to_owned()
        }
    );

    let ext = ThemeConfig::from_toml(&APP_THEME.replace(
        "[tokens.colors.ui]",
        "[tokens.colors]\nui-main = { value = \"#000000\" }\n\n[tokens.colors.ui]",
    )).unwrap();
    assert_eq!(
        ThemeRegistry::build(&base(), &ext).unwrap_err(),
        ConfigurationError::Conflict {
            key: "tokens.colors.ui.main".to_owned()
        }
    );

    let ext = ThemeConfig::new().with_global_rule(".main-link", [("border", "1px solid {colors.nope}")]);
    assert!(matches!(
        ThemeRegistry::build(&base(), &ext),
        Err(ConfigurationError::UnresolvedReference { .. })
    ));

    let ext = ThemeConfig::from_toml(&APP_THEME.replace("fontWeight = \"bold\"\n\n[tokens", "fontWeight = \"bodl\"\n\n[tokens")).unwrap();
    assert_eq!(
        ThemeRegistry::build(&base(), &ext).unwrap_err().key(),
        Some("globalCss..main-link.fontWeight")
    );

    let ext = ThemeConfig::new().with_breakpoint("tablet", "30em");
    assert!(matches!(
        ThemeRegistry::build(&base(), &ext),
        Err(ConfigurationError::InvalidBreakpoint { .. })
    ));
}

#[test]
fn application_theme_builds() {
    let ext = ThemeConfig::from_toml(include_str!("../../webapp/src/theme.toml")).unwrap();
    let system = ThemeRegistry::build(&ThemeConfig::base().unwrap(), &ext).unwrap();

    assert_eq!(system.color("ui.main"), Some("#7e22ce"));
    assert_eq!(
        system.recipe_classes("button", &[("visual", "ghost"), ("size", "sm")]).as_deref(),
        Some("button button--size-sm button--visual-ghost")
    );
    assert!(system.stylesheet().contains(".main-link {\n  color: var(--colors-ui-main);\n"));
}
