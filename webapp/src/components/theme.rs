use anyhow::Context;
use dioxus::prelude::*;
use tracing::warn;

use common::{ThemeConfig, ThemeRegistry, ThemeSystem};

// the application's extension of the base design system
const APP_THEME: &str = include_str!("../theme.toml");

pub fn install_theme() -> anyhow::Result<&'static ThemeSystem> {
    let base = ThemeConfig::base().context("failed to load the base theme")?;
    let extension = ThemeConfig::from_toml(APP_THEME).context("failed to parse the application theme")?;

    ThemeRegistry::install(&base, &extension).context("failed to build the theme system")
}

#[derive(Clone, Copy)]
struct ThemeContext {
    system: Option<&'static ThemeSystem>,
}

// None both outside a ThemeProvider and before the theme has been installed
pub fn use_theme() -> Option<&'static ThemeSystem> {
    try_use_context::<ThemeContext>().and_then(|ctx| ctx.system)
}

#[component]
pub fn ThemeProvider(children: Element) -> Element {
    let context = use_context_provider(|| ThemeContext {
        system: ThemeSystem::try_get(),
    });

    let stylesheet = use_hook(move || match context.system {
        Some(system) => system.stylesheet(),
        None => {
            warn!("theme provider mounted without an installed theme");
            String::new()
        }
    });

    rsx! {
        style { "{stylesheet}" }
        {children}
    }
}
