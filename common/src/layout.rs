use thiserror::Error;

use crate::{
    breakpoint::{BASE, BreakpointValue, Breakpoints},
    theme::{ThemeSystem, css},
};

pub const ROOT_PATH: &str = "/";
pub const BRAND_LABEL: &str = "Task Manager App";
pub const BRAND_CLASS: &str = "main-link";
pub const BRAND_FONT_SIZE: &str = "1.5rem";

// where the brand link looks for its style when the global rule doesn't say
pub const BRAND_COLOR_TOKEN: &str = "ui.main";
pub const BRAND_WEIGHT_TOKEN: &str = "bold";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Hidden,
    Flex,
    Block,
}

impl Display {
    pub fn css_value(self) -> &'static str {
        match self {
            Display::Hidden => "none",
            Display::Flex => "flex",
            Display::Block => "block",
        }
    }

    pub fn is_visible(self) -> bool {
        self != Display::Hidden
    }
}

/// Which display mode the bar takes in each breakpoint bucket.
///
/// Buckets without an entry inherit from the nearest smaller bucket that has one; a bucket
/// the table can't place at all keeps the bar hidden.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityPolicy(BreakpointValue<Display>);

impl VisibilityPolicy {
    // hidden below the bucket, flex from it upwards
    pub fn threshold(bucket: impl Into<String>) -> Self {
        VisibilityPolicy(
            BreakpointValue::new()
                .with(BASE, Display::Hidden)
                .with(bucket, Display::Flex),
        )
    }

    pub fn from_table(table: BreakpointValue<Display>) -> Self {
        VisibilityPolicy(table)
    }

    pub fn display(&self, bucket: &str, breakpoints: &Breakpoints) -> Display {
        self.0
            .resolve(bucket, breakpoints)
            .copied()
            .unwrap_or(Display::Hidden)
    }
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        VisibilityPolicy::threshold("md")
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MissingProviderError {
    #[error("theme system is not available")]
    Theme,
    #[error("breakpoint state is not available")]
    Breakpoint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrandLink {
    pub to: &'static str,
    pub label: &'static str,
    pub class: &'static str,
    pub color: String,
    pub font_weight: String,
    pub font_size: &'static str,
}

impl BrandLink {
    fn resolve(theme: &ThemeSystem) -> Self {
        let selector = format!(".{BRAND_CLASS}");

        let color = theme
            .resolve_declaration(&selector, "color")
            .or_else(|| theme.color(BRAND_COLOR_TOKEN).map(str::to_owned))
            .unwrap_or_else(|| "inherit".to_owned());

        let font_weight = theme
            .resolve_declaration(&selector, "fontWeight")
            .or_else(|| theme.token("fontWeights", BRAND_WEIGHT_TOKEN).map(str::to_owned))
            .unwrap_or_else(|| "bold".to_owned());

        BrandLink {
            to: ROOT_PATH,
            label: BRAND_LABEL,
            class: BRAND_CLASS,
            color,
            font_weight,
            font_size: BRAND_FONT_SIZE,
        }
    }

    pub fn style(&self) -> String {
        css::inline_style([
            ("color", self.color.as_str()),
            ("font-size", self.font_size),
            ("font-weight", self.font_weight.as_str()),
        ])
    }
}

// children of the bar, left to right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarSlot {
    Brand,
    Actions,
}

/// Everything the navigation bar needs to render, resolved from theme and breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct BarLayout {
    pub bucket: String,
    pub display: Display,
    pub container: Vec<(&'static str, String)>,
    pub brand: BrandLink,
    pub slots: [BarSlot; 2],
}

impl BarLayout {
    pub fn resolve(
        theme: Option<&ThemeSystem>,
        bucket: Option<&str>,
        policy: &VisibilityPolicy,
    ) -> Result<Self, MissingProviderError> {
        let theme = theme.ok_or(MissingProviderError::Theme)?;
        let bucket = bucket.ok_or(MissingProviderError::Breakpoint)?;

        let display = policy.display(bucket, theme.breakpoints());

        let mut container = vec![
            ("display", display.css_value().to_owned()),
            ("justify-content", "space-between".to_owned()),
            ("align-items", "center".to_owned()),
            ("position", "sticky".to_owned()),
            ("top", "0".to_owned()),
            ("z-index", "10".to_owned()),
            ("width", "100%".to_owned()),
            ("padding", theme.resolve_value("p", "4")),
        ];

        if let Some(bg) = theme.color("bg.muted") {
            container.push(("background-color", bg.to_owned()));
        }
        if let Some(fg) = theme.color("white") {
            container.push(("color", fg.to_owned()));
        }

        Ok(BarLayout {
            bucket: bucket.to_owned(),
            display,
            container,
            brand: BrandLink::resolve(theme),
            slots: [BarSlot::Brand, BarSlot::Actions],
        })
    }

    pub fn is_visible(&self) -> bool {
        self.display.is_visible()
    }

    pub fn container_style(&self) -> String {
        css::inline_style(self.container.iter().map(|(p, v)| (*p, v.as_str())))
    }
}
