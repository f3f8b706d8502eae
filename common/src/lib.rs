pub mod breakpoint;
pub mod config;
pub mod layout;
pub mod theme;

pub use breakpoint::{BreakpointValue, Breakpoints};
pub use config::ThemeConfig;
pub use layout::{BarLayout, Display, MissingProviderError, VisibilityPolicy};
pub use theme::{ConfigurationError, ThemeRegistry, ThemeSystem};

// name validation
//
// token paths and recipe class names end up inside css custom property names and class
// selectors, so we restrict them to characters that need no escaping in either place
pub const TOKEN_NAME_REGEX: &str = r"^[a-zA-Z0-9_-]+(\.[a-zA-Z0-9_-]+)*$";
pub const CLASS_NAME_REGEX: &str = r"^[a-zA-Z_][a-zA-Z0-9_-]*$";

// breakpoint names land in data-bucket attributes and variant-style class suffixes, where a
// leading digit is fine (2xl)
pub const BUCKET_NAME_REGEX: &str = r"^[a-zA-Z0-9_-]+$";
