pub mod css;
pub mod error;
pub mod recipe;
pub mod registry;
pub mod system;
pub mod token;
pub mod value;

pub use error::ConfigurationError;
pub use recipe::Recipe;
pub use registry::ThemeRegistry;
pub use system::ThemeSystem;
pub use token::Token;
