use thiserror::Error;

// theme build failures
//
// every variant carries the dotted key of the offending entry as it appears in the
// configuration document, e.g. tokens.colors.ui.main or recipes.button.defaultVariants.size
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: &'static str,
    },

    // a leaf and a group under one name, or two tokens rendering to one custom property
    #[error("conflicting definitions for {key}")]
    Conflict { key: String },

    #[error("{key} references undefined token {reference}")]
    UnresolvedReference { key: String, reference: String },

    #[error("{key} is part of a reference cycle")]
    CyclicReference { key: String },

    #[error("{key} names a variant that the recipe does not define")]
    UnknownVariant { key: String },

    #[error("invalid breakpoint {key}: {reason}")]
    InvalidBreakpoint { key: String, reason: String },

    #[error("failed to parse theme document: {0}")]
    Parse(String),

    #[error("the theme system has already been installed")]
    AlreadyInstalled,
}

impl ConfigurationError {
    pub(crate) fn invalid(key: impl Into<String>, value: &str, reason: &'static str) -> Self {
        ConfigurationError::InvalidValue {
            key: key.into(),
            value: value.to_owned(),
            reason,
        }
    }

    // the key naming the offending entry, if the failure is tied to one
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigurationError::InvalidValue { key, .. }
            | ConfigurationError::Conflict { key }
            | ConfigurationError::UnresolvedReference { key, .. }
            | ConfigurationError::CyclicReference { key }
            | ConfigurationError::UnknownVariant { key }
            | ConfigurationError::InvalidBreakpoint { key, .. } => Some(key),
            ConfigurationError::Parse(_) | ConfigurationError::AlreadyInstalled => None,
        }
    }
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(err: toml::de::Error) -> Self {
        ConfigurationError::Parse(err.to_string())
    }
}
