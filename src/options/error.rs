//! Error types for the option-bean registry.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while registering, parsing or looking up option beans.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The arguments could not be tokenized against the registered flags
    #[error("Failed to parse arguments: {0}")]
    Parse(#[from] clap::Error),

    /// No bean of the requested type was ever registered
    #[error("No [{requested}] found in [{}]", .registered.join(", "))]
    BeanNotFound {
        requested: &'static str,
        registered: Vec<&'static str>,
    },

    /// Two factories produced beans of the same concrete type
    #[error("Option bean [{type_name}] is already registered")]
    DuplicateBean { type_name: &'static str },

    /// The registry has already run its parse pass
    #[error("Options have already been parsed and configured")]
    AlreadyConfigured,

    /// A bean rejected the value of one of its flags
    #[error("Invalid value for '{flag}': {message}")]
    InvalidValue { flag: String, message: String },

    /// A bean failed to load a config file it depends on
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other failure raised by an extension bean
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
