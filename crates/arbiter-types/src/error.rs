//! Type model errors

use thiserror::Error;

/// Errors raised while building type descriptors or conversion settings
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// A primitive kind name that is not on the widening chain
    #[error("Unknown primitive type: {name}")]
    UnknownPrimitive {
        /// Name that was not recognized
        name: String,
    },

    /// Conversion costs that break the ranking order
    #[error("Invalid conversion costs: {reason}")]
    InvalidCosts {
        /// Reason for invalidity
        reason: String,
    },

    /// Conversion costs could not be read from TOML
    #[error("Failed to parse conversion costs: {message}")]
    ConfigParse {
        /// Parser message
        message: String,
    },
}

impl From<toml::de::Error> for TypeError {
    fn from(err: toml::de::Error) -> Self {
        TypeError::ConfigParse {
            message: err.to_string(),
        }
    }
}
