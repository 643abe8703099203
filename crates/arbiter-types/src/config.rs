//! Conversion cost settings
//!
//! Costs are plain numbers so callers can tune the tie-breaking behavior
//! of resolution from a TOML table:
//!
//! ```toml
//! boxing = 10
//! null_to_reference = 1
//! reference_widening = 1
//! varargs_penalty = 100
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ty::PrimitiveKind;

/// Costs attached to the non-widening conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionCosts {
    /// Cost of boxing or unboxing a primitive (default: 10)
    #[serde(default = "default_boxing")]
    pub boxing: u32,

    /// Cost of passing `null` where a reference is expected (default: 1)
    #[serde(default = "default_null_to_reference")]
    pub null_to_reference: u32,

    /// Cost of widening a reference to a declared supertype (default: 1)
    #[serde(default = "default_reference_widening")]
    pub reference_widening: u32,

    /// Flat penalty added to every variable-arity match (default: 100)
    #[serde(default = "default_varargs_penalty")]
    pub varargs_penalty: u32,
}

fn default_boxing() -> u32 {
    10
}

fn default_null_to_reference() -> u32 {
    1
}

fn default_reference_widening() -> u32 {
    1
}

fn default_varargs_penalty() -> u32 {
    100
}

impl Default for ConversionCosts {
    fn default() -> Self {
        Self {
            boxing: default_boxing(),
            null_to_reference: default_null_to_reference(),
            reference_widening: default_reference_widening(),
            varargs_penalty: default_varargs_penalty(),
        }
    }
}

impl ConversionCosts {
    /// Parse and validate costs from a TOML document
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, TypeError> {
        let costs: ConversionCosts = toml::from_str(source)?;
        costs.validate()?;
        Ok(costs)
    }

    /// Check that boxing stays more expensive than any widening
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.boxing <= PrimitiveKind::MAX_WIDENING_STEPS {
            return Err(TypeError::InvalidCosts {
                reason: format!(
                    "boxing cost {} must exceed the longest widening path ({} steps)",
                    self.boxing,
                    PrimitiveKind::MAX_WIDENING_STEPS
                ),
            });
        }
        if self.null_to_reference == 0 {
            return Err(TypeError::InvalidCosts {
                reason: "null_to_reference cost must be nonzero".to_string(),
            });
        }
        Ok(())
    }
}
