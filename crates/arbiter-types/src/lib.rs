//! Arbiter Type Model
//!
//! Type descriptors and conversion ranking shared by the signature
//! resolver and the branch unifier.

#![warn(missing_docs)]

pub mod config;
pub mod conversion;
pub mod error;
pub mod hierarchy;
pub mod ty;

pub use config::ConversionCosts;
pub use conversion::{Conversion, ConversionContext, ConversionKind};
pub use error::TypeError;
pub use hierarchy::{DeclaredHierarchy, NoHierarchy, ReferenceHierarchy};
pub use ty::{PrimitiveKind, Type};
