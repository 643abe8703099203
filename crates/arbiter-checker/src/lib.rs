//! Arbiter Checker
//!
//! Static call and branch resolution.
//!
//! This crate provides:
//! - Signature resolution: strict, loose and variable-arity passes
//! - Branch unification: exhaustiveness, overlap and result-type checks
//! - Diagnostics for every failure, renderable or serializable to JSON
//!
//! # Usage
//!
//! ```
//! use arbiter_checker::{CallDescriptor, Candidate, ParameterList, SignatureResolver};
//! use arbiter_types::{PrimitiveKind, Type};
//!
//! let candidates = vec![
//!     Candidate::new("fly", ParameterList::fixed(vec![Type::Primitive(PrimitiveKind::Int)]), 0),
//!     Candidate::new("fly", ParameterList::fixed(vec![Type::Primitive(PrimitiveKind::Short)]), 1),
//! ];
//! let call = CallDescriptor::new("fly", vec![Type::Primitive(PrimitiveKind::Short)]);
//!
//! let resolution = SignatureResolver::default().resolve(&call, &candidates).unwrap();
//! assert_eq!(*resolution.payload(), 1);
//! ```

#![warn(missing_docs)]

pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod exhaustiveness;
pub mod resolver;
pub mod signature;
pub mod unifier;

// Re-export main types
pub use diagnostic::{create_files, Diagnostic, ErrorCode, JsonDiagnostic, Span};
pub use domain::{ArmLabels, BranchArm, BranchDomain};
pub use error::{DomainError, ResolveError, UnifyError};
pub use exhaustiveness::ExhaustivenessResult;
pub use resolver::{Phase, Resolution, SignatureResolver, VarargsBinding};
pub use signature::{CallDescriptor, Candidate, ParameterList};
pub use unifier::{BranchUnifier, Unified};
