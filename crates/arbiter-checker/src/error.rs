//! Error types for call resolution and branch unification
//!
//! Every failure is a value handed back to the caller; nothing here is
//! recovered from locally.

use arbiter_types::Type;
use thiserror::Error;

/// Errors that can occur while resolving a call against candidate signatures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// No candidate is applicable in any pass
    #[error("No applicable signature for call '{call}'")]
    NoMatch {
        /// The call as written (`fly(short, int)`)
        call: String,
        /// Argument types of the call
        args: Vec<Type>,
    },

    /// Two or more candidates tie at the minimum cost within one pass
    #[error("Ambiguous call '{call}': {} signatures match equally well", .signatures.len())]
    Ambiguous {
        /// The call as written
        call: String,
        /// Indices of the tying candidates in the supplied candidate slice
        candidates: Vec<usize>,
        /// Rendered signatures of the tying candidates
        signatures: Vec<String>,
    },
}

/// Errors that can occur while unifying the arms of a branch construct
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnifyError {
    /// Some domain tags are not covered and there is no default arm
    #[error("Branch is not exhaustive: missing {}", .missing.join(", "))]
    NotExhaustive {
        /// Uncovered tags, in domain order
        missing: Vec<String>,
    },

    /// The selector domain is open and there is no default arm
    #[error("Branch over an open domain requires a default arm")]
    MissingDefault,

    /// A tag is covered by more than one arm
    #[error("Overlapping branch arms: {} covered more than once", .tags.join(", "))]
    OverlappingArms {
        /// Tags covered more than once
        tags: Vec<String>,
    },

    /// More than one default arm
    #[error("Branch has {count} default arms, at most one is allowed")]
    MultipleDefaults {
        /// Number of default arms
        count: usize,
    },

    /// An arm names tags that do not belong to the domain
    #[error("Unknown branch tags: {}", .tags.join(", "))]
    UnknownTags {
        /// Tags outside the domain
        tags: Vec<String>,
    },

    /// Two arms produce types with no common result type
    #[error("Branch arms disagree on result type: '{first}' and '{second}'")]
    TypeConflict {
        /// Result type established so far (or the expected target type)
        first: Type,
        /// Arm type that conflicts with it
        second: Type,
    },

    /// No arm produces a value
    #[error("Branch produces no value: every arm completes abruptly")]
    NoValue,
}

/// Errors that can occur while building a branch domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A tag was listed twice
    #[error("Duplicate domain tag '{tag}'")]
    DuplicateTag {
        /// The repeated tag
        tag: String,
    },
}
