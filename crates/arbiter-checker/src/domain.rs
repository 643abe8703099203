//! Branch domains and arms

use arbiter_types::Type;
use rustc_hash::FxHashSet;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DomainKind {
    Enumerated(Vec<String>),
    Open,
}

/// The set of values a branch selector can take
///
/// An enumerated domain lists every tag (enum constants, for instance). An
/// open domain (an `int` selector) cannot be listed, so only a default arm
/// makes a branch over it exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchDomain {
    kind: DomainKind,
}

impl BranchDomain {
    /// Create an enumerated domain; tags must be distinct
    pub fn enumerated<I, S>(tags: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let mut ordered = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !seen.insert(tag.clone()) {
                return Err(DomainError::DuplicateTag { tag });
            }
            ordered.push(tag);
        }
        Ok(BranchDomain {
            kind: DomainKind::Enumerated(ordered),
        })
    }

    /// Create an open domain
    pub fn open() -> Self {
        BranchDomain {
            kind: DomainKind::Open,
        }
    }

    /// Check if the domain cannot be enumerated
    pub fn is_open(&self) -> bool {
        matches!(self.kind, DomainKind::Open)
    }

    /// Tags of an enumerated domain, in declaration order (empty when open)
    pub fn tags(&self) -> &[String] {
        match &self.kind {
            DomainKind::Enumerated(tags) => tags,
            DomainKind::Open => &[],
        }
    }

    /// Check if `tag` belongs to the domain (always true when open)
    pub fn contains(&self, tag: &str) -> bool {
        match &self.kind {
            DomainKind::Enumerated(tags) => tags.iter().any(|t| t == tag),
            DomainKind::Open => true,
        }
    }

    /// Declaration index of `tag` in an enumerated domain
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags().iter().position(|t| t == tag)
    }
}

/// Which selector values an arm handles
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArmLabels {
    /// Explicit tags: `case WINTER, SPRING`
    Tags(Vec<String>),
    /// Every tag no other arm handles
    Default,
}

/// One arm of a value-producing branch
///
/// `yields` holds the type of every value the arm can produce: one for an
/// expression arm, one per `yield` for a block arm, none for an arm that
/// always throws.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchArm {
    /// Tags handled by this arm
    pub labels: ArmLabels,
    /// Types of the values produced
    pub yields: Vec<Type>,
}

impl BranchArm {
    /// Expression arm over explicit tags
    pub fn case<I, S>(tags: I, ty: Type) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BranchArm::block(ArmLabels::tags(tags), vec![ty])
    }

    /// Default expression arm
    pub fn default(ty: Type) -> Self {
        BranchArm::block(ArmLabels::Default, vec![ty])
    }

    /// Block arm yielding each of `yields`
    pub fn block(labels: ArmLabels, yields: Vec<Type>) -> Self {
        BranchArm { labels, yields }
    }

    /// Arm that never completes normally
    pub fn throwing(labels: ArmLabels) -> Self {
        BranchArm::block(labels, Vec::new())
    }

    /// Check if this is the default arm
    pub fn is_default(&self) -> bool {
        matches!(self.labels, ArmLabels::Default)
    }

    /// Explicit tags (empty for the default arm)
    pub fn tags(&self) -> &[String] {
        match &self.labels {
            ArmLabels::Tags(tags) => tags,
            ArmLabels::Default => &[],
        }
    }
}

impl ArmLabels {
    /// Explicit tag labels
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ArmLabels::Tags(tags.into_iter().map(Into::into).collect())
    }
}
