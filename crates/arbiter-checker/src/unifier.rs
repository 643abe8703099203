//! Branch unification
//!
//! A value-producing branch over a finite domain is well formed when every
//! tag reaches exactly one arm and all arms agree on one result type.
//! Structure is checked first (defaults, unknown tags, overlaps,
//! exhaustiveness); the result type is computed only for a well-formed
//! branch.

use arbiter_types::{ConversionContext, Type};
use tracing::debug;

use crate::domain::{BranchArm, BranchDomain};
use crate::error::UnifyError;
use crate::exhaustiveness::{
    check_arm_exhaustiveness, count_default_arms, find_overlapping_tags, find_unknown_tags,
    ExhaustivenessResult,
};

/// Result type of a well-formed branch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unified {
    /// The single type every arm's value converts to
    pub ty: Type,
}

/// Unifier for value-producing branches
///
/// Stateless like [`crate::SignatureResolver`]; arm order never changes
/// the outcome.
#[derive(Debug, Clone, Copy)]
pub struct BranchUnifier<'a> {
    conv: ConversionContext<'a>,
}

impl Default for BranchUnifier<'static> {
    fn default() -> Self {
        BranchUnifier::new(ConversionContext::default())
    }
}

impl<'a> BranchUnifier<'a> {
    /// Create a unifier using the given conversion context
    pub fn new(conv: ConversionContext<'a>) -> Self {
        BranchUnifier { conv }
    }

    /// Check `arms` against `domain` and compute their common result type
    pub fn unify(&self, domain: &BranchDomain, arms: &[BranchArm]) -> Result<Unified, UnifyError> {
        self.check_structure(domain, arms)?;

        let yields = canonical_yields(domain, arms);
        let ty = self.join_all(&yields)?;

        debug!(target: "arbiter.unify", arms = arms.len(), result = %ty, "unified branch");
        Ok(Unified { ty })
    }

    /// Check `arms` against `domain` for a branch whose value is assigned to `target`
    ///
    /// Every produced value must convert to `target`; the result type is
    /// `target` itself.
    pub fn unify_against(
        &self,
        domain: &BranchDomain,
        arms: &[BranchArm],
        target: &Type,
    ) -> Result<Unified, UnifyError> {
        self.check_structure(domain, arms)?;

        let yields = canonical_yields(domain, arms);
        if yields.is_empty() {
            return Err(UnifyError::NoValue);
        }

        if let Some(bad) = yields.iter().find(|ty| !self.conv.is_convertible(ty, target)) {
            debug!(
                target: "arbiter.unify",
                expected = %target,
                found = %bad,
                "arm does not convert to target"
            );
            return Err(UnifyError::TypeConflict {
                first: target.clone(),
                second: (*bad).clone(),
            });
        }

        Ok(Unified { ty: target.clone() })
    }

    /// Structural checks, in order; the first failure wins
    fn check_structure(&self, domain: &BranchDomain, arms: &[BranchArm]) -> Result<(), UnifyError> {
        let defaults = count_default_arms(arms);
        if defaults > 1 {
            return Err(UnifyError::MultipleDefaults { count: defaults });
        }

        let unknown = find_unknown_tags(domain, arms);
        if !unknown.is_empty() {
            return Err(UnifyError::UnknownTags { tags: unknown });
        }

        let overlapping = find_overlapping_tags(domain, arms);
        if !overlapping.is_empty() {
            return Err(UnifyError::OverlappingArms { tags: overlapping });
        }

        match check_arm_exhaustiveness(domain, arms) {
            ExhaustivenessResult::Exhaustive | ExhaustivenessResult::HasDefault => Ok(()),
            ExhaustivenessResult::NonExhaustive(missing) => {
                Err(UnifyError::NotExhaustive { missing })
            }
            ExhaustivenessResult::MissingDefault => Err(UnifyError::MissingDefault),
        }
    }

    /// Join every produced type into one
    fn join_all(&self, yields: &[&Type]) -> Result<Type, UnifyError> {
        if yields.is_empty() {
            return Err(UnifyError::NoValue);
        }

        let mut joined: Option<Type> = None;
        for &ty in yields.iter().filter(|ty| !ty.is_null()) {
            joined = Some(match joined {
                None => ty.clone(),
                Some(current) => self.join_pair(current, ty)?,
            });
        }

        // Only `null` arms: the branch produces the null type
        Ok(joined.unwrap_or(Type::Null))
    }

    fn join_pair(&self, current: Type, ty: &Type) -> Result<Type, UnifyError> {
        if current == *ty {
            return Ok(current);
        }

        // Numeric arms, boxed or not, meet on the widening chain
        let numeric = |t: &Type| t.as_primitive().or_else(|| t.unboxed());
        if let (Some(a), Some(b)) = (numeric(&current), numeric(ty)) {
            return Ok(Type::Primitive(self.conv.join(a, b)));
        }

        // A primitive next to a reference joins as its wrapper
        let boxed = |t: &Type, other: &Type| match t.as_primitive() {
            Some(kind) if other.is_reference() => Type::Boxed(kind),
            _ => t.clone(),
        };
        let left = boxed(&current, ty);
        let right = boxed(ty, &current);

        if left.is_reference() && right.is_reference() {
            if self.conv.is_convertible(&right, &left) {
                return Ok(left);
            }
            if self.conv.is_convertible(&left, &right) {
                return Ok(right);
            }
        }

        Err(UnifyError::TypeConflict {
            first: current,
            second: ty.clone(),
        })
    }
}

/// Produced types in an order that does not depend on arm order
///
/// Arms are ordered by the domain position of their earliest tag (tag text
/// for open domains), default arm last.
fn canonical_yields<'arm>(domain: &BranchDomain, arms: &'arm [BranchArm]) -> Vec<&'arm Type> {
    let mut ordered: Vec<&BranchArm> = arms.iter().collect();
    ordered.sort_by_cached_key(|arm| {
        let position = arm
            .tags()
            .iter()
            .filter_map(|tag| domain.position(tag))
            .min()
            .unwrap_or(usize::MAX);
        let first_tag = arm.tags().iter().min().cloned().unwrap_or_default();
        let rendered: Vec<String> = arm.yields.iter().map(Type::to_string).collect();
        (arm.is_default(), position, first_tag, rendered)
    });

    ordered.into_iter().flat_map(|arm| arm.yields.iter()).collect()
}
