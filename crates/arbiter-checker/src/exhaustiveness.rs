//! Exhaustiveness checking for branch arms
//!
//! Checks that every tag of a branch domain is handled by exactly one arm:
//! no arm may repeat a tag another arm (or the same arm) already handles,
//! and either the arms list every tag or a default arm picks up the rest.

use rustc_hash::FxHashSet;

use crate::domain::{BranchArm, BranchDomain};

/// Result of exhaustiveness checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhaustivenessResult {
    /// Every domain tag is handled by an explicit arm
    Exhaustive,
    /// Missing tags, in domain order
    NonExhaustive(Vec<String>),
    /// Has a default arm, so exhaustive by definition
    HasDefault,
    /// Open domain without a default arm
    MissingDefault,
}

impl ExhaustivenessResult {
    /// Check if every selector value reaches an arm
    pub fn is_exhaustive(&self) -> bool {
        matches!(
            self,
            ExhaustivenessResult::Exhaustive | ExhaustivenessResult::HasDefault
        )
    }
}

/// Check if `arms` cover `domain`
///
/// # Returns
/// * `ExhaustivenessResult::HasDefault` - A default arm exists
/// * `ExhaustivenessResult::Exhaustive` - All enumerated tags covered
/// * `ExhaustivenessResult::NonExhaustive(missing)` - Missing tags listed
/// * `ExhaustivenessResult::MissingDefault` - Open domain, no default
pub fn check_arm_exhaustiveness(domain: &BranchDomain, arms: &[BranchArm]) -> ExhaustivenessResult {
    if has_default_arm(arms) {
        return ExhaustivenessResult::HasDefault;
    }

    if domain.is_open() {
        return ExhaustivenessResult::MissingDefault;
    }

    let covered = covered_tags(arms);

    let missing: Vec<String> = domain
        .tags()
        .iter()
        .filter(|tag| !covered.contains(tag.as_str()))
        .cloned()
        .collect();

    if missing.is_empty() {
        ExhaustivenessResult::Exhaustive
    } else {
        ExhaustivenessResult::NonExhaustive(missing)
    }
}

/// Tags handled by more than one arm, or listed twice in one arm
///
/// Enumerated domains report in domain order; open domains in the order
/// the repeats are first seen.
pub fn find_overlapping_tags(domain: &BranchDomain, arms: &[BranchArm]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut repeated: Vec<&str> = Vec::new();

    for tag in arms.iter().flat_map(|arm| arm.tags()) {
        if !seen.insert(tag.as_str()) && !repeated.contains(&tag.as_str()) {
            repeated.push(tag.as_str());
        }
    }

    if !domain.is_open() {
        repeated.sort_by_key(|tag| domain.position(tag));
    }

    repeated.into_iter().map(str::to_string).collect()
}

/// Explicit tags that do not belong to the domain, in first-seen order
pub fn find_unknown_tags(domain: &BranchDomain, arms: &[BranchArm]) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();

    for tag in arms.iter().flat_map(|arm| arm.tags()) {
        if !domain.contains(tag) && !unknown.contains(tag) {
            unknown.push(tag.clone());
        }
    }

    unknown
}

/// Number of default arms
pub fn count_default_arms(arms: &[BranchArm]) -> usize {
    arms.iter().filter(|arm| arm.is_default()).count()
}

/// Check if any arm is the default arm
fn has_default_arm(arms: &[BranchArm]) -> bool {
    arms.iter().any(BranchArm::is_default)
}

/// Collect every explicitly handled tag
fn covered_tags(arms: &[BranchArm]) -> FxHashSet<&str> {
    arms.iter()
        .flat_map(|arm| arm.tags())
        .map(String::as_str)
        .collect()
}
