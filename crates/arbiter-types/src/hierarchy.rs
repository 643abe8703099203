//! Reference reachability
//!
//! Inheritance is not modeled here. Whether a reference type may be used
//! where another is expected is a question for the front end, which answers
//! it through [`ReferenceHierarchy`].

use rustc_hash::{FxHashMap, FxHashSet};

/// Caller-supplied reachability between named reference types
pub trait ReferenceHierarchy {
    /// Check if a value of reference type `sub` may be used where `sup` is expected
    ///
    /// Called only for distinct names; identity is handled by the caller.
    fn is_reachable(&self, sub: &str, sup: &str) -> bool;
}

/// A hierarchy in which no reference type reaches another
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHierarchy;

impl ReferenceHierarchy for NoHierarchy {
    fn is_reachable(&self, _sub: &str, _sup: &str) -> bool {
        false
    }
}

impl<F> ReferenceHierarchy for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_reachable(&self, sub: &str, sup: &str) -> bool {
        self(sub, sup)
    }
}

/// Reachability computed from declared direct supertypes
///
/// `declare("Integer", "Number")` and `declare("Number", "Object")` make
/// `Object` reachable from `Integer`.
#[derive(Debug, Clone, Default)]
pub struct DeclaredHierarchy {
    supertypes: FxHashMap<String, Vec<String>>,
}

impl DeclaredHierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `sup` as a direct supertype of `sub`
    pub fn declare(&mut self, sub: impl Into<String>, sup: impl Into<String>) -> &mut Self {
        let sup = sup.into();
        let entry = self.supertypes.entry(sub.into()).or_default();
        if !entry.contains(&sup) {
            entry.push(sup);
        }
        self
    }

    /// Builder-style [`DeclaredHierarchy::declare`]
    pub fn with(mut self, sub: impl Into<String>, sup: impl Into<String>) -> Self {
        self.declare(sub, sup);
        self
    }

    /// Direct supertypes declared for `name`
    pub fn direct_supertypes(&self, name: &str) -> &[String] {
        self.supertypes.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ReferenceHierarchy for DeclaredHierarchy {
    fn is_reachable(&self, sub: &str, sup: &str) -> bool {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut stack: Vec<&str> = vec![sub];

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            for parent in self.direct_supertypes(current) {
                if parent == sup {
                    return true;
                }
                stack.push(parent);
            }
        }

        false
    }
}
