//! Conversion ranking
//!
//! Ranks the implicit conversion from one descriptor to another. Lower
//! costs are preferred; `None` means the conversion does not exist.

use std::fmt;

use crate::config::ConversionCosts;
use crate::hierarchy::{NoHierarchy, ReferenceHierarchy};
use crate::ty::{PrimitiveKind, Type};

static NO_HIERARCHY: NoHierarchy = NoHierarchy;

/// Kind of an implicit conversion, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConversionKind {
    /// Same descriptor
    Identity,
    /// Primitive widening along the chain, or reference widening
    Widening,
    /// Primitive to its wrapper or back
    Boxing,
    /// Widening combined with a boxing step (`int` to `Long`, `Integer` to `long`)
    WideningThenBoxing,
}

impl ConversionKind {
    /// Check if the conversion is allowed in a strict (no boxing) context
    pub fn is_strict(self) -> bool {
        matches!(self, ConversionKind::Identity | ConversionKind::Widening)
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionKind::Identity => f.write_str("identity"),
            ConversionKind::Widening => f.write_str("widening"),
            ConversionKind::Boxing => f.write_str("boxing"),
            ConversionKind::WideningThenBoxing => f.write_str("widening and boxing"),
        }
    }
}

/// A ranked conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conversion {
    /// Conversion kind
    pub kind: ConversionKind,
    /// Cost used to order candidates within one resolution pass
    pub cost: u32,
}

impl Conversion {
    /// The zero-cost identity conversion
    pub const IDENTITY: Conversion = Conversion {
        kind: ConversionKind::Identity,
        cost: 0,
    };

    fn new(kind: ConversionKind, cost: u32) -> Self {
        Conversion { kind, cost }
    }
}

/// Context for ranking conversions
///
/// Holds the cost settings and the reachability predicate for reference
/// types. It is cheap to copy and never mutated.
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    costs: ConversionCosts,
    hierarchy: &'a (dyn ReferenceHierarchy + Sync),
}

impl fmt::Debug for ConversionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionContext")
            .field("costs", &self.costs)
            .finish_non_exhaustive()
    }
}

impl Default for ConversionContext<'static> {
    fn default() -> Self {
        ConversionContext::new(ConversionCosts::default())
    }
}

impl ConversionContext<'static> {
    /// Create a context in which no reference type reaches another
    pub fn new(costs: ConversionCosts) -> Self {
        ConversionContext {
            costs,
            hierarchy: &NO_HIERARCHY,
        }
    }
}

impl<'a> ConversionContext<'a> {
    /// Create a context that consults `hierarchy` for reference widening
    pub fn with_hierarchy(
        costs: ConversionCosts,
        hierarchy: &'a (dyn ReferenceHierarchy + Sync),
    ) -> Self {
        ConversionContext { costs, hierarchy }
    }

    /// Cost settings in use
    pub fn costs(&self) -> &ConversionCosts {
        &self.costs
    }

    /// Rank the implicit conversion from `from` to `to`
    ///
    /// Returns `None` when the conversion is not possible.
    pub fn rank(&self, from: &Type, to: &Type) -> Option<Conversion> {
        if from == to {
            return Some(Conversion::IDENTITY);
        }

        let boxing = self.costs.boxing;

        match (from, to) {
            (Type::Primitive(source), Type::Primitive(target)) => source
                .widening_steps(*target)
                .map(|steps| Conversion::new(ConversionKind::Widening, steps)),

            // Null never becomes a primitive, but flows into any reference
            (Type::Null, Type::Primitive(_)) => None,
            (Type::Null, _) => Some(Conversion::new(
                ConversionKind::Widening,
                self.costs.null_to_reference,
            )),

            (Type::Primitive(source), Type::Boxed(target)) => {
                let steps = source.widening_steps(*target)?;
                Some(self.boxing_conversion(steps))
            }

            (Type::Boxed(source), Type::Primitive(target)) => {
                let steps = source.widening_steps(*target)?;
                Some(self.boxing_conversion(steps))
            }

            // Wrapper spelled as a named reference (`int` to `Integer`)
            (Type::Primitive(source), Type::Reference(target))
                if source.boxed_name() == target =>
            {
                Some(Conversion::new(ConversionKind::Boxing, boxing))
            }

            // Box, then widen the wrapper to a declared supertype (`int` to `Object`)
            (Type::Primitive(source), Type::Reference(target)) => {
                if self.hierarchy.is_reachable(source.boxed_name(), target) {
                    Some(Conversion::new(
                        ConversionKind::Boxing,
                        boxing.saturating_add(self.costs.reference_widening),
                    ))
                } else {
                    None
                }
            }

            (_, Type::Reference(target)) => {
                let source = from.reference_name()?;
                if source == *target {
                    return Some(Conversion::IDENTITY);
                }
                if self.hierarchy.is_reachable(&source, target) {
                    Some(Conversion::new(
                        ConversionKind::Widening,
                        self.costs.reference_widening,
                    ))
                } else {
                    None
                }
            }

            _ => None,
        }
    }

    /// Check if `from` converts to `to` in any context
    pub fn is_convertible(&self, from: &Type, to: &Type) -> bool {
        self.rank(from, to).is_some()
    }

    /// Widening join of two primitive kinds
    pub fn join(&self, a: PrimitiveKind, b: PrimitiveKind) -> PrimitiveKind {
        a.max(b)
    }

    fn boxing_conversion(&self, steps: u32) -> Conversion {
        if steps == 0 {
            Conversion::new(ConversionKind::Boxing, self.costs.boxing)
        } else {
            Conversion::new(
                ConversionKind::WideningThenBoxing,
                steps.saturating_add(self.costs.boxing),
            )
        }
    }
}
