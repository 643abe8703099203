//! Signature resolution
//!
//! Selects the candidate signature a call binds to. Candidates are tried in
//! three passes, and the first pass with any applicable candidate decides:
//!
//! 1. **Strict**: fixed arity, identity and widening only
//! 2. **Loose**: fixed arity, boxing allowed
//! 3. **Variable arity**: trailing arguments collected into the varargs
//!    parameter, or a single array passed through
//!
//! Within a pass the cheapest candidate wins; a tie at the minimum cost is
//! ambiguous. Later passes never run once an earlier one found a match, so
//! exact and widening matches always beat boxing, which always beats
//! variable arity.

use std::fmt;

use arbiter_types::{Conversion, ConversionContext, Type};
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::signature::{CallDescriptor, Candidate};

/// Resolution pass that selected a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Fixed arity, identity and widening conversions
    Strict,
    /// Fixed arity, boxing conversions allowed
    Loose,
    /// Variable-arity candidates
    VariableArity,
}

impl Phase {
    /// All passes, in priority order
    pub const ALL: [Phase; 3] = [Phase::Strict, Phase::Loose, Phase::VariableArity];

    fn allows(self, conversion: &Conversion) -> bool {
        match self {
            Phase::Strict => conversion.kind.is_strict(),
            Phase::Loose | Phase::VariableArity => true,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Strict => f.write_str("strict"),
            Phase::Loose => f.write_str("loose"),
            Phase::VariableArity => f.write_str("variable arity"),
        }
    }
}

/// How trailing arguments were bound to a variable-arity parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarargsBinding {
    /// `count` trailing arguments collected into the parameter (possibly zero)
    Spread {
        /// Number of trailing arguments
        count: usize,
    },
    /// A single array argument passed directly
    Array,
}

/// A successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'c, P> {
    /// Index of the selected candidate in the supplied slice
    pub index: usize,
    /// The selected candidate
    pub candidate: &'c Candidate<P>,
    /// Pass that selected it
    pub phase: Phase,
    /// Total cost within that pass
    pub cost: u32,
    /// Conversion applied to each argument, in argument order
    pub conversions: Vec<Conversion>,
    /// Varargs binding, for variable-arity selections
    pub varargs: Option<VarargsBinding>,
}

impl<'c, P> Resolution<'c, P> {
    /// The payload of the selected candidate
    pub fn payload(&self) -> &'c P {
        &self.candidate.payload
    }
}

/// An applicable candidate within one pass
struct Applicable {
    index: usize,
    cost: u32,
    conversions: Vec<Conversion>,
    varargs: Option<VarargsBinding>,
}

/// Resolver for calls against candidate signatures
///
/// Holds no state between calls; one resolver can serve any number of
/// independent resolutions, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SignatureResolver<'a> {
    conv: ConversionContext<'a>,
}

impl Default for SignatureResolver<'static> {
    fn default() -> Self {
        SignatureResolver::new(ConversionContext::default())
    }
}

impl<'a> SignatureResolver<'a> {
    /// Create a resolver using the given conversion context
    pub fn new(conv: ConversionContext<'a>) -> Self {
        SignatureResolver { conv }
    }

    /// Resolve `call` against `candidates`
    ///
    /// Only candidates whose name matches the call are considered.
    pub fn resolve<'c, P>(
        &self,
        call: &CallDescriptor,
        candidates: &'c [Candidate<P>],
    ) -> Result<Resolution<'c, P>, ResolveError> {
        let named: Vec<(usize, &Candidate<P>)> = candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.name == call.name)
            .collect();

        debug!(
            target: "arbiter.resolve",
            call = %call,
            candidates = named.len(),
            "resolving call"
        );

        for phase in Phase::ALL {
            let applicable: Vec<Applicable> = named
                .iter()
                .filter_map(|&(index, candidate)| {
                    let found = self.applicable(phase, index, candidate, &call.args);
                    trace!(
                        target: "arbiter.resolve",
                        %phase,
                        signature = %candidate.signature(),
                        applicable = found.is_some(),
                        "checked candidate"
                    );
                    found
                })
                .collect();

            if applicable.is_empty() {
                continue;
            }

            return self.select(call, candidates, phase, applicable);
        }

        debug!(target: "arbiter.resolve", call = %call, "no applicable signature");
        Err(ResolveError::NoMatch {
            call: call.to_string(),
            args: call.args.clone(),
        })
    }

    /// Pick the unique cheapest candidate of a pass
    fn select<'c, P>(
        &self,
        call: &CallDescriptor,
        candidates: &'c [Candidate<P>],
        phase: Phase,
        applicable: Vec<Applicable>,
    ) -> Result<Resolution<'c, P>, ResolveError> {
        let min_cost = applicable.iter().map(|a| a.cost).min().unwrap_or(0);
        let mut best: Vec<Applicable> = applicable
            .into_iter()
            .filter(|a| a.cost == min_cost)
            .collect();

        if best.len() > 1 {
            let indices: Vec<usize> = best.iter().map(|a| a.index).collect();
            let signatures = indices
                .iter()
                .map(|&index| candidates[index].signature())
                .collect();
            debug!(
                target: "arbiter.resolve",
                call = %call,
                %phase,
                cost = min_cost,
                tied = indices.len(),
                "ambiguous call"
            );
            return Err(ResolveError::Ambiguous {
                call: call.to_string(),
                candidates: indices,
                signatures,
            });
        }

        let Some(chosen) = best.pop() else {
            return Err(ResolveError::NoMatch {
                call: call.to_string(),
                args: call.args.clone(),
            });
        };

        let candidate = &candidates[chosen.index];
        debug!(
            target: "arbiter.resolve",
            call = %call,
            %phase,
            cost = chosen.cost,
            signature = %candidate.signature(),
            "resolved call"
        );

        Ok(Resolution {
            index: chosen.index,
            candidate,
            phase,
            cost: chosen.cost,
            conversions: chosen.conversions,
            varargs: chosen.varargs,
        })
    }

    fn applicable<P>(
        &self,
        phase: Phase,
        index: usize,
        candidate: &Candidate<P>,
        args: &[Type],
    ) -> Option<Applicable> {
        match phase {
            Phase::Strict | Phase::Loose => {
                if candidate.params.is_variadic() || candidate.params.len() != args.len() {
                    return None;
                }
                let conversions = self.convert_all(phase, args, candidate.params.params())?;
                Some(Applicable {
                    index,
                    cost: total_cost(&conversions),
                    conversions,
                    varargs: None,
                })
            }
            Phase::VariableArity => self.applicable_variadic(index, candidate, args),
        }
    }

    fn applicable_variadic<P>(
        &self,
        index: usize,
        candidate: &Candidate<P>,
        args: &[Type],
    ) -> Option<Applicable> {
        let element = candidate.params.varargs_element()?;
        let fixed = candidate.params.fixed_params();
        if args.len() < fixed.len() {
            return None;
        }

        let (leading, trailing) = args.split_at(fixed.len());
        let mut conversions = self.convert_all(Phase::VariableArity, leading, fixed)?;
        let cost = total_cost(&conversions).saturating_add(self.conv.costs().varargs_penalty);

        let passes_array = match trailing {
            [single] => single.as_array_element() == Some(element),
            _ => false,
        };

        let binding = if passes_array {
            conversions.push(Conversion::IDENTITY);
            VarargsBinding::Array
        } else {
            for arg in trailing {
                conversions.push(self.conv.rank(arg, element)?);
            }
            VarargsBinding::Spread {
                count: trailing.len(),
            }
        };

        Some(Applicable {
            index,
            cost,
            conversions,
            varargs: Some(binding),
        })
    }

    /// Convert each argument to its parameter, as allowed by `phase`
    fn convert_all(&self, phase: Phase, args: &[Type], params: &[Type]) -> Option<Vec<Conversion>> {
        args.iter()
            .zip(params)
            .map(|(arg, param)| {
                self.conv
                    .rank(arg, param)
                    .filter(|conversion| phase.allows(conversion))
            })
            .collect()
    }
}

fn total_cost(conversions: &[Conversion]) -> u32 {
    conversions
        .iter()
        .fold(0u32, |total, c| total.saturating_add(c.cost))
}
