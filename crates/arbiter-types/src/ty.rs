//! Core type descriptors for call and branch resolution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Primitive numeric kinds, declared in widening order
///
/// The declaration order is the widening chain: every kind widens to each
/// kind declared after it, and the number of chain steps between two kinds
/// is the difference of their [`PrimitiveKind::rank`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 16-bit character
    Char,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit IEEE 754 float
    Float,
    /// 64-bit IEEE 754 float
    Double,
}

impl PrimitiveKind {
    /// Every primitive kind, narrowest first
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Number of steps on the longest widening path (`byte` to `double`)
    pub const MAX_WIDENING_STEPS: u32 = 6;

    /// Position of this kind on the widening chain
    pub fn rank(self) -> u32 {
        self as u32
    }

    /// Chain steps needed to widen `self` into `target`
    ///
    /// Returns `None` when `target` is narrower than `self`.
    pub fn widening_steps(self, target: PrimitiveKind) -> Option<u32> {
        target.rank().checked_sub(self.rank())
    }

    /// The next wider kind, if any
    pub fn successor(self) -> Option<PrimitiveKind> {
        Self::ALL.get(self.rank() as usize + 1).copied()
    }

    /// Source spelling of the kind (`int`, `double`, ...)
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Name of the reference wrapper for this kind
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TypeError::UnknownPrimitive {
                name: s.to_string(),
            })
    }
}

/// A type descriptor as seen by the resolver and the unifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Primitive value: `int`, `short`, ...
    Primitive(PrimitiveKind),

    /// Reference wrapper of a primitive: `Integer`, `Short`, ...
    Boxed(PrimitiveKind),

    /// Named reference type: `String`, `Object`, ...
    Reference(String),

    /// Array of an element type: `int[]`
    Array(Box<Type>),

    /// The type of the `null` literal
    Null,
}

impl Type {
    /// Shorthand for a primitive descriptor
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }

    /// Shorthand for a named reference descriptor
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference(name.into())
    }

    /// Shorthand for an array descriptor
    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// Check if this is a primitive descriptor
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Check if this is a reference-like descriptor (anything `null` may flow into)
    pub fn is_reference(&self) -> bool {
        matches!(self, Type::Boxed(_) | Type::Reference(_) | Type::Array(_))
    }

    /// Check if this is the null type
    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    /// Get the primitive kind if this is a primitive
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Get the array element if this is an array
    pub fn as_array_element(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Boxing relation: the wrapper of a primitive descriptor
    pub fn boxed(&self) -> Option<Type> {
        self.as_primitive().map(Type::Boxed)
    }

    /// Boxing relation, reversed: the primitive inside a wrapper descriptor
    pub fn unboxed(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Boxed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Name used when asking a reference hierarchy about this descriptor
    ///
    /// Primitives and `null` have no reference name.
    pub fn reference_name(&self) -> Option<String> {
        match self {
            Type::Boxed(kind) => Some(kind.boxed_name().to_string()),
            Type::Reference(name) => Some(name.clone()),
            Type::Array(_) => Some(self.to_string()),
            Type::Primitive(_) | Type::Null => None,
        }
    }
}

impl From<PrimitiveKind> for Type {
    fn from(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(kind) => write!(f, "{}", kind),
            Type::Boxed(kind) => f.write_str(kind.boxed_name()),
            Type::Reference(name) => f.write_str(name),
            Type::Array(element) => write!(f, "{}[]", element),
            Type::Null => f.write_str("null"),
        }
    }
}
