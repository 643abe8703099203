//! Call sites and candidate signatures

use std::fmt;

use arbiter_types::Type;

/// Parameter types of a callable
///
/// For a variable-arity list the last entry is the element type of the
/// trailing parameter, not its array type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterList {
    params: Vec<Type>,
    variadic: bool,
}

impl ParameterList {
    /// Fixed-arity parameters
    pub fn fixed(params: Vec<Type>) -> Self {
        ParameterList {
            params,
            variadic: false,
        }
    }

    /// Fixed leading parameters followed by a variable-arity `element...`
    pub fn variadic(mut leading: Vec<Type>, element: Type) -> Self {
        leading.push(element);
        ParameterList {
            params: leading,
            variadic: true,
        }
    }

    /// All declared parameter types
    pub fn params(&self) -> &[Type] {
        &self.params
    }

    /// Whether the last parameter is variable-arity
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Parameters that take exactly one argument each
    pub fn fixed_params(&self) -> &[Type] {
        if self.variadic {
            &self.params[..self.params.len() - 1]
        } else {
            &self.params
        }
    }

    /// Element type of the variable-arity parameter
    pub fn varargs_element(&self) -> Option<&Type> {
        if self.variadic {
            self.params.last()
        } else {
            None
        }
    }

    /// Number of declared parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no parameters are declared
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        if self.variadic {
            write!(f, "...")?;
        }
        Ok(())
    }
}

/// A callable the resolver may select
///
/// `payload` is opaque to the resolver and handed back on a match.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<P> {
    /// Callable name
    pub name: String,
    /// Declared parameters
    pub params: ParameterList,
    /// Caller data returned with the resolution
    pub payload: P,
    /// Whether the callable declares that it may fail (`throws`)
    pub throws: bool,
}

impl<P> Candidate<P> {
    /// Create a candidate that declares no failure capability
    pub fn new(name: impl Into<String>, params: ParameterList, payload: P) -> Self {
        Candidate {
            name: name.into(),
            params,
            payload,
            throws: false,
        }
    }

    /// Mark the candidate as declaring a failure capability
    pub fn throwing(mut self) -> Self {
        self.throws = true;
        self
    }

    /// Rendered signature: `fly(int, short)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.params)
    }
}

/// A call site to resolve
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallDescriptor {
    /// Name being called
    pub name: String,
    /// Argument types, in order
    pub args: Vec<Type>,
}

impl CallDescriptor {
    /// Create a call descriptor
    pub fn new(name: impl Into<String>, args: Vec<Type>) -> Self {
        CallDescriptor {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
