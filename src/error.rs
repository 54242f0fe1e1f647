//! Error types for link template compilation and rendering.

use std::error::Error;
use std::fmt;

use crate::accessor::ArgSource;
use crate::charset::SegmentKind;

/// Errors raised while compiling a link template from method metadata.
///
/// Compilation depends only on metadata, never on argument values, so a
/// method that fails to compile fails the same way on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Neither the target type nor the method carries a mapping
    NoMapping {
        /// Name of the target type
        type_name: String,
        /// Name of the invoked method
        method: String,
    },
    /// A `{` in the mapping is never closed
    UnclosedVariable {
        /// The offending mapping
        mapping: String,
        /// Byte offset of the opening brace
        position: usize,
    },
    /// The literal `{name}` token could not be located in the mapping
    TokenNotFound {
        /// The variable name reported by the template parser
        variable: String,
        /// The mapping that was searched
        mapping: String,
    },
    /// A mapping variable is bound by neither an object argument nor a path variable
    VariableNotFound {
        /// The unmatched variable name
        variable: String,
        /// Signature of the method being compiled
        method: String,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMapping { type_name, method } => write!(
                f,
                "no mapping found for method '{method}' on '{type_name}'; annotate the type or the method with a route"
            ),
            Self::UnclosedVariable { mapping, position } => {
                write!(f, "unclosed variable at position {position} in mapping '{mapping}'")
            }
            Self::TokenNotFound { variable, mapping } => write!(
                f,
                "variable '{variable}' does not appear as a plain '{{{variable}}}' token in mapping '{mapping}'"
            ),
            Self::VariableNotFound { variable, method } => write!(
                f,
                "variable from mapping not found: '{variable}' is not bound by any argument of '{method}'"
            ),
        }
    }
}

impl Error for CompileError {}

/// Failure of the value-conversion collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Declared type the value was converted from
    pub type_name: String,
    /// Why the conversion failed
    pub reason: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert '{}' to text: {}", self.type_name, self.reason)
    }
}

impl Error for ConversionError {}

/// Errors raised while encoding a single argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The encoded value contains characters not allowed in its segment
    Rejected {
        /// The encoded value
        value: String,
        /// The segment kind it was checked against
        kind: SegmentKind,
        /// Character index of the first disallowed character
        position: usize,
        /// The first disallowed character
        character: char,
    },
    /// The value has a type that cannot be encoded into a link
    Unsupported {
        /// Name of the unsupported type
        type_name: String,
    },
    /// A collection or array contains a null element
    NullElement,
    /// The value-conversion collaborator failed
    Conversion(ConversionError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected {
                value,
                kind,
                position,
                character,
            } => write!(
                f,
                "character {character:?} at position {position} is not allowed in a {kind}: '{value}'"
            ),
            Self::Unsupported { type_name } => write!(
                f,
                "encoding links with parameters of type '{type_name}' is not supported; pass null for such arguments"
            ),
            Self::NullElement => write!(f, "collections bound into links cannot contain null elements"),
            Self::Conversion(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConversionError> for EncodeError {
    fn from(e: ConversionError) -> Self {
        Self::Conversion(e)
    }
}

/// Errors for link configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured base URI is not an absolute ASCII URI
    InvalidBaseUri {
        /// The rejected value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUri { value, reason } => {
                write!(f, "invalid base URI '{value}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors returned by [`FastLinks::link_to`](crate::FastLinks::link_to).
///
/// Every error is scoped to the single call that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The value passed in does not carry a captured invocation
    NotAnInvocation,
    /// The invoked method cannot be compiled into a link template
    Compile(CompileError),
    /// An argument value could not be encoded
    Encode {
        /// Name of the link variable or query parameter being rendered
        parameter: String,
        /// The underlying encoding failure
        source: EncodeError,
    },
    /// A path variable is null, so the arguments don't match the method
    ArgumentMismatch {
        /// The path component that could not be rendered
        component: String,
    },
    /// A template accessor points past the invocation's arguments
    AccessorOutOfRange {
        /// Which argument list was indexed
        source: ArgSource,
        /// The requested index
        index: usize,
        /// The number of available arguments
        len: usize,
    },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInvocation => write!(
                f,
                "value does not carry a captured method invocation; record the call before linking to it"
            ),
            Self::Compile(e) => write!(f, "cannot build link template: {e}"),
            Self::Encode { parameter, source } => {
                write!(f, "cannot encode '{parameter}': {source}")
            }
            Self::ArgumentMismatch { component } => write!(
                f,
                "path variable {component} is null; do the arguments match the method?"
            ),
            Self::AccessorOutOfRange { source, index, len } => write!(
                f,
                "no {source} with index {index} (only {len} available); the link template does not match the invocation"
            ),
        }
    }
}

impl Error for LinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Compile(e) => Some(e),
            Self::Encode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CompileError> for LinkError {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}
