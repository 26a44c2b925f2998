//! Error type shared by classification, compilation and strategy construction.
//!
//! Errors are `Clone + Eq` because failures are cached per type: every later
//! request for a failed type returns an identical copy of the first error.

use std::fmt;

use crate::classify::TypeShape;

/// Why a type could not be assigned a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The type declares no comparison capability at all.
    NoCapability,
    /// The type declares the sequence capability for several element types.
    AmbiguousSequence { candidates: Vec<&'static str> },
    /// A wrapper chain (`Option`, `Box`, `RefCell`) leads back to itself.
    SelfWrapping,
    /// The type's strategy builder was handed a shape it cannot build.
    ShapeMismatch { shape: TypeShape },
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::NoCapability => {
                write!(f, "type declares no recognized comparison capability")
            }
            UnsupportedReason::AmbiguousSequence { candidates } => write!(
                f,
                "sequence capability declared for {} element types ({})",
                candidates.len(),
                candidates.join(", ")
            ),
            UnsupportedReason::SelfWrapping => write!(f, "wrapper type wraps itself"),
            UnsupportedReason::ShapeMismatch { shape } => {
                write!(f, "no strategy can be built for shape {shape:?}")
            }
        }
    }
}

/// Structural comparison error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralError {
    /// Classification could not assign exactly one shape.
    UnsupportedShape {
        type_name: &'static str,
        reason: UnsupportedReason,
    },
    /// A type reachable from `type_name` could not be compiled.
    Compilation {
        type_name: &'static str,
        cause: Box<StructuralError>,
    },
    /// A constructor rejected its input.
    InvalidArgument { what: &'static str, detail: String },
}

impl StructuralError {
    pub(crate) fn unsupported(type_name: &'static str, reason: UnsupportedReason) -> Self {
        StructuralError::UnsupportedShape { type_name, reason }
    }

    pub(crate) fn invalid_argument(what: &'static str, detail: impl Into<String>) -> Self {
        StructuralError::InvalidArgument {
            what,
            detail: detail.into(),
        }
    }

    /// The innermost error of a `Compilation` chain.
    pub fn root_cause(&self) -> &StructuralError {
        match self {
            StructuralError::Compilation { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralError::UnsupportedShape { type_name, reason } => {
                write!(f, "unsupported type shape for `{type_name}`: {reason}")
            }
            StructuralError::Compilation { type_name, cause } => {
                write!(f, "cannot compile comparer for `{type_name}`: {cause}")
            }
            StructuralError::InvalidArgument { what, detail } => {
                write!(f, "invalid argument `{what}`: {detail}")
            }
        }
    }
}

impl std::error::Error for StructuralError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StructuralError::Compilation { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn root_cause_unwraps_nested_compilation() {
        let inner = StructuralError::unsupported("Opaque", UnsupportedReason::NoCapability);
        let err = StructuralError::Compilation {
            type_name: "Outer",
            cause: Box::new(StructuralError::Compilation {
                type_name: "Middle",
                cause: Box::new(inner.clone()),
            }),
        };

        assert_eq!(err.root_cause(), &inner);
    }

    #[test]
    fn display_names_type_and_reason() {
        let err = StructuralError::unsupported(
            "Pair",
            UnsupportedReason::AmbiguousSequence {
                candidates: vec!["i32", "String"],
            },
        );

        assert_eq!(
            err.to_string(),
            "unsupported type shape for `Pair`: sequence capability declared for 2 element types (i32, String)"
        );
    }

    #[test]
    fn compilation_error_exposes_source() {
        use std::error::Error;

        let err = StructuralError::Compilation {
            type_name: "Outer",
            cause: Box::new(StructuralError::invalid_argument("len", "negative")),
        };

        assert!(err.source().is_some());
        assert!(StructuralError::invalid_argument("len", "negative")
            .source()
            .is_none());
    }
}
