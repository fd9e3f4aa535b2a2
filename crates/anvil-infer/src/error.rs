//! Inference error types.
//!
//! Only genuinely exceptional conditions are errors here. An
//! unsatisfiable constraint system is not one of them: unification
//! mismatch surfaces as [`Inference::Indeterminate`](crate::Inference)
//! and never as an `InferError`.

use std::fmt;

use serde::Serialize;

use anvil_desc::StyleError;

/// A hard error during field or modifier inference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum InferError {
    /// The style definition is structurally malformed (missing or
    /// wrong-arity operation). Detected before any unification.
    MalformedStyle(StyleError),
    /// An encode request met a type description kind outside the
    /// supported set (wildcard or intersection). The builder for this
    /// field cannot be generated.
    UnsupportedDescription { description: String },
    /// A substitution bound a variable to a term containing itself, so
    /// resolution cannot reach a fixpoint.
    CyclicSubstitution { term: String },
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::MalformedStyle(err) => write!(f, "{}", err),
            InferError::UnsupportedDescription { description } => {
                write!(
                    f,
                    "type description is not supported for builder generation: `{}`",
                    description
                )
            }
            InferError::CyclicSubstitution { term } => {
                write!(
                    f,
                    "cyclic substitution: resolving `{}` does not reach a fixpoint",
                    term
                )
            }
        }
    }
}

impl std::error::Error for InferError {}

impl From<StyleError> for InferError {
    fn from(err: StyleError) -> InferError {
        InferError::MalformedStyle(err)
    }
}
