//! Anvil's inference engine: unification over symbolic type expressions.
//!
//! The builder generator needs to know, for each accumulator-based field,
//! what type the accumulator must have given the style's `start`,
//! modifier, and `finish` signatures and the type the wrapped method
//! expects. Any of those operations may declare its own generic type
//! parameters, so the answer is the solution of a small system of
//! type-equality constraints.
//!
//! # Architecture
//!
//! - [`term`]: the term algebra (atoms, variables, sequences) and
//!   immutable substitutions with fixpoint resolution
//! - [`unify`]: the structural unification solver
//! - [`registry`]: per-inference interning of type text to atoms, and
//!   encoding/decoding between host type descriptions and terms
//! - [`infer`]: the constraint systems for field and modifier inference
//! - [`error`]: hard-error types (malformed style, unsupported
//!   description, cyclic substitution)
//!
//! The engine is purely functional over immutable inputs; every inference
//! allocates its own registry and fresh variables, so independent fields
//! and modifiers can be inferred in any order, including in parallel.

pub mod error;
pub mod infer;
pub mod registry;
pub mod term;
pub mod unify;

use anvil_desc::{FieldStyle, TypeDesc};

use crate::error::InferError;
use crate::infer::TypeInference;

/// The outcome of an inference attempt.
///
/// `Indeterminate` means the constraint system was unsatisfiable or left
/// the answer open -- an ordinary, per-field (or per-modifier) outcome the
/// caller may skip over, explicitly distinct both from a resolved type and
/// from a hard [`InferError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inference<T> {
    Resolved(T),
    Indeterminate,
}

impl<T> Inference<T> {
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Inference::Indeterminate)
    }

    /// The resolved value, or `None` if inference was indeterminate.
    pub fn resolved(self) -> Option<T> {
        match self {
            Inference::Resolved(value) => Some(value),
            Inference::Indeterminate => None,
        }
    }
}

/// Infer the accumulator field type for one style and consumer parameter
/// type.
///
/// This is the main entry point of the engine. The returned
/// [`TypeInference`] exposes the field's rendered type and per-modifier
/// parameter type inference.
pub fn infer_field(
    style: &FieldStyle,
    consumer: &TypeDesc,
) -> Result<Inference<TypeInference>, InferError> {
    TypeInference::for_field(style, consumer)
}
