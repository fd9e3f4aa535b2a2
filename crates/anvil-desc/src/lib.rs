//! Shared data model for the Anvil builder generator.
//!
//! Anvil generates builder-pattern wrappers for methods and constructors.
//! This crate defines the inputs that the inference engine (`anvil-infer`)
//! and the CLI (`anvilc`) agree on:
//!
//! - [`desc`]: host type descriptions ([`desc::TypeDesc`]) and operation
//!   signatures ([`desc::MethodSig`]), as supplied by a host
//!   type-reflection facility
//! - [`style`]: field styles ([`style::FieldStyle`]) -- the start/modify/
//!   finish protocol an accumulator-based builder field follows -- plus
//!   the built-in style library
//!
//! Everything here is plain immutable data with serde derives; the JSON
//! representation doubles as the CLI's request format.

pub mod desc;
pub mod style;

pub use desc::{MethodSig, ParamSig, TypeDesc};
pub use style::{FieldStyle, StyleError};
