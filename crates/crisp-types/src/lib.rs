//! Crisp Types
//!
//! This crate defines the types and collaborator contracts shared across the
//! Crisp ecosystem (currently `crisp-core`). It provides the engine-wide
//! `Scalar` type, the resolution contracts consumed during rule parsing and
//! evaluation, and the configurable rule dialect, so that the inference core
//! never owns variable, term, or hedge storage.

#![deny(warnings)]
#![deny(missing_docs)]

mod types;

pub use types::{
    Dialect, FuzzyVariable, Hedge, RuleContext, Scalar, Term, format_scalar, parse_scalar,
};
