#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for the Crisp fuzzy-rule inference engine.
//!
//! This crate parses textual rules of the form `if <antecedent> then
//! <consequent> [with <weight>]` into expression trees and evaluates how
//! strongly each rule fires and how it modifies output variables, under a
//! pluggable fuzzy algebra of conjunction, disjunction, and implication
//! operators. Variable, term, and hedge storage stays with the caller,
//! reached through the contracts in [`crisp_types`].

/// Additive operation-count estimates for scheduling and profiling
pub mod complexity;
/// Structured error types covering the core failure taxonomy
pub mod error;
/// Norm algebra: t-norms, s-norms, and their factories
pub mod norm;
/// Rule composition, parsing, and lifecycle
pub mod rule;
/// Fixtures for tests and benches
pub mod test_utils;

pub use complexity::Complexity;
pub use error::{CrispError, CrispResult};
pub use norm::{Norm, SNorm, SNormFactory, TNorm, TNormFactory};
pub use rule::{Antecedent, Conclusion, Consequent, Expression, Proposition, Rule};

// Re-export the collaborator contracts so downstream crates need only one
// dependency.
pub use crisp_types::{
    Dialect, FuzzyVariable, Hedge, RuleContext, Scalar, Term, format_scalar, parse_scalar,
};
