//! Fuzzy norm algebra
//!
//! A norm is a stateless, deterministic binary operator over the
//! conventional `[0, 1]` domain. Conjunction and implication use t-norms,
//! disjunction uses s-norms; the two roles share the same abstract shape but
//! are never interchangeable, which the marker traits encode. Well-behaved
//! inputs are the caller's responsibility; norms do not validate range.

pub mod factory;
pub mod snorm;
pub mod tnorm;

pub use factory::{SNormFactory, TNormFactory};
pub use snorm::{
    AlgebraicSum, BoundedSum, DrasticSum, EinsteinSum, HamacherSum, Maximum, NilpotentMaximum,
    NormalizedSum,
};
pub use tnorm::{
    AlgebraicProduct, BoundedDifference, DrasticProduct, EinsteinProduct, HamacherProduct,
    Minimum, NilpotentMinimum,
};

use crisp_types::Scalar;

/// A pure binary scalar operator over the fuzzy domain.
///
/// Norms carry no mutable state and may be shared across arbitrarily many
/// concurrent evaluations.
pub trait Norm: std::fmt::Debug + Send + Sync {
    /// Registered name of the norm.
    fn name(&self) -> &str;

    /// Apply the operator to `a` and `b`.
    fn compute(&self, a: Scalar, b: Scalar) -> Scalar;
}

/// Marker for norms usable as conjunction or implication operators.
pub trait TNorm: Norm {}

/// Marker for norms usable as disjunction operators.
pub trait SNorm: Norm {}
