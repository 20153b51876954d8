//! S-norms: fuzzy disjunction operators

use crate::norm::{Norm, SNorm};
use crisp_types::Scalar;

/// Godel s-norm: `max(a, b)`
#[derive(Debug, Default)]
pub struct Maximum;

impl Norm for Maximum {
    fn name(&self) -> &str {
        "Maximum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        a.max(b)
    }
}

impl SNorm for Maximum {}

/// Probabilistic sum: `a + b - a * b`
#[derive(Debug, Default)]
pub struct AlgebraicSum;

impl Norm for AlgebraicSum {
    fn name(&self) -> &str {
        "AlgebraicSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        a + b - a * b
    }
}

impl SNorm for AlgebraicSum {}

/// Lukasiewicz s-norm: `min(1, a + b)`
#[derive(Debug, Default)]
pub struct BoundedSum;

impl Norm for BoundedSum {
    fn name(&self) -> &str {
        "BoundedSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        (a + b).min(1.0)
    }
}

impl SNorm for BoundedSum {}

/// Drastic s-norm: `max(a, b)` when either operand is zero, else one
#[derive(Debug, Default)]
pub struct DrasticSum;

impl Norm for DrasticSum {
    fn name(&self) -> &str {
        "DrasticSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        if a.min(b) == 0.0 { a.max(b) } else { 1.0 }
    }
}

impl SNorm for DrasticSum {}

/// Einstein s-norm: `(a + b) / (1 + a * b)`
#[derive(Debug, Default)]
pub struct EinsteinSum;

impl Norm for EinsteinSum {
    fn name(&self) -> &str {
        "EinsteinSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        (a + b) / (1.0 + a * b)
    }
}

impl SNorm for EinsteinSum {}

/// Hamacher s-norm: `(a + b - 2ab) / (1 - ab)`, one when the
/// denominator vanishes
#[derive(Debug, Default)]
pub struct HamacherSum;

impl Norm for HamacherSum {
    fn name(&self) -> &str {
        "HamacherSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        let denominator = 1.0 - a * b;
        if denominator == 0.0 {
            1.0
        } else {
            (a + b - 2.0 * a * b) / denominator
        }
    }
}

impl SNorm for HamacherSum {}

/// Nilpotent maximum: `max(a, b)` when `a + b < 1`, else one
#[derive(Debug, Default)]
pub struct NilpotentMaximum;

impl Norm for NilpotentMaximum {
    fn name(&self) -> &str {
        "NilpotentMaximum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        if a + b < 1.0 { a.max(b) } else { 1.0 }
    }
}

impl SNorm for NilpotentMaximum {}

/// Normalized sum: `(a + b) / max(1, max(a, b))`
#[derive(Debug, Default)]
pub struct NormalizedSum;

impl Norm for NormalizedSum {
    fn name(&self) -> &str {
        "NormalizedSum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        (a + b) / 1.0_f64.max(a.max(b))
    }
}

impl SNorm for NormalizedSum {}
