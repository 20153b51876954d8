//! T-norms: fuzzy conjunction and implication operators

use crate::norm::{Norm, TNorm};
use crisp_types::Scalar;

/// Godel t-norm: `min(a, b)`
#[derive(Debug, Default)]
pub struct Minimum;

impl Norm for Minimum {
    fn name(&self) -> &str {
        "Minimum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        a.min(b)
    }
}

impl TNorm for Minimum {}

/// Product t-norm: `a * b`
#[derive(Debug, Default)]
pub struct AlgebraicProduct;

impl Norm for AlgebraicProduct {
    fn name(&self) -> &str {
        "AlgebraicProduct"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        a * b
    }
}

impl TNorm for AlgebraicProduct {}

/// Lukasiewicz t-norm: `max(0, a + b - 1)`
#[derive(Debug, Default)]
pub struct BoundedDifference;

impl Norm for BoundedDifference {
    fn name(&self) -> &str {
        "BoundedDifference"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        (a + b - 1.0).max(0.0)
    }
}

impl TNorm for BoundedDifference {}

/// Drastic t-norm: `min(a, b)` when either operand is one, else zero
#[derive(Debug, Default)]
pub struct DrasticProduct;

impl Norm for DrasticProduct {
    fn name(&self) -> &str {
        "DrasticProduct"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        if a.max(b) == 1.0 { a.min(b) } else { 0.0 }
    }
}

impl TNorm for DrasticProduct {}

/// Einstein t-norm: `(a * b) / (2 - (a + b - a * b))`
#[derive(Debug, Default)]
pub struct EinsteinProduct;

impl Norm for EinsteinProduct {
    fn name(&self) -> &str {
        "EinsteinProduct"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        (a * b) / (2.0 - (a + b - a * b))
    }
}

impl TNorm for EinsteinProduct {}

/// Hamacher t-norm: `(a * b) / (a + b - a * b)`, zero when the
/// denominator vanishes
#[derive(Debug, Default)]
pub struct HamacherProduct;

impl Norm for HamacherProduct {
    fn name(&self) -> &str {
        "HamacherProduct"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        let denominator = a + b - a * b;
        if denominator == 0.0 { 0.0 } else { (a * b) / denominator }
    }
}

impl TNorm for HamacherProduct {}

/// Nilpotent minimum: `min(a, b)` when `a + b > 1`, else zero
#[derive(Debug, Default)]
pub struct NilpotentMinimum;

impl Norm for NilpotentMinimum {
    fn name(&self) -> &str {
        "NilpotentMinimum"
    }

    fn compute(&self, a: Scalar, b: Scalar) -> Scalar {
        if a + b > 1.0 { a.min(b) } else { 0.0 }
    }
}

impl TNorm for NilpotentMinimum {}
