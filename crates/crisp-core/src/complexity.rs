//! Complexity estimation for rule evaluation
//!
//! A [`Complexity`] is an additive monoid of operation counts accumulated
//! while mirroring a rule's tree structure, without performing any of the
//! arithmetic it counts. Estimates feed scheduling and profiling decisions;
//! they never gate correctness.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Estimated evaluation cost expressed as operation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    /// Number of comparison operations
    pub comparisons: u64,
    /// Number of arithmetic operations
    pub arithmetic: u64,
}

impl Complexity {
    /// Create an empty estimate
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` comparison operations
    pub fn comparison(mut self, count: u64) -> Self {
        self.comparisons += count;
        self
    }

    /// Add `count` arithmetic operations
    pub fn arithmetic(mut self, count: u64) -> Self {
        self.arithmetic += count;
        self
    }

    /// Total operation count across all kinds
    pub fn total(&self) -> u64 {
        self.comparisons + self.arithmetic
    }
}

impl Add for Complexity {
    type Output = Complexity;

    fn add(self, rhs: Complexity) -> Complexity {
        Complexity {
            comparisons: self.comparisons + rhs.comparisons,
            arithmetic: self.arithmetic + rhs.arithmetic,
        }
    }
}

impl AddAssign for Complexity {
    fn add_assign(&mut self, rhs: Complexity) {
        self.comparisons += rhs.comparisons;
        self.arithmetic += rhs.arithmetic;
    }
}

impl Sum for Complexity {
    fn sum<I: Iterator<Item = Complexity>>(iter: I) -> Complexity {
        iter.fold(Complexity::new(), Add::add)
    }
}
