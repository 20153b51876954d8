//! Name-to-constructor registries for norms
//!
//! Each factory maps a case-sensitive name to a constructor and hands an
//! owned norm instance to the caller. Callers may register additional
//! constructors; an unregistered name is a configuration error.

use crate::error::{CrispError, CrispResult};
use crate::norm::{SNorm, TNorm, snorm, tnorm};
use std::collections::HashMap;

type TNormConstructor = fn() -> Box<dyn TNorm>;
type SNormConstructor = fn() -> Box<dyn SNorm>;

/// Registry of t-norm constructors
pub struct TNormFactory {
    constructors: HashMap<String, TNormConstructor>,
}

impl Default for TNormFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TNormFactory {
    /// Create a factory with the built-in t-norms registered
    pub fn new() -> Self {
        let mut factory = Self { constructors: HashMap::new() };
        factory.register("Minimum", || Box::new(tnorm::Minimum));
        factory.register("AlgebraicProduct", || Box::new(tnorm::AlgebraicProduct));
        factory.register("BoundedDifference", || Box::new(tnorm::BoundedDifference));
        factory.register("DrasticProduct", || Box::new(tnorm::DrasticProduct));
        factory.register("EinsteinProduct", || Box::new(tnorm::EinsteinProduct));
        factory.register("HamacherProduct", || Box::new(tnorm::HamacherProduct));
        factory.register("NilpotentMinimum", || Box::new(tnorm::NilpotentMinimum));
        factory
    }

    /// Register a constructor under `name`, replacing any previous entry
    pub fn register(&mut self, name: &str, constructor: TNormConstructor) {
        self.constructors.insert(name.to_string(), constructor);
    }

    /// Construct the t-norm registered under `name`
    pub fn create(&self, name: &str) -> CrispResult<Box<dyn TNorm>> {
        match self.constructors.get(name) {
            Some(constructor) => Ok(constructor()),
            None => Err(CrispError::configuration(
                name,
                format!("t-norm <{name}> is not registered"),
            )),
        }
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Registry of s-norm constructors
pub struct SNormFactory {
    constructors: HashMap<String, SNormConstructor>,
}

impl Default for SNormFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SNormFactory {
    /// Create a factory with the built-in s-norms registered
    pub fn new() -> Self {
        let mut factory = Self { constructors: HashMap::new() };
        factory.register("Maximum", || Box::new(snorm::Maximum));
        factory.register("AlgebraicSum", || Box::new(snorm::AlgebraicSum));
        factory.register("BoundedSum", || Box::new(snorm::BoundedSum));
        factory.register("DrasticSum", || Box::new(snorm::DrasticSum));
        factory.register("EinsteinSum", || Box::new(snorm::EinsteinSum));
        factory.register("HamacherSum", || Box::new(snorm::HamacherSum));
        factory.register("NilpotentMaximum", || Box::new(snorm::NilpotentMaximum));
        factory.register("NormalizedSum", || Box::new(snorm::NormalizedSum));
        factory
    }

    /// Register a constructor under `name`, replacing any previous entry
    pub fn register(&mut self, name: &str, constructor: SNormConstructor) {
        self.constructors.insert(name.to_string(), constructor);
    }

    /// Construct the s-norm registered under `name`
    pub fn create(&self, name: &str) -> CrispResult<Box<dyn SNorm>> {
        match self.constructors.get(name) {
            Some(constructor) => Ok(constructor()),
            None => Err(CrispError::configuration(
                name,
                format!("s-norm <{name}> is not registered"),
            )),
        }
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_registered_tnorm() {
        let factory = TNormFactory::new();
        let norm = factory.create("Minimum").unwrap();
        assert_eq!(norm.name(), "Minimum");
        assert_eq!(norm.compute(0.2, 0.9), 0.2);
    }

    #[test]
    fn unknown_name_is_a_configuration_error() {
        let factory = SNormFactory::new();
        let err = factory.create("minimum").unwrap_err();
        assert!(matches!(err, CrispError::Configuration { .. }));
    }

    #[test]
    fn names_are_case_sensitive_and_sorted() {
        let factory = TNormFactory::new();
        assert!(factory.create("Minimum").is_ok());
        assert!(factory.create("MINIMUM").is_err());

        let names = factory.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"AlgebraicProduct"));
    }

    #[test]
    fn callers_can_register_custom_norms() {
        let mut factory = TNormFactory::new();
        factory.register("First", || {
            #[derive(Debug, Default)]
            struct First;
            impl crate::norm::Norm for First {
                fn name(&self) -> &str {
                    "First"
                }
                fn compute(&self, a: f64, _b: f64) -> f64 {
                    a
                }
            }
            impl crate::norm::TNorm for First {}
            Box::new(First)
        });
        assert_eq!(factory.create("First").unwrap().compute(0.3, 0.9), 0.3);
    }
}
