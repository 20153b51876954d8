//! Test fixtures shared by unit tests, integration tests, and benches
//!
//! The inference core owns no variable, term, or hedge storage, so every
//! test needs a small context implementing the resolution contracts. The
//! fixtures here provide triangular terms, the classic hedges, and an
//! in-memory context with recording output sinks.

use crisp_types::{FuzzyVariable, Hedge, RuleContext, Scalar, Term};
use std::cell::{Cell, RefCell};

/// Triangular membership function with peak at `b`
#[derive(Debug, Clone)]
pub struct TriangleTerm {
    name: String,
    a: Scalar,
    b: Scalar,
    c: Scalar,
}

impl TriangleTerm {
    /// Create a triangle over `[a, c]` peaking at `b`
    pub fn new(name: &str, a: Scalar, b: Scalar, c: Scalar) -> Self {
        Self { name: name.to_string(), a, b, c }
    }
}

impl Term for TriangleTerm {
    fn name(&self) -> &str {
        &self.name
    }

    fn membership(&self, x: Scalar) -> Scalar {
        if x <= self.a || x >= self.c {
            0.0
        } else if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else if x > self.b {
            (self.c - x) / (self.c - self.b)
        } else {
            1.0
        }
    }
}

/// Intensifier hedge: squares the membership value
#[derive(Debug, Default)]
pub struct Very;

impl Hedge for Very {
    fn name(&self) -> &str {
        "very"
    }

    fn hedge(&self, x: Scalar) -> Scalar {
        x * x
    }
}

/// Diluter hedge: square root of the membership value
#[derive(Debug, Default)]
pub struct Somewhat;

impl Hedge for Somewhat {
    fn name(&self) -> &str {
        "somewhat"
    }

    fn hedge(&self, x: Scalar) -> Scalar {
        x.sqrt()
    }
}

/// A variable with settable input value and a recording output sink
pub struct TestVariable {
    name: String,
    value: Cell<Scalar>,
    terms: Vec<TriangleTerm>,
    sink: RefCell<Vec<(String, Scalar)>>,
}

impl TestVariable {
    /// Create a variable with the given terms, input value `0.0`
    pub fn new(name: &str, terms: Vec<TriangleTerm>) -> Self {
        Self {
            name: name.to_string(),
            value: Cell::new(0.0),
            terms,
            sink: RefCell::new(Vec::new()),
        }
    }

    /// Contributions accumulated by the output sink, in arrival order
    pub fn contributions(&self) -> Vec<(String, Scalar)> {
        self.sink.borrow().clone()
    }
}

impl FuzzyVariable for TestVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> Scalar {
        self.value.get()
    }

    fn term(&self, name: &str) -> Option<&dyn Term> {
        self.terms.iter().find(|t| t.name == name).map(|t| t as &dyn Term)
    }

    fn accumulate(&self, term: &str, degree: Scalar) {
        self.sink.borrow_mut().push((term.to_string(), degree));
    }
}

/// In-memory resolution context over [`TestVariable`]s and hedges
pub struct TestContext {
    variables: Vec<TestVariable>,
    hedges: Vec<Box<dyn Hedge>>,
}

impl TestContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self { variables: Vec::new(), hedges: Vec::new() }
    }

    /// The standard fixture: input `x` with terms `cold`, `windy`, and
    /// `humid`; outputs `y` and `z` with terms `low` and `high`; hedges
    /// `very` and `somewhat`. With `x = 8`, membership is `0.6` in `cold`,
    /// `0.8` in `windy`, and `0.4` in `humid`.
    pub fn weather() -> Self {
        let mut ctx = Self::new();
        ctx.add_variable(TestVariable::new(
            "x",
            vec![
                TriangleTerm::new("cold", -20.0, 0.0, 20.0),
                TriangleTerm::new("windy", 0.0, 10.0, 20.0),
                TriangleTerm::new("humid", 0.0, 20.0, 40.0),
            ],
        ));
        ctx.add_variable(TestVariable::new(
            "y",
            vec![
                TriangleTerm::new("low", 0.0, 0.25, 0.5),
                TriangleTerm::new("high", 0.5, 0.75, 1.0),
            ],
        ));
        ctx.add_variable(TestVariable::new(
            "z",
            vec![
                TriangleTerm::new("low", 0.0, 0.25, 0.5),
                TriangleTerm::new("high", 0.5, 0.75, 1.0),
            ],
        ));
        ctx.add_hedge(Box::new(Very));
        ctx.add_hedge(Box::new(Somewhat));
        ctx
    }

    /// Add a variable to the context
    pub fn add_variable(&mut self, variable: TestVariable) {
        self.variables.push(variable);
    }

    /// Add a hedge to the context
    pub fn add_hedge(&mut self, hedge: Box<dyn Hedge>) {
        self.hedges.push(hedge);
    }

    /// Set the crisp input value of a variable
    pub fn set_input(&self, name: &str, value: Scalar) {
        let variable = self
            .variables
            .iter()
            .find(|v| v.name == name)
            .unwrap_or_else(|| panic!("no variable <{name}> in the test context"));
        variable.value.set(value);
    }

    /// Contributions accumulated by the named variable's sink
    pub fn accumulated(&self, name: &str) -> Vec<(String, Scalar)> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(TestVariable::contributions)
            .unwrap_or_default()
    }

    /// Remove a variable, simulating a table that changed after load
    pub fn remove_variable(&mut self, name: &str) {
        self.variables.retain(|v| v.name != name);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleContext for TestContext {
    fn variable(&self, name: &str) -> Option<&dyn FuzzyVariable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v as &dyn FuzzyVariable)
    }

    fn hedge(&self, name: &str) -> Option<&dyn Hedge> {
        self.hedges.iter().find(|h| h.name() == name).map(|h| &**h)
    }
}
