//! Expression tree for rule antecedents and consequents
//!
//! Nodes form a single-owner, acyclic tree: each composite node exclusively
//! owns its children, while propositions reference variables, hedges, and
//! terms by name into externally owned tables.

use crate::complexity::Complexity;
use crisp_types::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An atomic clause of the form `variable is [hedge]* term`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposition {
    /// Name of the referenced variable
    pub variable: String,
    /// Hedge names in declared (reading) order
    pub hedges: Vec<String>,
    /// Name of the referenced term
    pub term: String,
}

impl Proposition {
    /// Create a proposition without hedges
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self { variable: variable.into(), hedges: Vec::new(), term: term.into() }
    }

    /// Create a proposition with hedges in declared order
    pub fn with_hedges(
        variable: impl Into<String>,
        hedges: Vec<String>,
        term: impl Into<String>,
    ) -> Self {
        Self { variable: variable.into(), hedges, term: term.into() }
    }

    /// Render the proposition using the given keyword set
    pub fn render(&self, dialect: &Dialect) -> String {
        let mut out = String::new();
        out.push_str(&self.variable);
        out.push(' ');
        out.push_str(&dialect.is_keyword);
        for hedge in &self.hedges {
            out.push(' ');
            out.push_str(hedge);
        }
        out.push(' ');
        out.push_str(&self.term);
        out
    }

    /// Estimated evaluation cost: one membership comparison plus one
    /// transform per hedge
    pub fn complexity(&self) -> Complexity {
        Complexity::new().comparison(1).arithmetic(self.hedges.len() as u64)
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Dialect::english()))
    }
}

/// AST node of an antecedent expression
///
/// `and`/`or` carry no precedence difference: trees are built strictly in
/// token order and parenthesization is the only way to change grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Leaf proposition
    Proposition(Proposition),

    /// Fuzzy conjunction of two subtrees
    And { left: Box<Expression>, right: Box<Expression> },

    /// Fuzzy disjunction of two subtrees
    Or { left: Box<Expression>, right: Box<Expression> },

    /// Complement of a subtree
    Not { operand: Box<Expression> },
}

impl Expression {
    /// Create a leaf proposition node
    pub fn proposition(proposition: Proposition) -> Self {
        Self::Proposition(proposition)
    }

    /// Create a conjunction node
    pub fn and(left: Expression, right: Expression) -> Self {
        Self::And { left: Box::new(left), right: Box::new(right) }
    }

    /// Create a disjunction node
    pub fn or(left: Expression, right: Expression) -> Self {
        Self::Or { left: Box::new(left), right: Box::new(right) }
    }

    /// Create a negation node
    pub fn not(operand: Expression) -> Self {
        Self::Not { operand: Box::new(operand) }
    }

    /// Whether this node is a binary connective
    pub fn is_composite(&self) -> bool {
        matches!(self, Expression::And { .. } | Expression::Or { .. })
    }

    /// Render the tree as infix text using the given keyword set.
    ///
    /// Left operands render bare: re-parsing groups left-to-right, which
    /// reproduces the same shape. Composite right operands and composite
    /// negation operands need explicit parentheses.
    pub fn render(&self, dialect: &Dialect) -> String {
        match self {
            Expression::Proposition(proposition) => proposition.render(dialect),
            Expression::And { left, right } => format!(
                "{} {} {}",
                left.render(dialect),
                dialect.and_keyword,
                Self::render_grouped(right, dialect)
            ),
            Expression::Or { left, right } => format!(
                "{} {} {}",
                left.render(dialect),
                dialect.or_keyword,
                Self::render_grouped(right, dialect)
            ),
            Expression::Not { operand } => format!(
                "{} {}",
                dialect.not_keyword,
                Self::render_grouped(operand, dialect)
            ),
        }
    }

    fn render_grouped(node: &Expression, dialect: &Dialect) -> String {
        if node.is_composite() {
            // Parentheses are standalone whitespace-delimited tokens.
            format!("( {} )", node.render(dialect))
        } else {
            node.render(dialect)
        }
    }

    /// Estimated evaluation cost of the subtree
    pub fn complexity(&self) -> Complexity {
        match self {
            Expression::Proposition(proposition) => proposition.complexity(),
            Expression::And { left, right } | Expression::Or { left, right } => {
                Complexity::new().arithmetic(1) + left.complexity() + right.complexity()
            }
            Expression::Not { operand } => {
                Complexity::new().arithmetic(1) + operand.complexity()
            }
        }
    }

    /// All propositions of the subtree in left-to-right order
    pub fn propositions(&self) -> Vec<&Proposition> {
        let mut result = Vec::new();
        self.collect_propositions(&mut result);
        result
    }

    fn collect_propositions<'a>(&'a self, out: &mut Vec<&'a Proposition>) {
        match self {
            Expression::Proposition(proposition) => out.push(proposition),
            Expression::And { left, right } | Expression::Or { left, right } => {
                left.collect_propositions(out);
                right.collect_propositions(out);
            }
            Expression::Not { operand } => operand.collect_propositions(out),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Dialect::english()))
    }
}
