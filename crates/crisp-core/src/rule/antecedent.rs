//! Antecedent parsing and activation-degree evaluation
//!
//! The antecedent of a rule is a fuzzy-boolean expression over propositions.
//! Parsing is recursive descent over whitespace tokens; `and` and `or` bind
//! strictly left-to-right with no precedence difference between them, so
//! parenthesization (with parens as standalone tokens) is the only way to
//! change grouping. Rule semantics depend on this ordering.

use crate::complexity::Complexity;
use crate::error::{CrispError, CrispResult};
use crate::norm::{SNorm, TNorm};
use crate::rule::expression::{Expression, Proposition};
use crisp_types::{Dialect, RuleContext, Scalar};
use tracing::trace;

/// The `if` side of a rule: an optionally loaded expression tree
#[derive(Debug, Default)]
pub struct Antecedent {
    text: String,
    root: Option<Expression>,
}

impl Antecedent {
    /// Create an empty, unloaded antecedent
    pub fn new() -> Self {
        Self::default()
    }

    /// The text this antecedent was last loaded from
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root of the expression tree, if loaded
    pub fn root(&self) -> Option<&Expression> {
        self.root.as_ref()
    }

    /// Whether a tree is currently held
    pub fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    /// Discard the tree; the stored text is kept for error reporting
    pub fn unload(&mut self) {
        self.root = None;
    }

    /// Parse `text` into an expression tree, resolving identifiers through
    /// `ctx`. On failure the antecedent is left unloaded.
    pub fn load(&mut self, text: &str, ctx: &dyn RuleContext) -> CrispResult<()> {
        self.unload();
        self.text = text.trim().to_string();

        let dialect = ctx.dialect();
        let tokens: Vec<&str> = self.text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(CrispError::syntax("empty antecedent"));
        }

        let mut parser = ExpressionParser { tokens, position: 0, ctx, dialect };
        let root = parser.parse_expression()?;
        if let Some(token) = parser.peek() {
            return Err(CrispError::syntax(format!(
                "unexpected token <{token}> after antecedent expression"
            )));
        }

        trace!(antecedent = %self.text, "loaded antecedent");
        self.root = Some(root);
        Ok(())
    }

    /// Compute the activation degree by a post-order walk of the tree.
    ///
    /// Conjunction and disjunction operators are only required when the
    /// tree actually contains `and`/`or` nodes.
    pub fn activation_degree(
        &self,
        ctx: &dyn RuleContext,
        conjunction: Option<&dyn TNorm>,
        disjunction: Option<&dyn SNorm>,
    ) -> CrispResult<Scalar> {
        let root = self.root.as_ref().ok_or_else(|| {
            CrispError::evaluation(format!("antecedent <{}> is not loaded", self.text))
        })?;
        evaluate(root, ctx, conjunction, disjunction)
    }

    /// Estimated evaluation cost; zero while unloaded
    pub fn complexity(&self) -> Complexity {
        self.root.as_ref().map(Expression::complexity).unwrap_or_default()
    }

    /// Render the antecedent: the tree in infix form when loaded, the
    /// stored text otherwise
    pub fn render(&self, dialect: &Dialect) -> String {
        match &self.root {
            Some(root) => root.render(dialect),
            None => self.text.clone(),
        }
    }
}

fn evaluate(
    node: &Expression,
    ctx: &dyn RuleContext,
    conjunction: Option<&dyn TNorm>,
    disjunction: Option<&dyn SNorm>,
) -> CrispResult<Scalar> {
    match node {
        Expression::Proposition(proposition) => evaluate_proposition(proposition, ctx),
        Expression::And { left, right } => {
            let conjunction = conjunction.ok_or_else(|| {
                CrispError::configuration("conjunction", "no conjunction operator supplied")
            })?;
            Ok(conjunction.compute(
                evaluate(left, ctx, Some(conjunction), disjunction)?,
                evaluate(right, ctx, Some(conjunction), disjunction)?,
            ))
        }
        Expression::Or { left, right } => {
            let disjunction = disjunction.ok_or_else(|| {
                CrispError::configuration("disjunction", "no disjunction operator supplied")
            })?;
            Ok(disjunction.compute(
                evaluate(left, ctx, conjunction, Some(disjunction))?,
                evaluate(right, ctx, conjunction, Some(disjunction))?,
            ))
        }
        Expression::Not { operand } => {
            Ok(1.0 - evaluate(operand, ctx, conjunction, disjunction)?)
        }
    }
}

/// Evaluate a leaf: the referenced term's membership at the variable's
/// current value, then each hedge innermost-first (the first-declared
/// hedge is applied last). Existence is re-checked, names are not
/// re-resolved to new meanings.
fn evaluate_proposition(proposition: &Proposition, ctx: &dyn RuleContext) -> CrispResult<Scalar> {
    let variable = ctx.variable(&proposition.variable).ok_or_else(|| {
        CrispError::semantic(
            &proposition.variable,
            format!("variable <{}> is no longer in the context", proposition.variable),
        )
    })?;
    let term = variable.term(&proposition.term).ok_or_else(|| {
        CrispError::semantic(
            &proposition.term,
            format!(
                "term <{}> is no longer in variable <{}>",
                proposition.term, proposition.variable
            ),
        )
    })?;

    let mut degree = term.membership(variable.value());
    for name in proposition.hedges.iter().rev() {
        let hedge = ctx.hedge(name).ok_or_else(|| {
            CrispError::semantic(name, format!("hedge <{name}> is no longer in the context"))
        })?;
        degree = hedge.hedge(degree);
    }
    Ok(degree)
}

struct ExpressionParser<'a> {
    tokens: Vec<&'a str>,
    position: usize,
    ctx: &'a dyn RuleContext,
    dialect: &'a Dialect,
}

impl<'a> ExpressionParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Expression := Term ( (and|or) Term )*, built left-associatively in
    /// token order
    fn parse_expression(&mut self) -> CrispResult<Expression> {
        let mut left = self.parse_term()?;

        while let Some(token) = self.peek() {
            if token == self.dialect.and_keyword {
                self.position += 1;
                let right = self.parse_term()?;
                left = Expression::and(left, right);
            } else if token == self.dialect.or_keyword {
                self.position += 1;
                let right = self.parse_term()?;
                left = Expression::or(left, right);
            } else {
                break;
            }
        }

        Ok(left)
    }

    /// Term := [not] ( '(' Expression ')' | Proposition )
    fn parse_term(&mut self) -> CrispResult<Expression> {
        match self.peek() {
            Some(token) if token == self.dialect.not_keyword => {
                self.position += 1;
                let operand = self.parse_term()?;
                Ok(Expression::not(operand))
            }
            Some("(") => {
                self.position += 1;
                let inner = self.parse_expression()?;
                match self.next() {
                    Some(")") => Ok(inner),
                    Some(token) => Err(CrispError::syntax(format!(
                        "expected <)> but found <{token}>"
                    ))),
                    None => Err(CrispError::syntax("expected <)> but found end of antecedent")),
                }
            }
            Some(_) => self.parse_proposition().map(Expression::proposition),
            None => Err(CrispError::syntax(
                "expected a proposition but found end of antecedent",
            )),
        }
    }

    /// Proposition := variable is hedge* term
    fn parse_proposition(&mut self) -> CrispResult<Proposition> {
        let variable = self
            .next()
            .ok_or_else(|| CrispError::syntax("expected a variable but found end of antecedent"))?;
        if self.dialect.is_reserved(variable) || variable == ")" {
            return Err(CrispError::syntax(format!(
                "expected a variable but found <{variable}>"
            )));
        }
        if self.ctx.variable(variable).is_none() {
            return Err(CrispError::semantic(
                variable,
                format!("variable <{variable}> not found in the context"),
            ));
        }

        match self.next() {
            Some(token) if token == self.dialect.is_keyword => {}
            Some(token) => {
                return Err(CrispError::syntax(format!(
                    "expected keyword <{}> after variable <{variable}> but found <{token}>",
                    self.dialect.is_keyword
                )));
            }
            None => {
                return Err(CrispError::syntax(format!(
                    "expected keyword <{}> after variable <{variable}>",
                    self.dialect.is_keyword
                )));
            }
        }

        let mut hedges = Vec::new();
        loop {
            let token = self.next().ok_or_else(|| {
                CrispError::syntax(format!(
                    "expected a hedge or term after <{variable} {}>",
                    self.dialect.is_keyword
                ))
            })?;

            // Hedges win over equally named terms, matching resolution order
            // at evaluation time.
            if self.ctx.hedge(token).is_some() {
                hedges.push(token.to_string());
                continue;
            }

            return if self
                .ctx
                .variable(variable)
                .and_then(|v| v.term(token))
                .is_some()
            {
                Ok(Proposition::with_hedges(variable, hedges, token))
            } else if self.dialect.is_reserved(token) || token == "(" || token == ")" {
                Err(CrispError::syntax(format!(
                    "expected a term of variable <{variable}> but found <{token}>"
                )))
            } else {
                Err(CrispError::semantic(
                    token,
                    format!("term <{token}> not found in variable <{variable}>"),
                ))
            };
        }
    }
}
