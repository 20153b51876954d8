//! Rule composition, text tokenization, and lifecycle
//!
//! A [`Rule`] owns exactly one antecedent and one consequent, parsed from
//! text of the form `if <antecedent> then <consequent> [with <weight>]`.
//! Loading is atomic: any parsing or resolution failure forces the rule
//! back to the unloaded state before the error propagates.

/// Antecedent parsing and activation-degree evaluation
pub mod antecedent;
/// Consequent parsing and output modification
pub mod consequent;
/// Expression tree shared by antecedents and consequents
pub mod expression;

pub use antecedent::Antecedent;
pub use consequent::{Conclusion, Consequent};
pub use expression::{Expression, Proposition};

use crate::complexity::Complexity;
use crate::error::{CrispError, CrispResult};
use crate::norm::{SNorm, TNorm};
use crisp_types::{Dialect, RuleContext, Scalar, format_scalar, parse_scalar};
use std::fmt;
use tracing::{debug, instrument, trace};

/// A fuzzy rule with its lifecycle state
///
/// Lifecycle: `Unloaded -> Loaded(Deactivated) -> Loaded(Activated) -> ..`;
/// [`Rule::unload`] returns to `Unloaded` from any state. While loaded,
/// [`Rule::compute_activation_degree`] is a pure read safe to call from any
/// number of threads; [`Rule::activate`] mutates rule-local state and
/// writes through caller-owned output sinks.
#[derive(Debug)]
pub struct Rule {
    text: String,
    weight: Scalar,
    antecedent: Antecedent,
    consequent: Consequent,
    activation_degree: Scalar,
    activated: bool,
}

/// Tokenizer state for rule text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FsmState {
    None,
    If,
    Then,
    With,
    End,
}

/// Outcome of the tokenizer: antecedent text, consequent text, and weight
#[derive(Debug)]
struct RuleParts {
    antecedent: String,
    consequent: String,
    weight: Scalar,
}

/// Split comment-stripped rule text into its three parts.
///
/// Tokens are whitespace-delimited; anything from the comment marker on is
/// ignored. The `with` clause is optional and must hold exactly one finite
/// numeric literal.
fn split_rule(text: &str, dialect: &Dialect) -> CrispResult<RuleParts> {
    let source = match text.find(dialect.comment) {
        Some(offset) => &text[..offset],
        None => text,
    };

    let mut state = FsmState::None;
    let mut antecedent: Vec<&str> = Vec::new();
    let mut consequent: Vec<&str> = Vec::new();
    let mut weight: Scalar = 1.0;

    for token in source.split_whitespace() {
        match state {
            FsmState::None => {
                if token == dialect.if_keyword {
                    state = FsmState::If;
                } else {
                    return Err(CrispError::syntax_in_rule(
                        text,
                        format!(
                            "expected keyword <{}> but found <{token}>",
                            dialect.if_keyword
                        ),
                    ));
                }
            }
            FsmState::If => {
                if token == dialect.then_keyword {
                    state = FsmState::Then;
                } else {
                    antecedent.push(token);
                }
            }
            FsmState::Then => {
                if token == dialect.with_keyword {
                    state = FsmState::With;
                } else {
                    consequent.push(token);
                }
            }
            FsmState::With => {
                weight = parse_scalar(token).map_err(|source| {
                    CrispError::syntax_in_rule(
                        text,
                        format!("expected a numeric weight but found <{token}>: {source}"),
                    )
                })?;
                if !weight.is_finite() {
                    return Err(CrispError::syntax_in_rule(
                        text,
                        format!("expected a finite weight but found <{token}>"),
                    ));
                }
                state = FsmState::End;
            }
            FsmState::End => {
                return Err(CrispError::syntax_in_rule(
                    text,
                    format!("unexpected token <{token}> at the end of the rule"),
                ));
            }
        }
    }

    match state {
        FsmState::None => Err(CrispError::syntax_in_rule(text, "empty rule")),
        FsmState::If => Err(CrispError::syntax_in_rule(
            text,
            format!("keyword <{}> not found", dialect.then_keyword),
        )),
        FsmState::With => Err(CrispError::syntax_in_rule(
            text,
            format!(
                "expected a numeric weight after <{}>",
                dialect.with_keyword
            ),
        )),
        FsmState::Then | FsmState::End => Ok(RuleParts {
            antecedent: antecedent.join(" "),
            consequent: consequent.join(" "),
            weight,
        }),
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule {
    /// Create an empty, unloaded rule with the default weight
    pub fn new() -> Self {
        Self {
            text: String::new(),
            weight: 1.0,
            antecedent: Antecedent::new(),
            consequent: Consequent::new(),
            activation_degree: 0.0,
            activated: false,
        }
    }

    /// Parse `text` into a freshly loaded rule
    pub fn parse(text: &str, ctx: &dyn RuleContext) -> CrispResult<Rule> {
        let mut rule = Rule::new();
        rule.load(text, ctx)?;
        Ok(rule)
    }

    /// Verbatim source text of the rule
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rule weight, `1.0` unless a `with` clause provided one
    pub fn weight(&self) -> Scalar {
        self.weight
    }

    /// Override the rule weight
    pub fn set_weight(&mut self, weight: Scalar) {
        self.weight = weight;
    }

    /// The `if` side of the rule
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    /// The `then` side of the rule
    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Degree with which the rule last fired; `0.0` while deactivated
    pub fn activation_degree(&self) -> Scalar {
        self.activation_degree
    }

    /// Whether the rule has fired since it was last deactivated
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether both sides currently hold trees
    pub fn is_loaded(&self) -> bool {
        self.antecedent.is_loaded() && self.consequent.is_loaded()
    }

    /// Load the rule from `text`, resolving identifiers through `ctx`.
    ///
    /// The text is recorded before parsing so error messages can quote it.
    /// Loading is atomic: repeated calls first unload, and any failure
    /// performs a guaranteed state reset before the error propagates, so
    /// no partially built tree ever survives.
    #[instrument(skip(self, ctx))]
    pub fn load(&mut self, text: &str, ctx: &dyn RuleContext) -> CrispResult<()> {
        self.unload();
        self.text = text.to_string();

        match self.try_load(ctx) {
            Ok(()) => {
                debug!(weight = self.weight, "loaded rule");
                Ok(())
            }
            Err(error) => {
                self.unload();
                Err(error)
            }
        }
    }

    fn try_load(&mut self, ctx: &dyn RuleContext) -> CrispResult<()> {
        let parts = split_rule(&self.text, ctx.dialect())?;
        self.antecedent.load(&parts.antecedent, ctx)?;
        self.consequent.load(&parts.consequent, ctx)?;
        self.weight = parts.weight;
        Ok(())
    }

    /// Return to the unloaded state: deactivate and discard both trees.
    /// The stored text is kept for error reporting and rendering.
    pub fn unload(&mut self) {
        self.deactivate();
        self.antecedent.unload();
        self.consequent.unload();
        self.weight = 1.0;
    }

    /// Compute `weight * antecedent activation degree`. Pure; safe to call
    /// concurrently over immutable tree structure and stateless norms.
    pub fn compute_activation_degree(
        &self,
        ctx: &dyn RuleContext,
        conjunction: Option<&dyn TNorm>,
        disjunction: Option<&dyn SNorm>,
    ) -> CrispResult<Scalar> {
        if !self.is_loaded() {
            return Err(CrispError::evaluation_in_rule(
                &self.text,
                format!("the following rule is not loaded: {}", self.text),
            ));
        }
        Ok(self.weight * self.antecedent.activation_degree(ctx, conjunction, disjunction)?)
    }

    /// Fire the rule with `degree`.
    ///
    /// A positive degree is stored and applied to the consequent; a zero
    /// degree fires without contributing, leaving the output sinks
    /// untouched. Either way the rule is marked activated.
    pub fn activate(
        &mut self,
        ctx: &dyn RuleContext,
        degree: Scalar,
        implication: Option<&dyn TNorm>,
    ) -> CrispResult<()> {
        trace!(rule = %self.text, degree, "activating");
        if !self.is_loaded() {
            return Err(CrispError::evaluation_in_rule(
                &self.text,
                format!("the following rule is not loaded: {}", self.text),
            ));
        }
        if degree > 0.0 {
            self.activation_degree = degree;
            self.consequent.modify(ctx, degree, implication)?;
        }
        self.activated = true;
        Ok(())
    }

    /// Clear the activation state; the trees are untouched
    pub fn deactivate(&mut self) {
        self.activated = false;
        self.activation_degree = 0.0;
    }

    /// Estimated cost of [`Rule::compute_activation_degree`]: the loaded
    /// check and weight multiplication, plus the antecedent walk when
    /// loaded
    pub fn complexity_of_activation_degree(&self) -> Complexity {
        let mut result = Complexity::new().comparison(1).arithmetic(1);
        if self.is_loaded() {
            result += self.antecedent.complexity();
        }
        result
    }

    /// Estimated cost of [`Rule::activate`]: the loaded and degree checks,
    /// plus the consequent clauses when loaded
    pub fn complexity_of_activation(&self) -> Complexity {
        let mut result = Complexity::new().comparison(2);
        if self.is_loaded() {
            result += self.consequent.complexity();
        }
        result
    }

    /// Estimated cost of a full evaluation cycle of this rule
    pub fn complexity(&self) -> Complexity {
        self.complexity_of_activation_degree() + self.complexity_of_activation()
    }

    /// Canonical rendering: `if <antecedent> then <consequent> with
    /// <weight>`, with the weight deterministically formatted. Loaded
    /// sides render their trees; unloaded sides fall back to their stored
    /// text, so rendering never fails.
    pub fn render(&self, dialect: &Dialect) -> String {
        format!(
            "{} {} {} {} {} {}",
            dialect.if_keyword,
            self.antecedent.render(dialect),
            dialect.then_keyword,
            self.consequent.render(dialect),
            dialect.with_keyword,
            format_scalar(self.weight)
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Dialect::english()))
    }
}
