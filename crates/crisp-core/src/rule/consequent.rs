//! Consequent parsing and output modification
//!
//! The consequent of a rule is an ordered list of output conclusions,
//! `variable is [hedge]* term [with weight]`, chained by the dialect's
//! `and`. Chaining is purely syntactic: fuzzy outputs are independent and
//! clause order is preserved for deterministic aggregation by the sink.

use crate::complexity::Complexity;
use crate::error::{CrispError, CrispResult};
use crate::norm::TNorm;
use crate::rule::expression::Proposition;
use crisp_types::{Dialect, RuleContext, Scalar, format_scalar, parse_scalar};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single output clause with its optional clause-local weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    /// The output proposition
    pub proposition: Proposition,
    /// Clause-local weight, `1.0` unless the grammar provided one
    pub weight: Scalar,
}

impl Conclusion {
    fn render(&self, dialect: &Dialect) -> String {
        if self.weight == 1.0 {
            self.proposition.render(dialect)
        } else {
            format!(
                "{} {} {}",
                self.proposition.render(dialect),
                dialect.with_keyword,
                format_scalar(self.weight)
            )
        }
    }
}

/// The `then` side of a rule: an optionally loaded, ordered clause list
#[derive(Debug, Default)]
pub struct Consequent {
    text: String,
    conclusions: Vec<Conclusion>,
}

impl Consequent {
    /// Create an empty, unloaded consequent
    pub fn new() -> Self {
        Self::default()
    }

    /// The text this consequent was last loaded from
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed clauses in declared order; empty while unloaded
    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    /// Whether clauses are currently held
    pub fn is_loaded(&self) -> bool {
        !self.conclusions.is_empty()
    }

    /// Discard the clauses; the stored text is kept for error reporting
    pub fn unload(&mut self) {
        self.conclusions.clear();
    }

    /// Parse `text` into clauses, resolving identifiers through `ctx`.
    /// On failure the consequent is left unloaded.
    ///
    /// A clause-local `with <weight>` is part of this grammar even though
    /// the rule-level tokenizer claims the first `with` for the rule
    /// weight; it applies when a consequent is loaded directly.
    pub fn load(&mut self, text: &str, ctx: &dyn RuleContext) -> CrispResult<()> {
        self.unload();
        self.text = text.trim().to_string();

        let dialect = ctx.dialect();
        let mut tokens = self.text.split_whitespace().peekable();
        if tokens.peek().is_none() {
            return Err(CrispError::syntax("empty consequent"));
        }

        let mut conclusions = Vec::new();
        loop {
            let variable = match tokens.next() {
                Some(token) => token,
                None => {
                    return Err(CrispError::syntax(format!(
                        "expected a variable after <{}>",
                        dialect.and_keyword
                    )));
                }
            };
            if dialect.is_reserved(variable) {
                return Err(CrispError::syntax(format!(
                    "expected a variable but found <{variable}>"
                )));
            }
            let handle = ctx.variable(variable).ok_or_else(|| {
                CrispError::semantic(
                    variable,
                    format!("variable <{variable}> not found in the context"),
                )
            })?;

            match tokens.next() {
                Some(token) if token == dialect.is_keyword => {}
                Some(token) => {
                    return Err(CrispError::syntax(format!(
                        "expected keyword <{}> after variable <{variable}> but found <{token}>",
                        dialect.is_keyword
                    )));
                }
                None => {
                    return Err(CrispError::syntax(format!(
                        "expected keyword <{}> after variable <{variable}>",
                        dialect.is_keyword
                    )));
                }
            }

            let mut hedges = Vec::new();
            let term = loop {
                let token = tokens.next().ok_or_else(|| {
                    CrispError::syntax(format!(
                        "expected a hedge or term after <{variable} {}>",
                        dialect.is_keyword
                    ))
                })?;
                if ctx.hedge(token).is_some() {
                    hedges.push(token.to_string());
                    continue;
                }
                if handle.term(token).is_some() {
                    break token;
                }
                return if dialect.is_reserved(token) {
                    Err(CrispError::syntax(format!(
                        "expected a term of variable <{variable}> but found <{token}>"
                    )))
                } else {
                    Err(CrispError::semantic(
                        token,
                        format!("term <{token}> not found in variable <{variable}>"),
                    ))
                };
            };

            let mut weight = 1.0;
            if tokens.peek().copied() == Some(dialect.with_keyword.as_str()) {
                tokens.next();
                let literal = tokens.next().ok_or_else(|| {
                    CrispError::syntax(format!(
                        "expected a numeric weight after <{}>",
                        dialect.with_keyword
                    ))
                })?;
                weight = parse_scalar(literal).map_err(|source| {
                    CrispError::syntax(format!(
                        "expected a numeric weight after <{}> but found <{literal}>: {source}",
                        dialect.with_keyword
                    ))
                })?;
            }

            conclusions.push(Conclusion {
                proposition: Proposition::with_hedges(variable, hedges, term),
                weight,
            });

            match tokens.next() {
                None => break,
                Some(token) if token == dialect.and_keyword => continue,
                Some(token) => {
                    return Err(CrispError::syntax(format!(
                        "expected keyword <{}> or end of consequent but found <{token}>",
                        dialect.and_keyword
                    )));
                }
            }
        }

        trace!(consequent = %self.text, clauses = conclusions.len(), "loaded consequent");
        self.conclusions = conclusions;
        Ok(())
    }

    /// Apply `activation_degree` to every clause in declared order and
    /// forward each contribution to the output variable's sink.
    ///
    /// Per clause: the degree is scaled by the clause weight, transformed
    /// by the hedges innermost-first, and combined through the implication
    /// operator when one is supplied. Clauses never short-circuit.
    pub fn modify(
        &self,
        ctx: &dyn RuleContext,
        activation_degree: Scalar,
        implication: Option<&dyn TNorm>,
    ) -> CrispResult<()> {
        if !self.is_loaded() {
            return Err(CrispError::evaluation(format!(
                "consequent <{}> is not loaded",
                self.text
            )));
        }

        for conclusion in &self.conclusions {
            let proposition = &conclusion.proposition;
            let variable = ctx.variable(&proposition.variable).ok_or_else(|| {
                CrispError::semantic(
                    &proposition.variable,
                    format!(
                        "variable <{}> is no longer in the context",
                        proposition.variable
                    ),
                )
            })?;
            if variable.term(&proposition.term).is_none() {
                return Err(CrispError::semantic(
                    &proposition.term,
                    format!(
                        "term <{}> is no longer in variable <{}>",
                        proposition.term, proposition.variable
                    ),
                ));
            }

            let mut degree = conclusion.weight * activation_degree;
            for name in proposition.hedges.iter().rev() {
                let hedge = ctx.hedge(name).ok_or_else(|| {
                    CrispError::semantic(
                        name,
                        format!("hedge <{name}> is no longer in the context"),
                    )
                })?;
                degree = hedge.hedge(degree);
            }
            if let Some(implication) = implication {
                degree = implication.compute(degree, 1.0);
            }

            trace!(
                variable = %proposition.variable,
                term = %proposition.term,
                degree,
                "modifying output"
            );
            variable.accumulate(&proposition.term, degree);
        }
        Ok(())
    }

    /// Estimated modification cost: weight scaling and implication per
    /// clause, plus one transform per hedge; zero while unloaded
    pub fn complexity(&self) -> Complexity {
        self.conclusions
            .iter()
            .map(|conclusion| {
                Complexity::new().arithmetic(2 + conclusion.proposition.hedges.len() as u64)
            })
            .sum()
    }

    /// Render the consequent: the clause list when loaded, the stored
    /// text otherwise
    pub fn render(&self, dialect: &Dialect) -> String {
        if self.conclusions.is_empty() {
            return self.text.clone();
        }
        self.conclusions
            .iter()
            .map(|conclusion| conclusion.render(dialect))
            .collect::<Vec<_>>()
            .join(&format!(" {} ", dialect.and_keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::norm::tnorm::Minimum;
    use crate::test_utils::TestContext;

    #[test]
    fn loads_a_single_clause() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is high", &ctx).unwrap();

        assert!(consequent.is_loaded());
        assert_eq!(consequent.conclusions().len(), 1);
        assert_eq!(consequent.conclusions()[0].proposition, Proposition::new("y", "high"));
        assert_eq!(consequent.conclusions()[0].weight, 1.0);
    }

    #[test]
    fn chains_clauses_in_declared_order() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is high and z is low", &ctx).unwrap();

        let variables: Vec<&str> = consequent
            .conclusions()
            .iter()
            .map(|c| c.proposition.variable.as_str())
            .collect();
        assert_eq!(variables, ["y", "z"]);
    }

    #[test]
    fn clause_local_weights_parse_on_direct_load() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is high with 0.5 and z is low", &ctx).unwrap();

        assert_eq!(consequent.conclusions()[0].weight, 0.5);
        assert_eq!(consequent.conclusions()[1].weight, 1.0);
    }

    #[test]
    fn empty_text_is_a_syntax_error() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        let err = consequent.load("   ", &ctx).unwrap_err();
        assert!(matches!(err, CrispError::Syntax { .. }));
    }

    #[test]
    fn modify_forwards_each_clause_to_its_sink() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is high and z is low", &ctx).unwrap();

        consequent.modify(&ctx, 0.6, Some(&Minimum)).unwrap();

        assert_eq!(ctx.accumulated("y"), vec![("high".to_string(), 0.6)]);
        assert_eq!(ctx.accumulated("z"), vec![("low".to_string(), 0.6)]);
    }

    #[test]
    fn clause_weight_scales_the_degree() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is high with 0.5", &ctx).unwrap();

        consequent.modify(&ctx, 0.6, Some(&Minimum)).unwrap();
        let contributions = ctx.accumulated("y");
        assert_eq!(contributions.len(), 1);
        assert!((contributions[0].1 - 0.3).abs() < 1e-9);
    }

    #[test]
    fn modifying_unloaded_consequent_fails() {
        let ctx = TestContext::weather();
        let consequent = Consequent::new();
        let err = consequent.modify(&ctx, 0.5, None).unwrap_err();
        assert!(matches!(err, CrispError::Evaluation { .. }));
    }

    #[test]
    fn complexity_counts_clauses_and_hedges() {
        let ctx = TestContext::weather();
        let mut consequent = Consequent::new();
        consequent.load("y is very high and z is low", &ctx).unwrap();

        let cost = consequent.complexity();
        assert_eq!(cost.arithmetic, 5); // 2 per clause + 1 hedge
        assert_eq!(cost.comparisons, 0);
    }
}
