use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;
use std::sync::LazyLock;

/// Scalar type used for membership values, weights, and activation degrees.
pub type Scalar = f64;

/// Parse a scalar using the engine-wide numeric grammar.
///
/// Delegates to `f64::from_str`, which also accepts `nan`, `inf` and
/// `-inf`; callers that require a finite value check the result themselves.
pub fn parse_scalar(token: &str) -> Result<Scalar, ParseFloatError> {
    token.parse::<Scalar>()
}

/// Render a scalar with the engine-wide deterministic formatting
/// (three decimals), used wherever rules are rendered back to text.
pub fn format_scalar(value: Scalar) -> String {
    format!("{value:.3}")
}

/// A linguistic term of a fuzzy variable.
///
/// Terms are owned by the caller's variable tables; the inference core only
/// references them by name and queries their membership function.
pub trait Term {
    /// Name of the term as it appears in rule text.
    fn name(&self) -> &str;

    /// Membership degree of `x` in this term, conventionally in `[0, 1]`.
    fn membership(&self, x: Scalar) -> Scalar;
}

/// A named scalar-to-scalar transform applied to membership values
/// (e.g. an intensifier such as `very`).
///
/// Only the registry lookup contract lives here; concrete hedge
/// implementations are supplied by the caller.
pub trait Hedge: Send + Sync {
    /// Name of the hedge as it appears in rule text.
    fn name(&self) -> &str;

    /// Transform the membership value `x`.
    fn hedge(&self, x: Scalar) -> Scalar;
}

/// A fuzzy variable handle resolved through a [`RuleContext`].
///
/// For input variables the core reads `value()` and term memberships; for
/// output variables it additionally forwards modifications through
/// [`FuzzyVariable::accumulate`]. The aggregate behind `accumulate` is owned
/// by the variable, not by the inference core: implementors pick their own
/// interior mutability, and concurrent writers targeting the same variable
/// must be serialized by the caller.
pub trait FuzzyVariable {
    /// Name of the variable as it appears in rule text.
    fn name(&self) -> &str;

    /// Current crisp input value of the variable.
    fn value(&self) -> Scalar;

    /// Look up a term of this variable by exact name.
    fn term(&self, name: &str) -> Option<&dyn Term>;

    /// Accumulate an output contribution of `degree` for `term`.
    fn accumulate(&self, term: &str, degree: Scalar);
}

/// Resolution context consumed while parsing and evaluating rules.
///
/// All lookups are exact string matches into externally owned tables; a
/// `None` means "unknown" and surfaces as a semantic error in the core.
pub trait RuleContext {
    /// Resolve a variable by name.
    fn variable(&self, name: &str) -> Option<&dyn FuzzyVariable>;

    /// Resolve a hedge by name.
    fn hedge(&self, name: &str) -> Option<&dyn Hedge>;

    /// Keyword set used when parsing and rendering rule text.
    fn dialect(&self) -> &Dialect {
        &ENGLISH
    }
}

static ENGLISH: LazyLock<Dialect> = LazyLock::new(Dialect::default);

/// Configurable keyword set of the rule grammar.
///
/// Keywords are plain tokens compared by exact match; the default is the
/// English set (`if .. then .. with`, connectives `and`/`or`/`not`/`is`,
/// comments introduced by `#`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Keyword opening the antecedent.
    pub if_keyword: String,
    /// Keyword separating antecedent from consequent.
    pub then_keyword: String,
    /// Keyword introducing a weight.
    pub with_keyword: String,
    /// Conjunction keyword.
    pub and_keyword: String,
    /// Disjunction keyword.
    pub or_keyword: String,
    /// Negation keyword.
    pub not_keyword: String,
    /// Proposition linking keyword (`variable is term`).
    pub is_keyword: String,
    /// Comment marker; the marker and everything after it is ignored.
    pub comment: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            if_keyword: "if".to_string(),
            then_keyword: "then".to_string(),
            with_keyword: "with".to_string(),
            and_keyword: "and".to_string(),
            or_keyword: "or".to_string(),
            not_keyword: "not".to_string(),
            is_keyword: "is".to_string(),
            comment: '#',
        }
    }
}

impl Dialect {
    /// The default English keyword set.
    pub fn english() -> &'static Dialect {
        &ENGLISH
    }

    /// Whether `token` is one of the connective or structural keywords
    /// (`and`, `or`, `not`, `is`, `if`, `then`, `with`).
    pub fn is_reserved(&self, token: &str) -> bool {
        token == self.if_keyword
            || token == self.then_keyword
            || token == self.with_keyword
            || token == self.and_keyword
            || token == self.or_keyword
            || token == self.not_keyword
            || token == self.is_keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_parsing_follows_float_grammar() {
        assert_eq!(parse_scalar("0.8").unwrap(), 0.8);
        assert_eq!(parse_scalar("-2").unwrap(), -2.0);
        assert!(parse_scalar("inf").unwrap().is_infinite());
        assert!(parse_scalar("nan").unwrap().is_nan());
        assert!(parse_scalar("fast").is_err());
    }

    #[test]
    fn scalar_formatting_is_deterministic() {
        assert_eq!(format_scalar(1.0), "1.000");
        assert_eq!(format_scalar(0.8), "0.800");
        assert_eq!(format_scalar(-0.25), "-0.250");
    }

    #[test]
    fn default_dialect_is_english() {
        let dialect = Dialect::default();
        assert_eq!(dialect.if_keyword, "if");
        assert_eq!(dialect.comment, '#');
        assert!(dialect.is_reserved("and"));
        assert!(!dialect.is_reserved("temperature"));
    }
}
