//! Error handling for the Crisp inference core
//!
//! This module provides structured error types for all core operations,
//! covering the full failure taxonomy of rule parsing, identifier
//! resolution, norm configuration, and evaluation. No failure is ever
//! swallowed; every error surfaces to the caller.

use thiserror::Error;

/// Error type for Crisp core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrispError {
    /// Grammar, keyword, or structure violation in raw rule text
    #[error("syntax error: {message}")]
    Syntax {
        message: String,
        rule: Option<String>,
    },

    /// Unresolved variable, term, or hedge name
    #[error("semantic error: {message}")]
    Semantic {
        message: String,
        identifier: Option<String>,
    },

    /// Unresolved norm name or missing norm operator
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        name: Option<String>,
    },

    /// Operation attempted on an unloaded rule or expression
    #[error("evaluation error: {message}")]
    Evaluation {
        message: String,
        rule: Option<String>,
    },
}

impl CrispError {
    /// Get the error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            CrispError::Syntax { .. } => "syntax",
            CrispError::Semantic { .. } => "semantic",
            CrispError::Configuration { .. } => "configuration",
            CrispError::Evaluation { .. } => "evaluation",
        }
    }

    /// Check if this error is recoverable by re-loading with corrected input
    pub fn is_recoverable(&self) -> bool {
        match self {
            CrispError::Syntax { .. } => true,
            CrispError::Semantic { .. } => true,
            CrispError::Configuration { .. } => false, // norm setup needs fixing
            CrispError::Evaluation { .. } => true,     // load the rule, then retry
        }
    }
}

/// Result type alias for core operations
pub type CrispResult<T> = Result<T, CrispError>;

/// Convenience constructors for common error scenarios
impl CrispError {
    /// Create a syntax error without rule context
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax { message: message.into(), rule: None }
    }

    /// Create a syntax error carrying the offending rule text
    pub fn syntax_in_rule(rule: &str, message: impl Into<String>) -> Self {
        Self::Syntax { message: message.into(), rule: Some(rule.to_string()) }
    }

    /// Create a semantic error for an unresolved identifier
    pub fn semantic(identifier: &str, message: impl Into<String>) -> Self {
        Self::Semantic { message: message.into(), identifier: Some(identifier.to_string()) }
    }

    /// Create a configuration error for an unresolved or missing norm
    pub fn configuration(name: &str, message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), name: Some(name.to_string()) }
    }

    /// Create an evaluation error without rule context
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation { message: message.into(), rule: None }
    }

    /// Create an evaluation error carrying the rule text
    pub fn evaluation_in_rule(rule: &str, message: impl Into<String>) -> Self {
        Self::Evaluation { message: message.into(), rule: Some(rule.to_string()) }
    }
}
