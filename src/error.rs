//! Error types for the referee.
//!
//! All errors are strongly typed using thiserror. Evaluation itself can only
//! fail with [`RefereeError::InvalidConstraints`]; the remaining variants
//! belong to rule table authoring, loading, and configuration.

use thiserror::Error;

use crate::constraint::Dimension;

/// Reasons a candidate constraint set is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Constraint set must be a record of the four dimensions")]
    NotARecord,

    #[error("Constraint document is not valid JSON: {message}")]
    Malformed {
        message: String,
    },

    #[error("Required dimension '{dimension}' is missing")]
    MissingDimension {
        dimension: Dimension,
    },

    #[error("Value '{value}' is not a valid {dimension}")]
    UnknownValue {
        dimension: Dimension,
        value: String,
    },
}

impl ValidationError {
    /// The dimension that failed validation, if the failure names one.
    #[must_use]
    pub const fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::NotARecord | Self::Malformed { .. } => None,
            Self::MissingDimension { dimension } | Self::UnknownValue { dimension, .. } => {
                Some(*dimension)
            }
        }
    }
}

/// Errors raised while building or loading a rule table.
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("Rule at position {index} has an empty id")]
    EmptyRuleId {
        index: usize,
    },

    #[error("Rule id '{id}' is declared more than once")]
    DuplicateRuleId {
        id: String,
    },

    #[error("Rule '{id}' has an empty description")]
    EmptyDescription {
        id: String,
    },

    #[error("Rule '{id}' constrains dimension '{dimension}' more than once")]
    DuplicateDimension {
        id: String,
        dimension: Dimension,
    },

    #[error("{count} rule statement(s) use directive language; first: {first}")]
    LanguageViolations {
        count: usize,
        first: String,
    },

    #[error("Rule table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule table IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error type for the referee.
#[derive(Debug, Error)]
pub enum RefereeError {
    #[error("Invalid constraints: {0}")]
    InvalidConstraints(#[from] ValidationError),

    #[error("Rule table error: {0}")]
    RuleTable(#[from] RuleTableError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read {origin}: {source}")]
    Input {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl RefereeError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates an error for user input that could not be read.
    #[must_use]
    pub fn input(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::Input {
            origin: origin.into(),
            source,
        }
    }

    /// Returns true if the constraint set was rejected.
    #[must_use]
    pub const fn is_invalid_constraints(&self) -> bool {
        matches!(self, Self::InvalidConstraints(_))
    }

    /// Returns true if this is a rule table error.
    #[must_use]
    pub const fn is_rule_table(&self) -> bool {
        matches!(self, Self::RuleTable(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if user input could not be read.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }

    /// Returns true if this error is retryable.
    ///
    /// Every failure here is a deterministic function of the input, so
    /// retrying with the same input never helps.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for referee operations.
pub type RefereeResult<T> = Result<T, RefereeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dimension_message() {
        let err = ValidationError::MissingDimension {
            dimension: Dimension::TimeToMarket,
        };
        let msg = format!("{err}");
        assert!(msg.contains("timeToMarket"));
        assert!(msg.contains("missing"));
        assert_eq!(err.dimension(), Some(Dimension::TimeToMarket));
    }

    #[test]
    fn test_unknown_value_message() {
        let err = ValidationError::UnknownValue {
            dimension: Dimension::Scale,
            value: "huge".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("huge"));
        assert!(msg.contains("scale"));
    }

    #[test]
    fn test_not_a_record_has_no_dimension() {
        assert_eq!(ValidationError::NotARecord.dimension(), None);
    }

    #[test]
    fn test_referee_error_from_validation() {
        let err: RefereeError = ValidationError::NotARecord.into();
        assert!(err.is_invalid_constraints());
        assert!(!err.is_rule_table());
        assert!(!err.is_retryable());
        assert!(format!("{err}").starts_with("Invalid constraints"));
    }

    #[test]
    fn test_referee_error_from_rule_table() {
        let err: RefereeError = RuleTableError::DuplicateRuleId {
            id: "EXP_BEGINNER_REST".to_string(),
        }
        .into();
        assert!(err.is_rule_table());
        assert!(format!("{err}").contains("EXP_BEGINNER_REST"));
    }

    #[test]
    fn test_referee_error_from_config() {
        let err: RefereeError = ConfigError::Invalid("bad".to_string()).into();
        assert!(err.is_config());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_input_error_is_not_invalid_constraints() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = RefereeError::input("constraints.json", io);
        assert!(err.is_input());
        assert!(!err.is_invalid_constraints());
        assert!(format!("{err}").contains("constraints.json"));
    }

    #[test]
    fn test_malformed_document_is_invalid_constraints() {
        let err: RefereeError = ValidationError::Malformed {
            message: "EOF while parsing an object".to_string(),
        }
        .into();
        assert!(err.is_invalid_constraints());
        assert!(!format!("{err}").contains("Internal"));
    }

    #[test]
    fn test_internal_error() {
        let err = RefereeError::internal("unexpected state");
        let msg = format!("{err}");
        assert!(msg.contains("unexpected state"));
    }
}
