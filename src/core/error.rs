use thiserror::Error;

/// Errors that can occur while building, storing or exporting invoices.
///
/// AGT business-rule violations are *not* errors: they are reported as
/// findings by the `agt` validator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturaError {
    /// One or more construction rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing or parsing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Reporting period out of range.
    #[error("invalid period: {0}")]
    Period(String),

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// SAF-T generation fault (inconsistent input handed to the assembler).
    #[error("generation error: {0}")]
    Generation(String),

    /// The storage collaborator failed or is unavailable.
    #[error("storage error: {0}")]
    Storage(String),

    /// A referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// A single construction-time validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Rule identifier if applicable.
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
