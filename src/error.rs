//! Error types for expression_utils

use thiserror::Error;

/// Main error type for expression computations
#[derive(Error, Debug)]
pub enum ExprError {
    #[error("Required column '{column}' not found in header of {path}")]
    MissingColumn { column: String, path: String },

    #[error("Required file not found: {path}")]
    MissingFile { path: String },

    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: String,
        expected: String,
        got: String,
    },

    #[error("Feature id not found in genome at line {line_number}: {line}")]
    UnknownFeature { line_number: usize, line: String },

    #[error("Malformed row at line {line_number}: {reason}")]
    MalformedRow { line_number: usize, reason: String },

    #[error("Invalid abundance value '{value}' at line {line_number}")]
    InvalidAbundance { line_number: usize, value: String },

    #[error("Expected FPKM numerical interpretation for {reference}, got {found}")]
    UnexpectedInterpretation { reference: String, found: String },

    #[error("Object {reference} has unsupported type {found}")]
    UnsupportedObjectType { reference: String, found: String },

    #[error("Lookup of {reference} failed: {reason}")]
    Lookup { reference: String, reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ExprError {
    /// True for failures reported by an external collaborator rather than by
    /// the computation itself
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            ExprError::Lookup { .. } | ExprError::UnsupportedObjectType { .. }
        )
    }
}

/// Result type alias for expression operations
pub type Result<T> = std::result::Result<T, ExprError>;
