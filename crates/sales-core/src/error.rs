//! # Error Types
//!
//! Domain-specific error types for sales-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sales-core errors (this file)                                         │
//! │  ├── ReportError      - Fatal report computation errors                │
//! │  └── ValidationError  - Field-level findings, never fatal              │
//! │                                                                         │
//! │  sales-report app                                                      │
//! │  ├── ConfigError      - Bad environment / TOML values                  │
//! │  └── anyhow::Error    - What the terminal sees                         │
//! │                                                                         │
//! │  Flow: ReportError → anyhow → stderr, exit 1                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is fatal for the call that raised it: no partial report is
//! ever returned alongside an error.

use thiserror::Error;

// =============================================================================
// Report Error
// =============================================================================

/// Errors raised while validating input or building the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The dataset is missing, malformed, or has no sellers.
    ///
    /// ## When This Occurs
    /// - `sellers` is absent or not an array (untyped input)
    /// - `sellers` is empty
    /// - The JSON does not deserialize into a dataset
    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    /// The options value is not an object, or holds an unusable value.
    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },

    /// A line item references a SKU absent from the product catalog.
    #[error("Product with SKU {0} not found")]
    UnknownProduct(String),

    /// A purchase record references a seller absent from the seller list.
    #[error("Seller {0} not found")]
    UnknownSeller(String),
}

impl ReportError {
    pub(crate) fn invalid_dataset(reason: impl Into<String>) -> Self {
        ReportError::InvalidDataset {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_options(reason: impl Into<String>) -> Self {
        ReportError::InvalidOptions {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input findings.
///
/// Reported to callers that want to warn; the report is computed anyway.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

// =============================================================================
// Unit Tests
// =============================================================================
