//! # Validation Module
//!
//! The untyped entry point and the input checks that go with it.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON shape (THIS MODULE)                                     │
//! │  ├── dataset is an object with a non-empty `sellers` array             │
//! │  └── options is an object, null or an array (scalars rejected)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization into Dataset                                 │
//! │  └── field types, required fields                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Aggregation                                                  │
//! │  └── every seller_id and SKU resolves                                  │
//! │                                                                         │
//! │  Discount range is NOT enforced by any layer; callers that care        │
//! │  can inspect it with `discount_violations`.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sales_core::validation::analyze_sales_value;
//! use serde_json::json;
//!
//! let dataset = json!({
//!     "sellers": [{ "id": "s1", "first_name": "Anna", "last_name": "Ko" }],
//!     "products": [],
//!     "purchase_records": []
//! });
//! let report = analyze_sales_value(&dataset, &json!({})).unwrap();
//! assert_eq!(report[0].sales_count, 0);
//!
//! assert!(analyze_sales_value(&dataset, &json!("fast")).is_err());
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::analysis::{analyze_sales_data, AnalysisOptions};
use crate::calculator::PriceSource;
use crate::error::{ReportError, ReportResult, ValidationError};
use crate::types::{Dataset, SellerReport};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Dataset
// =============================================================================

/// Checks the dataset's shape, then deserializes it.
///
/// ## Rules
/// - Must be a JSON object
/// - `sellers` must be present, an array, and non-empty
/// - Everything must deserialize into [`Dataset`]
pub fn dataset_from_value(value: &Value) -> ReportResult<Dataset> {
    let object = value.as_object().ok_or_else(|| {
        ReportError::invalid_dataset(format!("dataset must be an object, got {}", json_type(value)))
    })?;

    match object.get("sellers") {
        None | Some(Value::Null) => {
            return Err(ReportError::invalid_dataset("sellers is required"));
        }
        Some(Value::Array(sellers)) if sellers.is_empty() => {
            return Err(ReportError::invalid_dataset("sellers must not be empty"));
        }
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(ReportError::invalid_dataset(format!(
                "sellers must be an array, got {}",
                json_type(other)
            )));
        }
    }

    Dataset::deserialize(value).map_err(|e| ReportError::invalid_dataset(e.to_string()))
}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    #[serde(default)]
    price_source: Option<PriceSource>,
}

/// Reads the optional `price_source` from an options value.
///
/// ## Rules
/// - Objects are read; unknown keys are ignored
/// - `null` and arrays carry no settings and mean the defaults
/// - Strings, numbers and booleans are rejected
pub fn options_from_value(value: &Value) -> ReportResult<PriceSource> {
    match value {
        Value::Object(_) => {
            let raw = RawOptions::deserialize(value)
                .map_err(|e| ReportError::invalid_options(e.to_string()))?;
            Ok(raw.price_source.unwrap_or_default())
        }
        Value::Null | Value::Array(_) => Ok(PriceSource::default()),
        other => Err(ReportError::invalid_options(format!(
            "options must be an object, got {}",
            json_type(other)
        ))),
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Validates untyped input, then runs [`analyze_sales_data`].
///
/// The dataset is checked before the options, and both before any
/// aggregation work.
pub fn analyze_sales_value(dataset: &Value, options: &Value) -> ReportResult<Vec<SellerReport>> {
    let dataset = dataset_from_value(dataset)?;
    let price_source = options_from_value(options)?;

    let options = AnalysisOptions::new().with_revenue(price_source);
    analyze_sales_data(&dataset, &options)
}

// =============================================================================
// Discount Checks
// =============================================================================

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be within 0-100 inclusive (`NaN` is out of range)
///
/// ## Example
/// ```rust
/// use sales_core::validation::validate_discount;
///
/// assert!(validate_discount(0.0).is_ok());
/// assert!(validate_discount(100.0).is_ok());
/// assert!(validate_discount(100.5).is_err());
/// ```
pub fn validate_discount(percent: f64) -> ValidationResult<()> {
    check_discount("discount", percent)
}

fn check_discount(field: impl Into<String>, percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: field.into(),
            min: 0.0,
            max: 100.0,
            value: percent,
        });
    }

    Ok(())
}

/// Every line item whose discount is outside 0-100, in input order.
///
/// The core never rejects these; this is for callers that want to warn.
pub fn discount_violations(dataset: &Dataset) -> Vec<ValidationError> {
    dataset
        .purchase_records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| {
            let receipt = record
                .receipt_id
                .clone()
                .unwrap_or_else(|| format!("#{index}"));
            record.items.iter().filter_map(move |item| {
                let field = format!("discount of {} in record {}", item.sku, receipt);
                check_discount(field, item.discount).err()
            })
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
