//! # sales-core: Pure Report Logic
//!
//! This crate computes the per-seller sales performance report: revenue,
//! profit, sales count, top products and a rank-based bonus. Everything here
//! is a pure function with zero I/O dependencies.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Seller Report Pipeline                             │
//! │                                                                         │
//! │   Dataset { sellers, products, purchase_records }                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌───────────┐   once per    ┌────────────┐                           │
//! │   │ aggregate │──line item──► │ calculator │  revenue - cost           │
//! │   │           │◄──────────────│            │                           │
//! │   └─────┬─────┘               └────────────┘                           │
//! │         │ Vec<SellerStats> (input order)                                │
//! │         ▼                                                               │
//! │   ┌───────────┐                                                         │
//! │   │  ranking  │  sort by profit ▸ bonus tier ▸ top 10 products          │
//! │   └─────┬─────┘                                                         │
//! │         ▼                                                               │
//! │   Vec<SellerReport> (profit descending)                                 │
//! │                                                                         │
//! │   NO I/O • NO LOGGING • NO SHARED STATE                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input and output shapes (Seller, Product, SellerReport, ...)
//! - [`money`] - Money type used for the rounded report amounts
//! - [`calculator`] - Revenue and bonus strategies
//! - [`aggregate`] - Folds purchase records into per-seller stats
//! - [`ranking`] - Sorts sellers, assigns bonuses, trims top products
//! - [`analysis`] - The typed entry point
//! - [`validation`] - Untyped (JSON) entry point and input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sales_core::{analyze_sales_data, AnalysisOptions, Dataset, LineItem, Product,
//!     PurchaseRecord, Seller};
//!
//! let dataset = Dataset {
//!     sellers: vec![Seller::new("seller_1", "Alexey", "Petrov")],
//!     products: vec![Product::new("SKU_001", 100.0, 60.0)],
//!     purchase_records: vec![PurchaseRecord {
//!         receipt_id: None,
//!         seller_id: "seller_1".to_string(),
//!         total_amount: 200.0,
//!         items: vec![LineItem::new("SKU_001", 2, 0.0, 100.0)],
//!     }],
//! };
//!
//! let report = analyze_sales_data(&dataset, &AnalysisOptions::new()).unwrap();
//! assert_eq!(report[0].profit.cents(), 8000);
//! assert_eq!(report[0].bonus.cents(), 1200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod analysis;
pub mod calculator;
pub mod error;
pub mod money;
pub mod ranking;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{aggregate, SellerStats};
pub use analysis::{analyze_sales_data, AnalysisOptions};
pub use calculator::{
    line_profit, BonusCalculator, CatalogRevenue, PriceSource, ProfitRankBonus,
    RevenueCalculator, SimpleRevenue,
};
pub use error::{ReportError, ReportResult, ValidationError};
pub use money::Money;
pub use ranking::rank_sellers;
pub use types::*;
pub use validation::analyze_sales_value;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of entries in a seller's `top_products` list.
pub const MAX_TOP_PRODUCTS: usize = 10;

/// Bonus share for the seller ranked first by profit.
pub const FIRST_PLACE_BONUS_RATE: f64 = 0.15;

/// Bonus share for the sellers ranked second and third.
pub const PODIUM_BONUS_RATE: f64 = 0.10;

/// Bonus share for everyone between the podium and the last place.
pub const BASE_BONUS_RATE: f64 = 0.05;
