//! # Analysis Module
//!
//! The typed entry point: dataset + options in, ordered report out.
//!
//! ## User Workflow
//! ```text
//! Dataset, AnalysisOptions
//!      │
//!      ▼
//! analyze_sales_data ← THIS MODULE
//!      │
//!      ├── sellers empty?      → InvalidDataset (nothing else is read)
//!      │
//!      ├── aggregate           → UnknownSeller / UnknownProduct
//!      │
//!      └── rank_sellers        → Vec<SellerReport>, profit descending
//! ```

use crate::aggregate::aggregate;
use crate::calculator::{BonusCalculator, ProfitRankBonus, RevenueCalculator, SimpleRevenue};
use crate::error::{ReportError, ReportResult};
use crate::ranking::rank_sellers;
use crate::types::{Dataset, SellerReport};

// =============================================================================
// Options
// =============================================================================

/// The two strategies a report is computed with.
///
/// ## Example
/// ```rust
/// use sales_core::{AnalysisOptions, CatalogRevenue, SellerStats};
///
/// let options = AnalysisOptions::new()
///     .with_revenue(CatalogRevenue)
///     .with_bonus(|rank: usize, _total: usize, seller: &SellerStats| {
///         if rank == 0 { seller.profit * 0.2 } else { 0.0 }
///     });
/// # let _ = options;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions<R = SimpleRevenue, B = ProfitRankBonus> {
    pub revenue: R,
    pub bonus: B,
}

impl AnalysisOptions {
    /// Line-item snapshot pricing and the tiered profit bonus.
    pub fn new() -> Self {
        AnalysisOptions {
            revenue: SimpleRevenue,
            bonus: ProfitRankBonus,
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions::new()
    }
}

impl<R, B> AnalysisOptions<R, B>
where
    R: RevenueCalculator,
    B: BonusCalculator,
{
    /// Replaces the revenue strategy.
    pub fn with_revenue<R2: RevenueCalculator>(self, revenue: R2) -> AnalysisOptions<R2, B> {
        AnalysisOptions {
            revenue,
            bonus: self.bonus,
        }
    }

    /// Replaces the bonus strategy.
    pub fn with_bonus<B2: BonusCalculator>(self, bonus: B2) -> AnalysisOptions<R, B2> {
        AnalysisOptions {
            revenue: self.revenue,
            bonus,
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Computes one [`SellerReport`] per seller, ordered by profit descending.
///
/// Pure: the same inputs always produce the same report, and the inputs are
/// only read.
///
/// ## Errors
/// - [`ReportError::InvalidDataset`] - `dataset.sellers` is empty
/// - [`ReportError::UnknownSeller`] - a record names an unknown seller
/// - [`ReportError::UnknownProduct`] - a line item names an unknown SKU
pub fn analyze_sales_data<R, B>(
    dataset: &Dataset,
    options: &AnalysisOptions<R, B>,
) -> ReportResult<Vec<SellerReport>>
where
    R: RevenueCalculator,
    B: BonusCalculator,
{
    if dataset.sellers.is_empty() {
        return Err(ReportError::invalid_dataset("sellers must not be empty"));
    }

    let stats = aggregate(dataset, &options.revenue)?;
    Ok(rank_sellers(stats, &options.bonus))
}

// =============================================================================
// Unit Tests
// =============================================================================
