//! # Calculator Module
//!
//! Pluggable strategies for per-line revenue and per-seller bonus.
//!
//! ## Injection Points
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AnalysisOptions<R, B>                               │
//! │                                                                         │
//! │   R: RevenueCalculator                 B: BonusCalculator               │
//! │   ─────────────────────                ────────────────────             │
//! │   SimpleRevenue   (default)            ProfitRankBonus (default)        │
//! │   CatalogRevenue                       |rank, total, stats| -> f64      │
//! │   PriceSource     (picks one above)                                     │
//! │   |item, product| -> f64                                                │
//! │                                                                         │
//! │   Called by aggregate (R, once per line item)                           │
//! │   and by ranking (B, once per seller after sorting)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::aggregate::SellerStats;
use crate::types::{LineItem, Product};
use crate::{BASE_BONUS_RATE, FIRST_PLACE_BONUS_RATE, PODIUM_BONUS_RATE};

/// `sale_price * quantity * (1 - discount / 100)`.
///
/// Discounts outside 0-100 are not clamped.
#[inline]
pub fn discounted_revenue(sale_price: f64, quantity: i64, discount: f64) -> f64 {
    sale_price * quantity as f64 * (1.0 - discount / 100.0)
}

// =============================================================================
// Revenue
// =============================================================================

/// Computes the revenue of one line item.
///
/// `product` is the catalog entry already resolved for `item.sku`.
pub trait RevenueCalculator {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64;
}

impl<F> RevenueCalculator for F
where
    F: Fn(&LineItem, &Product) -> f64,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        self(item, product)
    }
}

/// Prices the line from the item's own snapshot price.
///
/// ## Example
/// ```rust
/// use sales_core::{LineItem, Product, RevenueCalculator, SimpleRevenue};
///
/// let item = LineItem::new("SKU_001", 2, 10.0, 90.0);
/// let product = Product::new("SKU_001", 100.0, 60.0);
/// // 90 × 2 × 0.9, the catalog price of 100 is not consulted
/// assert!((SimpleRevenue.revenue(&item, &product) - 162.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueCalculator for SimpleRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> f64 {
        discounted_revenue(item.sale_price, item.quantity, item.discount)
    }
}

/// Prices the line from the catalog's current sale price.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogRevenue;

impl RevenueCalculator for CatalogRevenue {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        discounted_revenue(product.sale_price, item.quantity, item.discount)
    }
}

/// Which price a line item's revenue is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// The price frozen on the line item ([`SimpleRevenue`]).
    #[default]
    LineItem,
    /// The catalog product's sale price ([`CatalogRevenue`]).
    Catalog,
}

impl RevenueCalculator for PriceSource {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        match self {
            PriceSource::LineItem => SimpleRevenue.revenue(item, product),
            PriceSource::Catalog => CatalogRevenue.revenue(item, product),
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::LineItem => write!(f, "line_item"),
            PriceSource::Catalog => write!(f, "catalog"),
        }
    }
}

impl FromStr for PriceSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line_item" => Ok(PriceSource::LineItem),
            "catalog" => Ok(PriceSource::Catalog),
            other => Err(format!(
                "unknown price source '{other}', expected line_item or catalog"
            )),
        }
    }
}

/// Revenue minus cost basis (`purchase_price * quantity`) for one line item.
pub fn line_profit<R>(calculator: &R, item: &LineItem, product: &Product) -> f64
where
    R: RevenueCalculator + ?Sized,
{
    let revenue = calculator.revenue(item, product);
    let cost = product.purchase_price * item.quantity as f64;
    revenue - cost
}

// =============================================================================
// Bonus
// =============================================================================

/// Computes a seller's bonus from its zero-based rank among `total` sellers.
pub trait BonusCalculator {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64;
}

impl<F> BonusCalculator for F
where
    F: Fn(usize, usize, &SellerStats) -> f64,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        self(rank, total, seller)
    }
}

/// Tiered share of profit by rank. First matching rule wins:
///
/// | rank         | bonus        |
/// |--------------|--------------|
/// | 0            | 15% profit   |
/// | 1 or 2       | 10% profit   |
/// | total - 1    | 0            |
/// | anything else| 5% profit    |
///
/// With three sellers or fewer the last place is also on the podium, so it
/// keeps the podium rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitRankBonus;

impl BonusCalculator for ProfitRankBonus {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        if rank == 0 {
            seller.profit * FIRST_PLACE_BONUS_RATE
        } else if rank == 1 || rank == 2 {
            seller.profit * PODIUM_BONUS_RATE
        } else if rank + 1 == total {
            0.0
        } else {
            seller.profit * BASE_BONUS_RATE
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_profit(profit: f64) -> SellerStats {
        let mut stats = SellerStats::new("s1", "A B".to_string());
        stats.profit = profit;
        stats
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_simple_revenue_uses_line_item_price() {
        let item = LineItem::new("P1", 3, 0.0, 50.0);
        let product = Product::new("P1", 999.0, 10.0);
        assert!(approx(SimpleRevenue.revenue(&item, &product), 150.0));
    }

    #[test]
    fn test_catalog_revenue_uses_product_price() {
        let item = LineItem::new("P1", 3, 50.0, 50.0);
        let product = Product::new("P1", 100.0, 10.0);
        assert!(approx(CatalogRevenue.revenue(&item, &product), 150.0));
    }

    #[test]
    fn test_discount_out_of_range_propagates() {
        assert!(approx(discounted_revenue(100.0, 1, 150.0), -50.0));
        assert!(approx(discounted_revenue(100.0, 1, -10.0), 110.0));
    }

    #[test]
    fn test_line_profit() {
        let item = LineItem::new("P1", 2, 0.0, 100.0);
        let product = Product::new("P1", 100.0, 60.0);
        assert!(approx(line_profit(&SimpleRevenue, &item, &product), 80.0));
    }

    #[test]
    fn test_closure_as_revenue_calculator() {
        let flat = |item: &LineItem, _: &Product| item.quantity as f64;
        let item = LineItem::new("P1", 4, 0.0, 100.0);
        let product = Product::new("P1", 100.0, 0.5);
        assert!(approx(line_profit(&flat, &item, &product), 2.0));
    }

    #[test]
    fn test_price_source_dispatch_and_parse() {
        let item = LineItem::new("P1", 1, 0.0, 80.0);
        let product = Product::new("P1", 100.0, 0.0);
        assert!(approx(PriceSource::LineItem.revenue(&item, &product), 80.0));
        assert!(approx(PriceSource::Catalog.revenue(&item, &product), 100.0));

        assert_eq!("catalog".parse::<PriceSource>(), Ok(PriceSource::Catalog));
        assert_eq!(" LINE_ITEM ".parse::<PriceSource>(), Ok(PriceSource::LineItem));
        assert!("list".parse::<PriceSource>().is_err());
        assert_eq!(PriceSource::Catalog.to_string(), "catalog");
    }

    #[test]
    fn test_profit_rank_bonus_tiers() {
        let seller = stats_with_profit(1000.0);
        let bonus = |rank, total| ProfitRankBonus.bonus(rank, total, &seller);

        assert!(approx(bonus(0, 5), 150.0));
        assert!(approx(bonus(1, 5), 100.0));
        assert!(approx(bonus(2, 5), 100.0));
        assert!(approx(bonus(3, 5), 50.0));
        assert!(approx(bonus(4, 5), 0.0));
    }

    #[test]
    fn test_profit_rank_bonus_small_totals() {
        let seller = stats_with_profit(100.0);
        let bonus = |rank, total| ProfitRankBonus.bonus(rank, total, &seller);

        // Single seller is both first and last: first wins.
        assert!(approx(bonus(0, 1), 15.0));
        // Last of two or three is still on the podium.
        assert!(approx(bonus(1, 2), 10.0));
        assert!(approx(bonus(2, 3), 10.0));
        // Fourth of four is the first case where last place gets nothing.
        assert!(approx(bonus(3, 4), 0.0));
    }
}
