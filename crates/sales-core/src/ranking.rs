//! # Ranking Module
//!
//! Turns aggregated [`SellerStats`] into the final, ordered report.
//!
//! ## Steps
//! ```text
//! Vec<SellerStats> (input order)
//!      │
//!      ▼
//! stable sort by profit, descending     ties keep input order
//!      │
//!      ▼
//! bonus(rank, N, stats)                 BonusCalculator
//!      │
//!      ▼
//! top products                          quantity desc, sku asc, ≤ 10
//!      │
//!      ▼
//! round revenue / profit / bonus        Money::from_amount
//!      │
//!      ▼
//! Vec<SellerReport>
//! ```

use std::collections::HashMap;

use crate::aggregate::SellerStats;
use crate::calculator::BonusCalculator;
use crate::money::Money;
use crate::types::{SellerReport, TopProduct};
use crate::MAX_TOP_PRODUCTS;

/// Sorts sellers by profit, assigns bonuses by rank and projects the report.
///
/// The sort is stable and uses [`f64::total_cmp`], so equal profits keep
/// their input order and a `NaN` profit cannot break the ordering.
pub fn rank_sellers<B>(mut stats: Vec<SellerStats>, bonus: &B) -> Vec<SellerReport>
where
    B: BonusCalculator + ?Sized,
{
    stats.sort_by(|a, b| b.profit.total_cmp(&a.profit));

    let total = stats.len();
    stats
        .into_iter()
        .enumerate()
        .map(|(rank, seller)| {
            let amount = bonus.bonus(rank, total, &seller);
            into_report(seller, amount)
        })
        .collect()
}

/// Most-sold SKUs first, ties broken by SKU, capped at [`MAX_TOP_PRODUCTS`].
pub fn top_products(products_sold: HashMap<String, i64>) -> Vec<TopProduct> {
    let mut top: Vec<TopProduct> = products_sold
        .into_iter()
        .map(|(sku, quantity)| TopProduct { sku, quantity })
        .collect();

    top.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.sku.cmp(&b.sku)));
    top.truncate(MAX_TOP_PRODUCTS);
    top
}

fn into_report(seller: SellerStats, bonus: f64) -> SellerReport {
    SellerReport {
        seller_id: seller.id,
        name: seller.name,
        revenue: Money::from_amount(seller.revenue),
        profit: Money::from_amount(seller.profit),
        sales_count: seller.sales_count,
        top_products: top_products(seller.products_sold),
        bonus: Money::from_amount(bonus),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
