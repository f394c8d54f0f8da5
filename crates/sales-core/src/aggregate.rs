//! # Aggregate Module
//!
//! Folds purchase records into one running [`SellerStats`] per seller.
//!
//! ## Fold
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sellers ──► [SellerStats::zeroed; N]      (input order kept)          │
//! │  sellers ──► seller_id → slot              O(1) lookup                 │
//! │  products ─► sku → &Product                O(1) lookup                 │
//! │                                                                         │
//! │  for record in purchase_records:                                       │
//! │     slot ← seller_id          ✗ UnknownSeller                          │
//! │     sales_count += 1                                                    │
//! │     revenue     += total_amount                                         │
//! │     for item in record.items:                                          │
//! │        product ← sku          ✗ UnknownProduct                         │
//! │        profit  += revenue(item) - purchase_price × quantity            │
//! │        products_sold[sku] += quantity                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first unresolved reference aborts the whole fold.

use std::collections::HashMap;

use crate::calculator::{line_profit, RevenueCalculator};
use crate::error::{ReportError, ReportResult};
use crate::types::{Dataset, Product, Seller};

// =============================================================================
// Seller Stats
// =============================================================================

/// Running totals for one seller.
///
/// Amounts stay unrounded here; rounding happens once when the report is
/// projected.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
    /// SKU → units sold.
    pub products_sold: HashMap<String, i64>,
}

impl SellerStats {
    /// Zeroed stats.
    pub fn new(id: impl Into<String>, name: String) -> Self {
        SellerStats {
            id: id.into(),
            name,
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: HashMap::new(),
        }
    }

    pub fn from_seller(seller: &Seller) -> Self {
        SellerStats::new(seller.id.clone(), seller.display_name())
    }

    /// Counts one purchase record and its charged total.
    fn record_sale(&mut self, total_amount: f64) {
        self.sales_count += 1;
        self.revenue += total_amount;
    }

    fn add_quantity(&mut self, sku: &str, quantity: i64) {
        *self.products_sold.entry(sku.to_string()).or_insert(0) += quantity;
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Builds per-seller stats for every seller in `dataset`, in input order.
///
/// `revenue` prices each line item; its profit is that revenue minus the
/// catalog purchase price times quantity. Record revenue is the record's
/// `total_amount` as given, independent of the line items.
///
/// ## Errors
/// - [`ReportError::UnknownSeller`] - a record names a seller not in `sellers`
/// - [`ReportError::UnknownProduct`] - a line item names a SKU not in `products`
pub fn aggregate<R>(dataset: &Dataset, revenue: &R) -> ReportResult<Vec<SellerStats>>
where
    R: RevenueCalculator + ?Sized,
{
    let mut stats: Vec<SellerStats> = dataset
        .sellers
        .iter()
        .map(SellerStats::from_seller)
        .collect();

    // Later duplicates win, for sellers and products alike.
    let seller_index: HashMap<&str, usize> = dataset
        .sellers
        .iter()
        .enumerate()
        .map(|(slot, seller)| (seller.id.as_str(), slot))
        .collect();
    let product_index: HashMap<&str, &Product> = dataset
        .products
        .iter()
        .map(|product| (product.sku.as_str(), product))
        .collect();

    for record in &dataset.purchase_records {
        let slot = *seller_index
            .get(record.seller_id.as_str())
            .ok_or_else(|| ReportError::UnknownSeller(record.seller_id.clone()))?;
        let seller = &mut stats[slot];

        seller.record_sale(record.total_amount);

        for item in &record.items {
            let product = product_index
                .get(item.sku.as_str())
                .ok_or_else(|| ReportError::UnknownProduct(item.sku.clone()))?;

            seller.profit += line_profit(revenue, item, product);
            seller.add_quantity(&item.sku, item.quantity);
        }
    }

    Ok(stats)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SimpleRevenue;
    use crate::types::{LineItem, PurchaseRecord};

    fn record(seller_id: &str, total_amount: f64, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            receipt_id: None,
            seller_id: seller_id.to_string(),
            total_amount,
            items,
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            sellers: vec![
                Seller::new("s1", "Ivan", "Ivanov"),
                Seller::new("s2", "Maria", "Smirnova"),
            ],
            products: vec![Product::new("P1", 100.0, 60.0), Product::new("P2", 10.0, 4.0)],
            purchase_records: vec![
                record(
                    "s1",
                    190.0,
                    vec![LineItem::new("P1", 1, 0.0, 100.0), LineItem::new("P2", 10, 10.0, 10.0)],
                ),
                record("s1", 20.0, vec![LineItem::new("P2", 2, 0.0, 10.0)]),
            ],
        }
    }

    #[test]
    fn test_aggregate_totals() {
        let stats = aggregate(&dataset(), &SimpleRevenue).unwrap();
        assert_eq!(stats.len(), 2);

        let s1 = &stats[0];
        assert_eq!(s1.name, "Ivan Ivanov");
        assert_eq!(s1.sales_count, 2);
        assert!((s1.revenue - 210.0).abs() < 1e-9);
        // (100 - 60) + (90 - 40) + (20 - 8)
        assert!((s1.profit - 102.0).abs() < 1e-9);
        assert_eq!(s1.products_sold.get("P1"), Some(&1));
        assert_eq!(s1.products_sold.get("P2"), Some(&12));
    }

    #[test]
    fn test_seller_without_records_stays_zeroed() {
        let stats = aggregate(&dataset(), &SimpleRevenue).unwrap();
        assert_eq!(stats[1], SellerStats::new("s2", "Maria Smirnova".to_string()));
    }

    #[test]
    fn test_unknown_product_fails() {
        let mut data = dataset();
        data.purchase_records
            .push(record("s2", 5.0, vec![LineItem::new("GHOST", 1, 0.0, 5.0)]));

        let err = aggregate(&data, &SimpleRevenue).unwrap_err();
        assert!(matches!(err, ReportError::UnknownProduct(ref sku) if sku == "GHOST"));
    }

    #[test]
    fn test_unknown_seller_fails() {
        let mut data = dataset();
        data.purchase_records.insert(0, record("s9", 5.0, vec![]));

        let err = aggregate(&data, &SimpleRevenue).unwrap_err();
        assert!(matches!(err, ReportError::UnknownSeller(ref id) if id == "s9"));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let data = dataset();
        let before = data.clone();
        aggregate(&data, &SimpleRevenue).unwrap();
        assert_eq!(data, before);
    }
}
