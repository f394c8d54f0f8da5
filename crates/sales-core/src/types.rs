//! # Domain Types
//!
//! Input and output shapes of the seller report.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (caller-supplied, read-only)                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Seller       │   │    Product      │   │ PurchaseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  sku (key)      │   │  seller_id (FK) │       │
//! │  │  first_name     │   │  sale_price     │   │  total_amount   │       │
//! │  │  last_name      │   │  purchase_price │   │  items[]  ──────┼──┐    │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘  │    │
//! │                                              ┌─────────────────┐  │    │
//! │                                              │    LineItem     │◄─┘    │
//! │                                              │  sku (FK)       │       │
//! │                                              │  quantity       │       │
//! │                                              │  discount (%)   │       │
//! │                                              │  sale_price     │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  OUTPUT                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ SellerReport { seller_id, name, revenue, profit, sales_count,   │   │
//! │  │                top_products: [TopProduct { sku, quantity }],    │   │
//! │  │                bonus }                                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Seller
// =============================================================================

/// A seller whose performance is measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Seller {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Name shown in the report: first and last name joined by one space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stock Keeping Unit - unique key of the catalog.
    pub sku: String,

    /// Display name. Carried through, never consulted by the computation.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,

    /// Catalog sale price per unit.
    pub sale_price: f64,

    /// Purchase (cost) price per unit.
    pub purchase_price: f64,
}

impl Product {
    pub fn new(sku: impl Into<String>, sale_price: f64, purchase_price: f64) -> Self {
        Product {
            sku: sku.into(),
            name: None,
            sale_price,
            purchase_price,
        }
    }
}

// =============================================================================
// Purchase Record
// =============================================================================

/// One line of a purchase record.
/// Uses the snapshot pattern: `sale_price` is the unit price at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub sku: String,
    /// Whole units. `2.0` is accepted as `2`, `2.5` is not.
    #[serde(with = "whole_quantity")]
    #[ts(type = "number")]
    pub quantity: i64,
    /// Discount in percent, expected within 0-100. Not validated by the core.
    #[serde(default)]
    pub discount: f64,
    /// Unit price at time of sale (frozen).
    pub sale_price: f64,
}

impl LineItem {
    pub fn new(sku: impl Into<String>, quantity: i64, discount: f64, sale_price: f64) -> Self {
        LineItem {
            sku: sku.into(),
            quantity,
            discount,
            sale_price,
        }
    }
}

/// One transaction attributed to a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRecord {
    /// Receipt identifier, used only to make error reports traceable.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub receipt_id: Option<String>,
    pub seller_id: String,
    /// Amount charged for the whole record. Taken as given for revenue.
    pub total_amount: f64,
    pub items: Vec<LineItem>,
}

/// Quantities arrive as JSON numbers; integral floats are accepted.
mod whole_quantity {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(quantity: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*quantity)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(WholeQuantity)
    }

    struct WholeQuantity;

    impl<'de> Visitor<'de> for WholeQuantity {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole number of units")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() != 0.0 || !(i64::MIN as f64..i64::MAX as f64).contains(&v) {
                return Err(E::invalid_value(de::Unexpected::Float(v), &self));
            }
            Ok(v as i64)
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Everything one report is computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dataset {
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
}

// =============================================================================
// Report
// =============================================================================

/// A SKU and how many units of it one seller sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TopProduct {
    pub sku: String,
    pub quantity: i64,
}

/// The per-seller line of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SellerReport {
    pub seller_id: String,
    pub name: String,
    #[ts(as = "f64")]
    pub revenue: Money,
    #[ts(as = "f64")]
    pub profit: Money,
    pub sales_count: u64,
    /// At most [`crate::MAX_TOP_PRODUCTS`] entries, quantity descending.
    pub top_products: Vec<TopProduct>,
    #[ts(as = "f64")]
    pub bonus: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name() {
        let seller = Seller::new("seller_1", "Alexey", "Petrov");
        assert_eq!(seller.display_name(), "Alexey Petrov");
    }

    #[test]
    fn test_dataset_deserializes_with_optional_fields() {
        let dataset: Dataset = serde_json::from_value(json!({
            "sellers": [{ "id": "s1", "first_name": "A", "last_name": "B" }],
            "products": [{ "sku": "P1", "name": "Pen", "sale_price": 10.0, "purchase_price": 4.0 }],
            "purchase_records": [{
                "seller_id": "s1",
                "total_amount": 10.0,
                "items": [{ "sku": "P1", "quantity": 1, "sale_price": 10.0 }]
            }]
        }))
        .unwrap();

        assert_eq!(dataset.products[0].name.as_deref(), Some("Pen"));
        assert_eq!(dataset.purchase_records[0].receipt_id, None);
        assert_eq!(dataset.purchase_records[0].items[0].discount, 0.0);
    }

    #[test]
    fn test_quantity_accepts_integral_floats() {
        let item: LineItem =
            serde_json::from_value(json!({ "sku": "P1", "quantity": 2.0, "sale_price": 1.0 }))
                .unwrap();
        assert_eq!(item.quantity, 2);

        let item: LineItem =
            serde_json::from_value(json!({ "sku": "P1", "quantity": -3, "sale_price": 1.0 }))
                .unwrap();
        assert_eq!(item.quantity, -3);

        for bad in [json!(2.5), json!("2"), json!(null)] {
            let result = serde_json::from_value::<LineItem>(
                json!({ "sku": "P1", "quantity": bad, "sale_price": 1.0 }),
            );
            assert!(result.is_err());
        }

        let out = serde_json::to_value(LineItem::new("P1", 4, 0.0, 1.0)).unwrap();
        assert_eq!(out["quantity"], json!(4));
    }

    #[test]
    fn test_bindings_mark_optional_fields() {
        let product = Product::decl();
        assert!(product.contains("name?: string"), "{product}");
        assert!(!product.contains("null"), "{product}");

        let record = PurchaseRecord::decl();
        assert!(record.contains("receipt_id?: string"), "{record}");

        let item = LineItem::decl();
        assert!(item.contains("quantity: number"), "{item}");
    }

    #[test]
    fn test_absent_optionals_are_not_serialized() {
        let out = serde_json::to_value(Product::new("P1", 2.0, 1.0)).unwrap();
        assert!(out.get("name").is_none());
    }

    #[test]
    fn test_report_money_serializes_as_numbers() {
        let report = SellerReport {
            seller_id: "s1".to_string(),
            name: "A B".to_string(),
            revenue: Money::from_cents(20000),
            profit: Money::from_cents(8000),
            sales_count: 1,
            top_products: vec![TopProduct {
                sku: "P1".to_string(),
                quantity: 2,
            }],
            bonus: Money::from_cents(1200),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["revenue"], json!(200.0));
        assert_eq!(value["profit"], json!(80.0));
        assert_eq!(value["bonus"], json!(12.0));
        assert_eq!(value["top_products"][0]["quantity"], json!(2));
    }
}
