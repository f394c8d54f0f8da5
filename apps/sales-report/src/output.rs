//! Rendering of the finished report.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use sales_core::SellerReport;

use crate::config::OutputFormat;

/// Renders `report` in the requested format.
pub fn render(report: &[SellerReport], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Table => Ok(render_table(report).to_string()),
    }
}

fn render_table(report: &[SellerReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#", "Seller", "Name", "Revenue", "Profit", "Sales", "Bonus", "Top product",
    ]);

    for (rank, seller) in report.iter().enumerate() {
        let top = seller
            .top_products
            .first()
            .map(|p| format!("{} × {}", p.sku, p.quantity))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            (rank + 1).to_string(),
            seller.seller_id.clone(),
            seller.name.clone(),
            seller.revenue.to_string(),
            seller.profit.to_string(),
            seller.sales_count.to_string(),
            seller.bonus.to_string(),
            top,
        ]);
    }

    for index in [3, 4, 5, 6] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::{Money, TopProduct};

    fn report() -> Vec<SellerReport> {
        vec![SellerReport {
            seller_id: "s1".to_string(),
            name: "Anna Ko".to_string(),
            revenue: Money::from_cents(20000),
            profit: Money::from_cents(8000),
            sales_count: 1,
            top_products: vec![TopProduct {
                sku: "SKU_1".to_string(),
                quantity: 2,
            }],
            bonus: Money::from_cents(1200),
        }]
    }

    #[test]
    fn test_json_output() {
        let out = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["bonus"], serde_json::json!(12.0));
    }

    #[test]
    fn test_table_output() {
        let out = render(&report(), OutputFormat::Table).unwrap();
        assert!(out.contains("Anna Ko"));
        assert!(out.contains("200.00"));
        assert!(out.contains("12.00"));
        assert!(out.contains("SKU_1 × 2"));
    }
}
