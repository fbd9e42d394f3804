//! Price a draft order from a file.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use wholesale_commerce::money::{Currency, Money};
use wholesale_commerce::order::{DraftOrder, OrderPricing};
use wholesale_commerce::{ClientId, ProductId};

use super::OrderArgs;
use crate::context::Context;

/// Draft order as written by hand.
///
/// ```toml
/// client = "garage-dupont"
///
/// [[lines]]
/// sku = "BP-200"
/// name = "Brake pads"
/// quantity = 8
/// unit_price = 12.0
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFile {
    pub client: String,
    #[serde(default)]
    pub note: Option<String>,
    pub lines: Vec<OrderFileLine>,
}

/// One line of an order file. Prices are in euros.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFileLine {
    /// Defaults to the SKU.
    #[serde(default)]
    pub product_id: Option<String>,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl OrderFile {
    /// Read a JSON or TOML order file, picked by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order file: {}", path.display()))?;
        Self::parse(&content, path.extension().map_or(false, |e| e == "json"))
            .with_context(|| format!("Failed to parse order file: {}", path.display()))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Build the draft, line by line.
    pub fn into_draft(self) -> Result<DraftOrder> {
        let mut draft = DraftOrder::new(ClientId::new(self.client));
        draft.note = self.note;

        for (i, line) in self.lines.into_iter().enumerate() {
            if !line.unit_price.is_finite() {
                bail!("lines[{}]: unit_price must be a finite number", i);
            }
            let product_id = line.product_id.unwrap_or_else(|| line.sku.clone());
            draft
                .add_item(
                    ProductId::new(product_id),
                    line.sku,
                    line.name,
                    line.quantity,
                    Money::from_decimal(line.unit_price, Currency::EUR),
                )
                .with_context(|| format!("lines[{}]", i))?;
        }
        Ok(draft)
    }
}

#[derive(Serialize)]
struct OrderView<'a> {
    order: &'a DraftOrder,
    pricing: &'a OrderPricing,
}

/// Run the order command.
pub fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let draft = OrderFile::load(&path)?.into_draft()?;
    let pricing = draft.pricing(&ctx.schedule)?;

    ctx.logger
        .debug_builder("Priced order")
        .field("client", draft.client_id.as_str())
        .field_i64("total_items", pricing.total_items)
        .field_i64("grand_total_cents", pricing.grand_total.amount_cents)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&OrderView {
            order: &draft,
            pricing: &pricing,
        });
        return Ok(());
    }

    ctx.output
        .header(&format!("Order for {}", draft.client_id.as_str()));
    let widths = [12, 24, 6, 12, 0];
    ctx.output
        .table_row(&["SKU", "NAME", "QTY", "UNIT", "TOTAL"], &widths);
    for line in &draft.lines {
        ctx.output.table_row(
            &[
                &line.sku,
                &line.name,
                &line.quantity.to_string(),
                &ctx.money(&line.unit_price),
                &ctx.money(&line.total_price),
            ],
            &widths,
        );
    }

    ctx.output.header("Pricing");
    ctx.output.kv("items", &pricing.total_items.to_string());
    ctx.output.kv("subtotal", &ctx.money(&pricing.subtotal));
    ctx.output.kv(
        "shipping",
        &format!(
            "{} ({})",
            ctx.money(&pricing.shipping_total),
            pricing.shipping_explanation
        ),
    );
    ctx.output.kv("total", &ctx.money(&pricing.grand_total));
    ctx.output
        .kv("shipping share", &format!("{:.1}%", pricing.shipping_share()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wholesale_commerce::shipping::ShippingSchedule;

    const TOML_ORDER: &str = r#"
        client = "garage-dupont"
        note = "Livraison avant vendredi"

        [[lines]]
        sku = "BP-200"
        name = "Brake pads"
        quantity = 30
        unit_price = 12.5

        [[lines]]
        sku = "OF-10"
        name = "Oil filter"
        quantity = 20
        unit_price = 4.0
    "#;

    #[test]
    fn test_toml_order_pricing() {
        let draft = OrderFile::parse(TOML_ORDER, false)
            .unwrap()
            .into_draft()
            .unwrap();
        assert_eq!(draft.note.as_deref(), Some("Livraison avant vendredi"));
        assert_eq!(draft.lines[0].product_id.as_str(), "BP-200");

        let pricing = draft.pricing(&ShippingSchedule::standard()).unwrap();
        assert_eq!(pricing.total_items, 50);
        assert_eq!(pricing.subtotal, Money::from_units(455, Currency::EUR));
        assert_eq!(pricing.shipping_total, Money::from_units(50, Currency::EUR));
        assert_eq!(pricing.grand_total, Money::from_units(505, Currency::EUR));
    }

    #[test]
    fn test_json_order_merges_repeated_product() {
        let json = r#"{
            "client": "quincaillerie-martin",
            "lines": [
                {"sku": "SC-4", "name": "Screws", "quantity": 2, "unit_price": 1.0},
                {"sku": "SC-4", "name": "Screws", "quantity": 1, "unit_price": 1.0}
            ]
        }"#;
        let draft = OrderFile::parse(json, true).unwrap().into_draft().unwrap();
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.total_items(), 3);
        assert_eq!(draft.shipping(&ShippingSchedule::standard()).cost_units(), 20);
    }

    #[test]
    fn test_invalid_line_reports_index() {
        let json = r#"{
            "client": "c",
            "lines": [
                {"sku": "A", "name": "A", "quantity": 1, "unit_price": 1.0},
                {"sku": "B", "name": "B", "quantity": 0, "unit_price": 1.0}
            ]
        }"#;
        let err = OrderFile::parse(json, true)
            .unwrap()
            .into_draft()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("lines[1]"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"{
            "client": "c",
            "lines": [{"sku": "A", "name": "A", "quantity": 1, "unit_price": -2.5}]
        }"#;
        let err = OrderFile::parse(json, true)
            .unwrap()
            .into_draft()
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("lines[0]"));
        assert!(message.contains("Invalid unit price"));
    }

    #[test]
    fn test_non_finite_price_rejected() {
        let toml_src = r#"
            client = "c"

            [[lines]]
            sku = "A"
            name = "A"
            quantity = 1
            unit_price = nan
        "#;
        let err = OrderFile::parse(toml_src, false)
            .unwrap()
            .into_draft()
            .unwrap_err();
        assert!(err.to_string().contains("finite"));
    }
}
