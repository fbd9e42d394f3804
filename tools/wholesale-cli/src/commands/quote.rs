//! Quote one item count.

use anyhow::Result;
use serde::Serialize;

use super::QuoteArgs;
use crate::context::Context;

/// Quote as printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub total_items: i64,
    pub shipping_cost: i64,
    pub explanation: String,
    pub formatted_cost: String,
    pub tier: String,
}

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let view = quote(args.items, ctx);

    ctx.logger
        .debug_builder("Quoted shipping")
        .field_i64("total_items", view.total_items)
        .field_i64("shipping_cost", view.shipping_cost)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header(&format!("Shipping for {} items", view.total_items));
    ctx.output.kv("cost", &view.formatted_cost);
    ctx.output.kv("explanation", &view.explanation);
    ctx.output.kv("tier", &view.tier);

    Ok(())
}

pub fn quote(total_items: i64, ctx: &Context) -> QuoteView {
    let details = ctx.schedule.details(total_items);
    QuoteView {
        total_items,
        shipping_cost: details.cost_units(),
        formatted_cost: ctx.money_units(details.cost_units(), details.cost.currency),
        tier: format!("{:?}", details.tier).to_lowercase(),
        explanation: details.explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CurrencyFormat, OutputConfig, WholesaleConfig};

    #[test]
    fn test_quote_view() {
        let ctx = Context::for_config(WholesaleConfig::default());
        let view = quote(380, &ctx);
        assert_eq!(view.shipping_cost, 300);
        assert_eq!(view.formatted_cost, "300,00\u{a0}€");
        assert_eq!(view.explanation, "Frais dégressifs pour 200-380 produits");
        assert_eq!(view.tier, "interpolated");
    }

    #[test]
    fn test_quote_view_symbol_format() {
        let ctx = Context::for_config(WholesaleConfig {
            output: OutputConfig {
                currency_format: CurrencyFormat::Symbol,
            },
            ..WholesaleConfig::default()
        });
        let view = quote(0, &ctx);
        assert_eq!(view.formatted_cost, "€0.00");
        assert_eq!(view.tier, "empty");
    }

    #[test]
    fn test_quote_view_huge_count() {
        let ctx = Context::for_config(WholesaleConfig::default());
        let view = quote(200_000_000_000_000_000, &ctx);
        assert_eq!(view.shipping_cost, 158_000_000_000_000_000);
        assert!(view.formatted_cost.starts_with("158\u{202f}000"));
        assert!(view.formatted_cost.ends_with(",00\u{a0}€"));
    }
}
