//! Quote every count in a range.

use anyhow::{bail, Result};

use super::DetailsArgs;
use crate::commands::quote::{quote, QuoteView};
use crate::context::Context;

/// Widest range accepted in one call.
const MAX_RANGE: i64 = 100_000;

/// Run the details command.
pub fn run(args: DetailsArgs, ctx: &Context) -> Result<()> {
    if args.from > args.to {
        bail!("Invalid range: {} is greater than {}", args.from, args.to);
    }
    if args.to.saturating_sub(args.from) >= MAX_RANGE {
        bail!("Range too wide: at most {} counts per call", MAX_RANGE);
    }

    let rows = quote_range(args.from, args.to, args.changes_only, ctx);

    ctx.logger
        .debug_builder("Quoted range")
        .field_i64("from", args.from)
        .field_i64("to", args.to)
        .field_i64("rows", rows.len() as i64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output
        .header(&format!("Shipping for {}-{} items", args.from, args.to));
    let widths = [8, 14, 0];
    ctx.output.table_row(&["ITEMS", "COST", "EXPLANATION"], &widths);
    for row in &rows {
        ctx.output.table_row(
            &[
                &row.total_items.to_string(),
                &row.formatted_cost,
                &row.explanation,
            ],
            &widths,
        );
    }

    Ok(())
}

/// Quotes for `from..=to`. With `changes_only`, keeps the first count and
/// every count whose fee differs from the one before it.
fn quote_range(from: i64, to: i64, changes_only: bool, ctx: &Context) -> Vec<QuoteView> {
    let mut rows: Vec<QuoteView> = Vec::new();
    for total_items in from..=to {
        let row = quote(total_items, ctx);
        let changed = rows
            .last()
            .map_or(true, |prev| prev.shipping_cost != row.shipping_cost);
        if !changes_only || changed {
            rows.push(row);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WholesaleConfig;

    #[test]
    fn test_quote_range_inclusive() {
        let ctx = Context::for_config(WholesaleConfig::default());
        let rows = quote_range(0, 3, false, &ctx);
        let costs: Vec<i64> = rows.iter().map(|r| r.shipping_cost).collect();
        assert_eq!(costs, vec![0, 13, 13, 20]);
    }

    #[test]
    fn test_quote_range_changes_only() {
        let ctx = Context::for_config(WholesaleConfig::default());
        let rows = quote_range(1, 45, true, &ctx);
        let counts: Vec<i64> = rows.iter().map(|r| r.total_items).collect();
        assert_eq!(counts, vec![1, 3, 9, 15, 37]);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let ctx = Context::for_config(WholesaleConfig::default());
        let args = DetailsArgs {
            from: 10,
            to: 2,
            changes_only: false,
        };
        assert!(run(args, &ctx).is_err());
    }
}
