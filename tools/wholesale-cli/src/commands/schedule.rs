//! Show the active schedule.

use anyhow::Result;
use serde::Serialize;
use wholesale_commerce::money::{Currency, Money};
use wholesale_commerce::shipping::{BoundaryCheck, ShippingSchedule, TierRule};

use crate::context::Context;
use crate::output::delta_badge;

#[derive(Serialize)]
struct ScheduleView<'a> {
    source: String,
    schedule: &'a ShippingSchedule,
    boundaries: Vec<BoundaryCheck>,
}

/// Run the schedule command.
pub fn run(ctx: &Context) -> Result<()> {
    let source = match &ctx.config_path {
        Some(path) if ctx.config.has_custom_schedule() => path.display().to_string(),
        _ => "standard".to_string(),
    };
    let boundaries = ctx.schedule.boundary_checks();

    if ctx.output.is_json() {
        ctx.output.json(&ScheduleView {
            source,
            schedule: &ctx.schedule,
            boundaries,
        });
        return Ok(());
    }

    ctx.output.header("Shipping schedule");
    ctx.output.kv("source", &source);

    let widths = [10, 0];
    ctx.output.table_row(&["ITEMS", "FEE"], &widths);
    for tier in &ctx.schedule.tiers {
        let range = format!("{}-{}", tier.min_items, tier.max_items);
        ctx.output.table_row(&[&range, &describe_rule(&tier.rule, ctx)], &widths);
    }
    let tail = match ctx.schedule.tiers.last() {
        Some(last) => format!("{}+", last.max_items + 1),
        None => "1+".to_string(),
    };
    ctx.output.table_row(
        &[&tail, &format!("{} x items, rounded", ctx.schedule.tail_rate)],
        &widths,
    );

    if boundaries.is_empty() {
        return Ok(());
    }

    ctx.output.header("Tier boundaries");
    for check in &boundaries {
        ctx.output.list_item(&format!(
            "{} items: lower rule {}, upper rule {} (step {})",
            check.boundary,
            check.lower_rule_cost,
            check.upper_rule_cost,
            delta_badge(check.delta())
        ));
        if !check.lower_is_flat && check.delta() != 0 {
            ctx.output.warn(&format!(
                "Interpolated tier does not meet the next rule at {} items",
                check.boundary
            ));
        }
    }

    Ok(())
}

fn describe_rule(rule: &TierRule, ctx: &Context) -> String {
    match *rule {
        TierRule::Flat { cost } => ctx.money(&Money::from_units(cost, Currency::EUR)),
        TierRule::Interpolated { from, to } => format!(
            "from {} at {} items to {} at {} items",
            ctx.money(&Money::from_units(from.cost, Currency::EUR)),
            from.items,
            ctx.money(&Money::from_units(to.cost, Currency::EUR)),
            to.items
        ),
    }
}
