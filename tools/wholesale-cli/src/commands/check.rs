//! Run the reference quotes.

use anyhow::{bail, Result};
use wholesale_commerce::shipping::{run_reference_fixtures, FixtureReport};

use crate::context::Context;
use crate::output::pass_badge;

/// Run the check command. Fails when any reference quote does not match.
pub fn run(ctx: &Context) -> Result<()> {
    let report = run_reference_fixtures(&ctx.schedule);

    ctx.logger
        .info_builder("Reference quotes checked")
        .field_i64("passed", report.passed as i64)
        .field_i64("failed", report.failed as i64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        print_report(&report, ctx);
    }

    if !report.all_passed() {
        let counts: Vec<String> = report
            .failures()
            .map(|r| r.total_items.to_string())
            .collect();
        bail!(
            "{} reference quote(s) failed: {} items",
            report.failed,
            counts.join(", ")
        );
    }

    Ok(())
}

fn print_report(report: &FixtureReport, ctx: &Context) {
    ctx.output.header("Reference quotes");

    let widths = [6, 10, 8, 0];
    ctx.output
        .table_row(&["ITEMS", "EXPECTED", "ACTUAL", "RESULT"], &widths);
    for result in &report.results {
        ctx.output.table_row(
            &[
                &result.total_items.to_string(),
                &result.expected.to_string(),
                &result.actual.to_string(),
                &pass_badge(result.passed),
            ],
            &widths,
        );
    }

    if report.all_passed() {
        ctx.output
            .success(&format!("All {} reference quotes match", report.passed));
    }
}
