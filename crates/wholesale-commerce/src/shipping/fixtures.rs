//! Reference quotes the business signed off on.

use serde::Serialize;

use crate::shipping::schedule::ShippingSchedule;

/// `(total_items, expected cost in euros)` at the documented boundary points.
pub const REFERENCE_FIXTURES: [(i64, i64); 8] = [
    (1, 13),
    (2, 13),
    (8, 20),
    (14, 25),
    (36, 35),
    (45, 45),
    (200, 172),
    (380, 300),
];

/// Outcome of one reference quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResult {
    pub total_items: i64,
    pub expected: i64,
    #[serde(rename = "shippingCost")]
    pub actual: i64,
    pub explanation: String,
    pub formatted_cost: String,
    pub passed: bool,
}

/// All reference quotes evaluated against one schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureReport {
    pub results: Vec<FixtureResult>,
    pub passed: usize,
    pub failed: usize,
}

impl FixtureReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Results that did not match.
    pub fn failures(&self) -> impl Iterator<Item = &FixtureResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Evaluate every reference quote against `schedule`.
pub fn run_reference_fixtures(schedule: &ShippingSchedule) -> FixtureReport {
    let results: Vec<FixtureResult> = REFERENCE_FIXTURES
        .iter()
        .map(|&(total_items, expected)| {
            let details = schedule.details(total_items);
            let actual = schedule.cost_for(total_items);
            FixtureResult {
                total_items,
                expected,
                actual,
                explanation: details.explanation.clone(),
                formatted_cost: details.formatted_cost(),
                passed: actual == expected,
            }
        })
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    FixtureReport {
        failed: results.len() - passed,
        passed,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::Tier;

    #[test]
    fn test_standard_schedule_passes_every_fixture() {
        let report = run_reference_fixtures(&ShippingSchedule::standard());
        assert_eq!(report.passed, REFERENCE_FIXTURES.len());
        assert!(report.all_passed());
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_altered_schedule_reports_failures() {
        let mut schedule = ShippingSchedule::standard();
        schedule.tiers[0] = Tier::flat(1, 2, 15);

        let report = run_reference_fixtures(&schedule);
        assert!(!report.all_passed());
        assert_eq!(report.failed, 2);

        let failed: Vec<i64> = report.failures().map(|r| r.total_items).collect();
        assert_eq!(failed, vec![1, 2]);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let report = run_reference_fixtures(&ShippingSchedule::standard());
        let json = serde_json::to_value(&report.results[6]).unwrap();
        assert_eq!(json["totalItems"], 200);
        assert_eq!(json["expected"], 172);
        assert_eq!(json["shippingCost"], 172);
        assert_eq!(json["formattedCost"], "172,00\u{a0}€");
        assert_eq!(json["passed"], true);
    }
}
