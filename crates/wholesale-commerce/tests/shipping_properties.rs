//! Whole-range properties of the standard shipping schedule.

use wholesale_commerce::prelude::*;
use wholesale_commerce::shipping::REFERENCE_FIXTURES;

const RANGE: std::ops::RangeInclusive<i64> = -50..=2_000;

#[test]
fn cost_is_never_negative() {
    for items in RANGE {
        assert!(calculate_shipping_cost(items) >= 0, "items = {}", items);
    }
    assert!(calculate_shipping_cost(i64::MIN) >= 0);
    assert!(calculate_shipping_cost(i64::MAX) >= 0);
}

#[test]
fn empty_and_negative_orders_are_free() {
    for items in -50..=0 {
        assert_eq!(calculate_shipping_cost(items), 0);
    }
}

#[test]
fn cost_never_decreases_with_more_items() {
    let mut previous = calculate_shipping_cost(0);
    for items in 1..=2_000 {
        let cost = calculate_shipping_cost(items);
        assert!(
            cost >= previous,
            "cost dropped from {} to {} at {} items",
            previous,
            cost,
            items
        );
        previous = cost;
    }
}

#[test]
fn reference_quotes_hold() {
    for (items, expected) in REFERENCE_FIXTURES {
        assert_eq!(calculate_shipping_cost(items), expected, "items = {}", items);
    }
}

#[test]
fn repeated_calls_agree() {
    for items in RANGE {
        assert_eq!(calculate_shipping_cost(items), calculate_shipping_cost(items));
        assert_eq!(get_shipping_details(items), get_shipping_details(items));
    }
}

#[test]
fn details_agree_with_cost() {
    let schedule = ShippingSchedule::standard();
    for items in RANGE {
        let details = get_shipping_details(items);
        assert_eq!(details.cost_units(), calculate_shipping_cost(items));
        assert_eq!(details.total_items, items);

        let expected_kind = match items {
            i64::MIN..=0 => TierKind::Empty,
            1..=45 => TierKind::Flat,
            46..=380 => TierKind::Interpolated,
            _ => TierKind::Tail,
        };
        assert_eq!(details.tier, expected_kind, "items = {}", items);

        if let Some(tier) = schedule.tier_for(items) {
            assert!(details.explanation.contains(&format!("{}-{}", tier.min_items, tier.max_items)));
        }
    }

    for items in [
        116_000_000_000_000_000,
        200_000_000_000_000_000,
        i64::MAX / 2,
        i64::MAX,
    ] {
        let details = get_shipping_details(items);
        let cost = calculate_shipping_cost(items);
        assert_eq!(details.cost_units(), cost, "items = {}", items);
        assert_eq!(details.tier, TierKind::Tail);

        let digits: String = details
            .formatted_cost()
            .chars()
            .take_while(|c| *c != ',')
            .filter(|c| c.is_ascii_digit())
            .collect();
        assert_eq!(digits, cost.to_string(), "items = {}", items);
    }
}

#[test]
fn interpolated_bands_meet_at_shared_anchors() {
    let checks = ShippingSchedule::standard().boundary_checks();
    for check in checks.iter().filter(|c| !c.lower_is_flat) {
        assert!(
            check.delta().abs() <= 1,
            "discontinuity of {} at {}",
            check.delta(),
            check.boundary
        );
    }
}

#[test]
fn schedule_loaded_from_toml_matches_standard() {
    let toml_src = r#"
        tail_rate = 0.79

        [[tiers]]
        min_items = 1
        max_items = 2
        rule = { kind = "flat", cost = 13 }

        [[tiers]]
        min_items = 3
        max_items = 8
        rule = { kind = "flat", cost = 20 }

        [[tiers]]
        min_items = 9
        max_items = 14
        rule = { kind = "flat", cost = 25 }

        [[tiers]]
        min_items = 15
        max_items = 36
        rule = { kind = "flat", cost = 35 }

        [[tiers]]
        min_items = 37
        max_items = 45
        rule = { kind = "flat", cost = 45 }

        [[tiers]]
        min_items = 46
        max_items = 99
        rule = { kind = "interpolated", from = { items = 45, cost = 45 }, to = { items = 100, cost = 100 } }

        [[tiers]]
        min_items = 100
        max_items = 199
        rule = { kind = "interpolated", from = { items = 100, cost = 100 }, to = { items = 200, cost = 172 } }

        [[tiers]]
        min_items = 200
        max_items = 380
        rule = { kind = "interpolated", from = { items = 200, cost = 172 }, to = { items = 380, cost = 300 } }
    "#;

    let schedule: ShippingSchedule = toml::from_str(toml_src).unwrap();
    assert!(schedule.validate().is_ok());
    assert_eq!(schedule, ShippingSchedule::standard());
}
