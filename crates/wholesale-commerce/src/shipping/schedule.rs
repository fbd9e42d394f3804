//! Tier table and cost evaluation.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::shipping::details::{ShippingDetails, TierKind};

/// Per-unit rate applied past the last tier of the standard schedule.
pub const STANDARD_TAIL_RATE: f64 = 0.79;

const STANDARD_TIERS: [Tier; 8] = [
    Tier::flat(1, 2, 13),
    Tier::flat(3, 8, 20),
    Tier::flat(9, 14, 25),
    Tier::flat(15, 36, 35),
    Tier::flat(37, 45, 45),
    Tier::interpolated(46, 99, Anchor::new(45, 45), Anchor::new(100, 100)),
    Tier::interpolated(100, 199, Anchor::new(100, 100), Anchor::new(200, 172)),
    Tier::interpolated(200, 380, Anchor::new(200, 172), Anchor::new(380, 300)),
];

/// A known (item count, cost) pair used as an interpolation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub items: i64,
    pub cost: i64,
}

impl Anchor {
    pub const fn new(items: i64, cost: i64) -> Self {
        Self { items, cost }
    }
}

/// How a tier prices the item counts it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierRule {
    /// Same fee for every count in the tier.
    Flat { cost: i64 },
    /// Straight line through two anchors, rounded to whole units.
    Interpolated { from: Anchor, to: Anchor },
}

impl TierRule {
    /// Evaluate the rule at `total_items`, even outside the owning tier.
    pub fn evaluate(&self, total_items: i64) -> i64 {
        match *self {
            TierRule::Flat { cost } => cost,
            TierRule::Interpolated { from, to } => interpolate(from, to, total_items),
        }
    }
}

/// `round(y0 + (n - x0) / (x1 - x0) * (y1 - y0))`.
///
/// Halves round away from zero, which matches `Math.round` for the
/// non-negative costs this is used with.
pub fn interpolate(from: Anchor, to: Anchor, total_items: i64) -> i64 {
    let span = to.items.saturating_sub(from.items) as f64;
    let ratio = total_items.saturating_sub(from.items) as f64 / span;
    let cost = from.cost as f64 + ratio * to.cost.saturating_sub(from.cost) as f64;
    cost.round() as i64
}

/// An inclusive range of item counts and its pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min_items: i64,
    pub max_items: i64,
    pub rule: TierRule,
}

impl Tier {
    pub const fn flat(min_items: i64, max_items: i64, cost: i64) -> Self {
        Self {
            min_items,
            max_items,
            rule: TierRule::Flat { cost },
        }
    }

    pub const fn interpolated(min_items: i64, max_items: i64, from: Anchor, to: Anchor) -> Self {
        Self {
            min_items,
            max_items,
            rule: TierRule::Interpolated { from, to },
        }
    }

    /// Check whether `total_items` falls in this tier.
    pub fn contains(&self, total_items: i64) -> bool {
        (self.min_items..=self.max_items).contains(&total_items)
    }

    /// Kind of tier, for labelling.
    pub fn kind(&self) -> TierKind {
        match self.rule {
            TierRule::Flat { .. } => TierKind::Flat,
            TierRule::Interpolated { .. } => TierKind::Interpolated,
        }
    }
}

/// Costs of the two rules that meet at a tier boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundaryCheck {
    /// First item count of the upper tier (or of the tail).
    pub boundary: i64,
    /// Lower tier's rule evaluated at `boundary`.
    pub lower_rule_cost: i64,
    /// Upper tier's rule (or the tail rate) evaluated at `boundary`.
    pub upper_rule_cost: i64,
    /// Whether the lower tier is flat, making a jump intentional.
    pub lower_is_flat: bool,
}

impl BoundaryCheck {
    /// `upper_rule_cost - lower_rule_cost`.
    pub fn delta(&self) -> i64 {
        self.upper_rule_cost - self.lower_rule_cost
    }
}

/// A complete shipping schedule: contiguous tiers starting at one item,
/// then a per-unit tail rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingSchedule {
    pub tiers: Vec<Tier>,
    pub tail_rate: f64,
}

impl Default for ShippingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShippingSchedule {
    /// The schedule agreed with the business.
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
            tail_rate: STANDARD_TAIL_RATE,
        }
    }

    /// Check the structural rules every schedule must follow.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !self.tail_rate.is_finite() || self.tail_rate < 0.0 {
            return Err(CommerceError::InvalidSchedule(format!(
                "tail rate must be a non-negative number, got {}",
                self.tail_rate
            )));
        }

        let mut expected_min = 1_i64;
        for tier in &self.tiers {
            if tier.min_items != expected_min {
                return Err(CommerceError::InvalidSchedule(format!(
                    "tier starting at {} should start at {}",
                    tier.min_items, expected_min
                )));
            }
            if tier.max_items < tier.min_items {
                return Err(CommerceError::InvalidSchedule(format!(
                    "tier {}-{} ends before it starts",
                    tier.min_items, tier.max_items
                )));
            }
            match tier.rule {
                TierRule::Flat { cost } if cost < 0 => {
                    return Err(CommerceError::InvalidSchedule(format!(
                        "tier {}-{} has negative cost {}",
                        tier.min_items, tier.max_items, cost
                    )));
                }
                TierRule::Interpolated { from, to } => {
                    if from.items >= to.items {
                        return Err(CommerceError::InvalidSchedule(format!(
                            "tier {}-{} anchors must increase ({} -> {})",
                            tier.min_items, tier.max_items, from.items, to.items
                        )));
                    }
                    if from.cost < 0 || to.cost < 0 {
                        return Err(CommerceError::InvalidSchedule(format!(
                            "tier {}-{} has a negative anchor cost",
                            tier.min_items, tier.max_items
                        )));
                    }
                }
                TierRule::Flat { .. } => {}
            }
            expected_min = tier.max_items.checked_add(1).ok_or_else(|| {
                CommerceError::InvalidSchedule("tier upper bound overflows".to_string())
            })?;
        }

        Ok(())
    }

    /// The tier covering `total_items`; `None` for empty orders and the tail.
    pub fn tier_for(&self, total_items: i64) -> Option<&Tier> {
        self.view().tier_for(total_items)
    }

    /// Shipping cost in whole currency units.
    pub fn cost_for(&self, total_items: i64) -> i64 {
        self.view().cost_for(total_items)
    }

    /// Shipping cost as `Money` in euros.
    pub fn quote(&self, total_items: i64) -> Money {
        Money::from_units(self.cost_for(total_items), Currency::EUR)
    }

    /// Cost with the label of the tier that produced it.
    pub fn details(&self, total_items: i64) -> ShippingDetails {
        self.view().details(total_items)
    }

    /// Compare neighbouring rules at every tier boundary, including the
    /// hand-off from the last tier to the tail rate.
    pub fn boundary_checks(&self) -> Vec<BoundaryCheck> {
        let mut checks: Vec<BoundaryCheck> = self
            .tiers
            .windows(2)
            .map(|pair| BoundaryCheck {
                boundary: pair[1].min_items,
                lower_rule_cost: pair[0].rule.evaluate(pair[1].min_items),
                upper_rule_cost: pair[1].rule.evaluate(pair[1].min_items),
                lower_is_flat: pair[0].kind() == TierKind::Flat,
            })
            .collect();

        if let Some(last) = self.tiers.last() {
            let boundary = last.max_items.saturating_add(1);
            checks.push(BoundaryCheck {
                boundary,
                lower_rule_cost: last.rule.evaluate(boundary),
                upper_rule_cost: tail_cost(self.tail_rate, boundary),
                lower_is_flat: last.kind() == TierKind::Flat,
            });
        }

        checks
    }

    fn view(&self) -> ScheduleView<'_> {
        ScheduleView {
            tiers: &self.tiers,
            tail_rate: self.tail_rate,
        }
    }
}

pub(crate) fn standard_cost(total_items: i64) -> i64 {
    STANDARD.cost_for(total_items)
}

pub(crate) fn standard_details(total_items: i64) -> ShippingDetails {
    STANDARD.details(total_items)
}

const STANDARD: ScheduleView<'static> = ScheduleView {
    tiers: &STANDARD_TIERS,
    tail_rate: STANDARD_TAIL_RATE,
};

/// Borrowed schedule, so the standard table is evaluated without allocating.
#[derive(Clone, Copy)]
struct ScheduleView<'a> {
    tiers: &'a [Tier],
    tail_rate: f64,
}

enum Matched<'a> {
    Empty,
    Tier(&'a Tier),
    Tail,
}

impl<'a> ScheduleView<'a> {
    fn matched(&self, total_items: i64) -> Matched<'a> {
        if total_items <= 0 {
            return Matched::Empty;
        }
        match self.tier_for(total_items) {
            Some(tier) => Matched::Tier(tier),
            None => Matched::Tail,
        }
    }

    fn tier_for(&self, total_items: i64) -> Option<&'a Tier> {
        if total_items <= 0 {
            return None;
        }
        self.tiers.iter().find(|tier| tier.contains(total_items))
    }

    fn cost_for(&self, total_items: i64) -> i64 {
        let cost = match self.matched(total_items) {
            Matched::Empty => 0,
            Matched::Tier(tier) => tier.rule.evaluate(total_items),
            Matched::Tail => tail_cost(self.tail_rate, total_items),
        };
        cost.max(0)
    }

    fn details(&self, total_items: i64) -> ShippingDetails {
        let cost = self.cost_for(total_items);
        match self.matched(total_items) {
            Matched::Empty => ShippingDetails::empty(total_items),
            Matched::Tier(tier) => ShippingDetails::for_tier(total_items, cost, tier),
            Matched::Tail => ShippingDetails::for_tail(total_items, cost, self.tail_rate),
        }
    }
}

/// Float-to-int `as` saturates, so huge counts cannot overflow.
fn tail_cost(tail_rate: f64, total_items: i64) -> i64 {
    (total_items as f64 * tail_rate).round() as i64
}
