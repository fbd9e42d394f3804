//! Money type for representing monetary values.
//!
//! Amounts are integer cents. Shipping fees are whole euros but still flow
//! through `Money` so order totals never mix units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole currency units, saturating on overflow.
    ///
    /// ```
    /// use wholesale_commerce::money::{Money, Currency};
    /// let fee = Money::from_units(172, Currency::EUR);
    /// assert_eq!(fee.amount_cents, 17200);
    /// ```
    pub fn from_units(units: i64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        Self::new(units.saturating_mul(multiplier), currency)
    }

    /// Create a Money value from a decimal amount.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format with a leading symbol (e.g., "€49.99").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Format the way the French storefront shows prices (e.g., "1 234,50 €").
    ///
    /// Thousands are grouped with a narrow no-break space and the symbol is
    /// separated by a no-break space, as `Intl.NumberFormat("fr-FR")` does.
    pub fn display_fr(&self) -> String {
        let divisor = 10_u64.pow(self.currency.decimal_places());
        let abs = self.amount_cents.unsigned_abs();
        format_fr(
            self.amount_cents < 0,
            abs / divisor,
            abs % divisor,
            self.currency,
        )
    }

    /// [`Money::display_fr`] for a whole-unit amount too large to hold in
    /// cents.
    ///
    /// ```
    /// use wholesale_commerce::money::{Money, Currency};
    /// assert_eq!(
    ///     Money::display_units_fr(158_000_000_000_000_000, Currency::EUR),
    ///     "158\u{202f}000\u{202f}000\u{202f}000\u{202f}000\u{202f}000,00\u{a0}€"
    /// );
    /// ```
    pub fn display_units_fr(units: i64, currency: Currency) -> String {
        format_fr(units < 0, units.unsigned_abs(), 0, currency)
    }

    /// [`Money::display`] for a whole-unit amount too large to hold in cents.
    pub fn display_units(units: i64, currency: Currency) -> String {
        let places = currency.decimal_places() as usize;
        format!("{}{}.{:0places$}", currency.symbol(), units, 0)
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Option<Money>;

    fn add(self, other: Money) -> Option<Money> {
        self.try_add(&other)
    }
}

impl Sub for Money {
    type Output = Option<Money>;

    fn sub(self, other: Money) -> Option<Money> {
        self.try_subtract(&other)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn format_fr(negative: bool, units: u64, fraction: u64, currency: Currency) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{202f}');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    let places = currency.decimal_places() as usize;
    format!(
        "{}{},{:0places$}\u{a0}{}",
        sign,
        grouped,
        fraction,
        currency.symbol()
    )
}
