//! Interest rate derivation and daily compounding.
//!
//! The rate comes from an ordered rule table over the student's age and sex.
//! Rules are applied top to bottom and are not mutually exclusive: a `Set`
//! rule overwrites the running rate, an `Add` rule adds to it. Accrual uses a
//! single formula everywhere: `amount * (1 + monthly_percent / 30 / 100)^days`.

use chrono::{DateTime, Utc};

/// Days in the nominal month used to turn a monthly rate into a daily one.
pub const DAYS_PER_MONTH: f64 = 30.0;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RateEffect {
    Set(f64),
    Add(f64),
}

#[derive(Debug, Clone, Copy)]
enum Condition {
    AgeBelow(u32),
    Female,
}

impl Condition {
    fn holds(self, age: u32, is_female: bool) -> bool {
        match self {
            Condition::AgeBelow(limit) => age < limit,
            Condition::Female => is_female,
        }
    }
}

/// Order matters: the under-18 rule overwrites the under-21 rule.
const RATE_RULES: &[(Condition, RateEffect)] = &[
    (Condition::AgeBelow(21), RateEffect::Set(0.1)),
    (Condition::AgeBelow(18), RateEffect::Set(0.2)),
    (Condition::Female, RateEffect::Add(0.1)),
];

/// Monthly interest rate as a decimal (0.3 means 30% per month).
pub fn derive_interest_rate(age: u32, is_female: bool) -> f64 {
    RATE_RULES
        .iter()
        .filter(|(condition, _)| condition.holds(age, is_female))
        .fold(0.0, |rate, (_, effect)| match effect {
            RateEffect::Set(value) => *value,
            RateEffect::Add(value) => rate + value,
        })
}

/// Monthly percent stored on a debt, e.g. `30.0` for a 17-year-old female.
pub fn monthly_percent(age: u32, is_female: bool) -> f64 {
    round_to(derive_interest_rate(age, is_female) * 100.0, 10)
}

/// Which call site is accruing. Both share the same formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccrualMode {
    /// Pre-accrual up to a future date supplied when the debt is created.
    Creation,
    /// Batch recompute from the last accrual date up to now.
    Periodic,
}

impl std::fmt::Display for AccrualMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccrualMode::Creation => write!(f, "creation"),
            AccrualMode::Periodic => write!(f, "periodic"),
        }
    }
}

/// Daily rate derived from a monthly percent (30 -> 0.01).
pub fn daily_rate(monthly_percent: f64) -> f64 {
    monthly_percent / DAYS_PER_MONTH / 100.0
}

/// Compound `amount` daily for `days_elapsed` days. Full precision, no rounding.
pub fn accrue_interest(amount: f64, monthly_percent: f64, days_elapsed: u32, mode: AccrualMode) -> f64 {
    if days_elapsed == 0 {
        return amount;
    }
    let factor = (1.0 + daily_rate(monthly_percent)).powi(days_elapsed.min(i32::MAX as u32) as i32);
    let total = amount * factor;
    tracing::trace!(%mode, amount, monthly_percent, days_elapsed, total, "accrued interest");
    total
}

/// Whole days from `from` to `to`, any partial day counting as a full one.
///
/// Returns `None` when `to` is before `from`.
pub fn days_between_ceil(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<u32> {
    let millis = (to - from).num_milliseconds();
    if millis < 0 {
        return None;
    }
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    Some(u32::try_from(days).unwrap_or(u32::MAX))
}

/// Outcome of one periodic accrual step for a single debt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeriodicOutcome {
    /// Already accrued today.
    SameDay,
    /// Last accrual lies in the future relative to `now`.
    Ahead,
    Accrued { days: u32, total_amount: f64 },
}

/// Decide how a debt last accrued at `accrued_through` moves forward to `now`.
pub fn periodic_step(
    total_amount: f64,
    monthly_percent: f64,
    accrued_through: DateTime<Utc>,
    now: DateTime<Utc>,
) -> PeriodicOutcome {
    if accrued_through.date_naive() == now.date_naive() {
        return PeriodicOutcome::SameDay;
    }
    match days_between_ceil(accrued_through, now) {
        None => PeriodicOutcome::Ahead,
        Some(days) => PeriodicOutcome::Accrued {
            days,
            total_amount: accrue_interest(total_amount, monthly_percent, days, AccrualMode::Periodic),
        },
    }
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Two-decimal presentation of a money amount.
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}
