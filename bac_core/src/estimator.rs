//! BAC point estimators.
//!
//! Two models over the same session snapshot:
//! - `naive_bac`: instantaneous absorption, single elimination clock
//!   running from the first drink.
//! - `projected_bac`: per-drink absorption lag plus first-order uptake,
//!   with a per-drink elimination clock starting at that drink's
//!   absorption onset.
//!
//! The two elimination-clock semantics differ on purpose and are kept
//! as two named, independently testable models; do not quietly unify
//! them.
//!
//! Both are pure functions of (time, session, profile, diet flag): no
//! internal state, no mutation of inputs, safe to call from any thread
//! holding immutable snapshots.

use crate::params::PkParams;
use crate::types::{DrinkSession, Profile};
use chrono::{DateTime, Utc};

/// Widmark conversion: ethanol mass in the body to a %BAC figure
///
/// `grams / (weight_g * r) * 100`, with the profile's clamped weight.
pub fn widmark_percent(grams: f64, profile: &Profile) -> f64 {
    let body_mass_grams = profile.clamped_weight_kg() * 1000.0;
    grams / (body_mass_grams * profile.distribution_ratio()) * 100.0
}

/// Instantaneous-absorption BAC estimate
///
/// Sums ethanol over all entries started at or before `at` as if fully
/// absorbed, then subtracts `beta * hours` on a single clock running
/// from the first drink regardless of how many follow. Empty sessions
/// yield 0.
pub fn naive_bac(
    at: DateTime<Utc>,
    session: &DrinkSession,
    profile: &Profile,
    pk: &PkParams,
) -> f64 {
    let Some(first_started) = session.first_started_at() else {
        return 0.0;
    };

    let grams_consumed: f64 = session
        .entries
        .iter()
        .filter(|e| e.started_at <= at)
        .map(|e| e.drink.ethanol_grams())
        .sum();

    let distribution = widmark_percent(grams_consumed, profile);

    let hours_since_start = (hours_between(first_started, at)).max(0.0);
    let eliminated = pk.beta_percent_per_hour * hours_since_start;

    (distribution - eliminated).max(0.0)
}

/// Absorption-model BAC estimate (the primary model)
///
/// Each entry contributes independently:
/// - nothing before its absorption lag elapses;
/// - afterwards, first-order uptake `1 - e^(-ka * dt)` of its ethanol,
///   capped at the full amount;
/// - minus `beta * dt` of elimination on that drink's own clock,
///   clamped so no single drink contributes negatively.
///
/// Summation is commutative, so entry order cannot affect the result.
/// Empty sessions yield 0.
pub fn projected_bac(
    at: DateTime<Utc>,
    session: &DrinkSession,
    profile: &Profile,
    eaten: bool,
    pk: &PkParams,
) -> f64 {
    let absorption = pk.absorption(eaten);
    let lag_hours = absorption.lag_minutes / 60.0;

    let mut total = 0.0;

    for entry in &session.entries {
        // Future drinks contribute nothing
        if entry.started_at > at {
            continue;
        }

        let elapsed_hours = hours_between(entry.started_at, at);
        if elapsed_hours <= lag_hours {
            // Still in lag phase
            continue;
        }

        let dt_hours = elapsed_hours - lag_hours;
        let grams = entry.drink.ethanol_grams();

        let fraction_absorbed = 1.0 - (-absorption.ka_per_hour * dt_hours).exp();
        let absorbed_grams = (grams * fraction_absorbed).min(grams);

        let gross = widmark_percent(absorbed_grams, profile);
        let eliminated = pk.beta_percent_per_hour * dt_hours;

        total += (gross - eliminated).max(0.0);
    }

    total.max(0.0)
}

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}
