//! Stepped decay forecast: BAC decline assuming no further drinks.

use chrono::{DateTime, Duration, Utc};

/// Forecast of BAC decline from `initial_bac` at constant elimination
///
/// Returns `(timestamp, bac)` pairs starting at `(start, initial_bac)`,
/// dropping `beta * step/60` per step, ending at the first step where
/// the clamped value reaches zero. A non-positive starting BAC yields
/// the single pair `(start, 0)`.
pub fn decay_series(
    start: DateTime<Utc>,
    initial_bac: f64,
    step_minutes: u32,
    beta_percent_per_hour: f64,
) -> Vec<(DateTime<Utc>, f64)> {
    if initial_bac <= 0.0 {
        return vec![(start, 0.0)];
    }

    // A zero step or non-positive beta would never reach zero
    let step_minutes = step_minutes.max(1);
    let drop_per_step = beta_percent_per_hour * (step_minutes as f64 / 60.0);
    if drop_per_step <= 0.0 {
        return vec![(start, initial_bac)];
    }

    let step = Duration::minutes(step_minutes as i64);
    let mut t = start;
    let mut bac = initial_bac;
    let mut out = vec![(t, bac)];

    while bac > 0.0 {
        t += step;
        bac = (bac - drop_per_step).max(0.0);
        out.push((t, bac));
    }
    out
}

/// Closed-form hours until a BAC value decays to zero
pub fn time_to_zero_hours(bac: f64, beta_percent_per_hour: f64) -> f64 {
    if bac <= 0.0 {
        return 0.0;
    }
    bac / beta_percent_per_hour.max(1e-9)
}
