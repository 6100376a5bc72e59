//! Root finding for "when does the BAC curve reach a target".
//!
//! The projected-BAC curve can rise while drinks are still absorbing
//! and falls afterwards, so a plain downhill search is not enough. The
//! shared routine answers: smallest `dt >= 0` with `f(dt) <= 0`, where
//! `f` is eventually non-increasing but may rise early.
//!
//! Three phases:
//! 1. immediate check at `dt = 0`, with a sampled lookahead to reject
//!    answers that are about to be overturned by ongoing absorption;
//! 2. bracket expansion, doubling from a seed until the sign flips or
//!    the horizon caps out;
//! 3. bisection down to the configured tolerance.
//!
//! The lookahead is a discretized heuristic: a spike shorter than its
//! sampling step can slip between samples, and oscillation past the
//! window produces a best-effort, possibly early, answer. That is an
//! accepted approximation, not a bug to fix silently.

use crate::estimator::{projected_bac, widmark_percent};
use crate::params::{PkParams, SolverParams};
use crate::types::{Drink, DrinkSession, Profile};
use chrono::{DateTime, Duration, Utc};

/// Hard stop for bisection; the tolerance normally converges in well
/// under 40 halvings of a 24-hour bracket
const MAX_BISECT_ITERATIONS: usize = 200;

/// Earliest absolute time at which projected BAC is at or below `target_bac`
///
/// The answer is stable against the lookahead window: if BAC is under
/// the target now but a still-absorbing drink will push it back over,
/// the search continues past that rise. Returns `None` when the target
/// is not crossed within the solver horizon ("more than the horizon
/// away", not an error).
pub fn time_to_reach(
    target_bac: f64,
    from: DateTime<Utc>,
    session: &DrinkSession,
    profile: &Profile,
    eaten: bool,
    pk: &PkParams,
    solver: &SolverParams,
) -> Option<DateTime<Utc>> {
    let f = |dt_seconds: f64| {
        projected_bac(at_offset(from, dt_seconds), session, profile, eaten, pk) - target_bac
    };
    first_time_at_or_below(f, solver).map(|dt| at_offset(from, dt))
}

/// Earliest absolute time at which taking `next_drink` would still keep
/// BAC at or under `target_bac`
///
/// Pessimistic: the candidate drink is charged as if fully absorbed the
/// instant it is taken, so the answer is conservative by construction.
pub fn time_safe_for_next_drink(
    target_bac: f64,
    next_drink: &Drink,
    from: DateTime<Utc>,
    session: &DrinkSession,
    profile: &Profile,
    eaten: bool,
    pk: &PkParams,
    solver: &SolverParams,
) -> Option<DateTime<Utc>> {
    let worst_case_delta = widmark_percent(next_drink.ethanol_grams(), profile);
    let f = |dt_seconds: f64| {
        projected_bac(at_offset(from, dt_seconds), session, profile, eaten, pk)
            + worst_case_delta
            - target_bac
    };
    first_time_at_or_below(f, solver).map(|dt| at_offset(from, dt))
}

/// Shared bracket-and-bisect search over offsets in seconds
///
/// Assumes at most one rise-then-fall transition inside the lookahead
/// window; `f(lo) > 0 >= f(hi)` is maintained through bisection except
/// after a lookahead restart, where `lo` is the last sample known to be
/// at or below zero and the returned `hi` still satisfies `f(hi) <= 0`.
fn first_time_at_or_below<F>(f: F, solver: &SolverParams) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let horizon = solver.horizon_hours * 3600.0;
    let step = solver.lookahead_step_minutes * 60.0;
    let lookahead = (solver.lookahead_hours * 3600.0).min(horizon);

    let mut lo = 0.0;

    if f(0.0) <= 0.0 {
        // Already at/below target. Scan ahead for a rise driven by
        // drinks still absorbing; if none, now is the answer.
        match first_rise_within(&f, step, lookahead) {
            None => return Some(0.0),
            // Restart from the last sample still at/below the target
            Some(k) => lo = (k - 1) as f64 * step,
        }
    }

    // Bracket: expand hi from the seed until the sign flips or the
    // horizon caps out with the target still unreached.
    let mut hi = (lo + solver.bracket_seed_minutes * 60.0).min(horizon);
    while f(hi) > 0.0 {
        if hi >= horizon {
            return None;
        }
        lo = hi;
        hi = (hi * 2.0).min(horizon);
    }

    // Bisect down to tolerance; return the rightmost point known to
    // satisfy the condition.
    let mut iterations = 0;
    while hi - lo > solver.tolerance_seconds && iterations < MAX_BISECT_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if f(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    Some(hi)
}

/// Index of the first lookahead sample strictly above zero, if any
fn first_rise_within<F>(f: &F, step_seconds: f64, window_seconds: f64) -> Option<usize>
where
    F: Fn(f64) -> f64,
{
    if step_seconds <= 0.0 {
        return None;
    }
    let mut k = 1usize;
    while k as f64 * step_seconds <= window_seconds {
        if f(k as f64 * step_seconds) > 0.0 {
            return Some(k);
        }
        k += 1;
    }
    None
}

fn at_offset(from: DateTime<Utc>, dt_seconds: f64) -> DateTime<Utc> {
    from + Duration::milliseconds((dt_seconds * 1000.0).round() as i64)
}
