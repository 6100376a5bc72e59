#![forbid(unsafe_code)]

//! Core domain model and estimation engine for the Buzz BAC tracker.
//!
//! This crate provides:
//! - Domain types (profile, drinks, sessions, plans)
//! - The pharmacokinetic estimators (naive and absorption models)
//! - Decay forecasting and target-time root finding
//! - Persistence (drink journal, CSV rollup, state)
//!
//! The engine itself is pure: estimators and solvers are functions of
//! `(time, session, profile, diet flag)` over immutable snapshots, with
//! no internal state and no I/O. The persistence modules exist for the
//! surrounding application, which owns the session and profile between
//! queries.

pub mod types;
pub mod error;
pub mod params;
pub mod levels;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod estimator;
pub mod decay;
pub mod solver;
pub mod journal;
pub mod csv_rollup;
pub mod state;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use levels::BuzzLevel;
pub use params::{AbsorptionParams, PkParams, SolverParams};
pub use catalog::default_drink;
pub use config::Config;
pub use estimator::{naive_bac, projected_bac, widmark_percent};
pub use decay::{decay_series, time_to_zero_hours};
pub use solver::{time_safe_for_next_drink, time_to_reach};
pub use journal::{load_session, read_entries, EntrySink, JsonlSink};
