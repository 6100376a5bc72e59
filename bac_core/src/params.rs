//! Model parameters and their documented defaults.
//!
//! Every constant the engine uses is overridable: the estimators and
//! solvers take these structs by reference, and the config file can
//! replace any field. The defaults are population averages, not
//! clinically calibrated values.

use serde::{Deserialize, Serialize};

/// Density of ethanol in g/mL
pub const ETHANOL_DENSITY_G_PER_ML: f64 = 0.789;

/// Floor applied to body weight before any Widmark division
pub const MIN_BODY_WEIGHT_KG: f64 = 1.0;

/// Absorption-phase parameters for one gastric state
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AbsorptionParams {
    /// Delay between ingestion and onset of measurable absorption
    pub lag_minutes: f64,

    /// First-order absorption rate constant
    pub ka_per_hour: f64,
}

/// Pharmacokinetic model parameters
///
/// Fed meals slow gastric emptying, so the fed state carries a longer
/// lag and a lower absorption rate than the fasted state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PkParams {
    /// Constant-rate elimination β, in %BAC per hour
    #[serde(default = "default_beta")]
    pub beta_percent_per_hour: f64,

    #[serde(default = "default_fasted")]
    pub fasted: AbsorptionParams,

    #[serde(default = "default_fed")]
    pub fed: AbsorptionParams,

    /// Step size for the decay forecast series
    #[serde(default = "default_decay_step_minutes")]
    pub decay_step_minutes: u32,
}

impl Default for PkParams {
    fn default() -> Self {
        Self {
            beta_percent_per_hour: default_beta(),
            fasted: default_fasted(),
            fed: default_fed(),
            decay_step_minutes: default_decay_step_minutes(),
        }
    }
}

impl PkParams {
    /// Absorption parameters for the given gastric state
    pub fn absorption(&self, eaten: bool) -> AbsorptionParams {
        if eaten {
            self.fed
        } else {
            self.fasted
        }
    }
}

/// Root-finder parameters
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SolverParams {
    /// Bisection stops once the bracket is narrower than this
    #[serde(default = "default_tolerance_seconds")]
    pub tolerance_seconds: f64,

    /// Initial bracket width before doubling begins
    #[serde(default = "default_bracket_seed_minutes")]
    pub bracket_seed_minutes: f64,

    /// Overall search horizon; targets not crossed within it are
    /// reported as unreachable
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: f64,

    /// How far ahead the stability check scans for a rise back above
    /// the target
    #[serde(default = "default_lookahead_hours")]
    pub lookahead_hours: f64,

    /// Sampling step of the stability scan
    #[serde(default = "default_lookahead_step_minutes")]
    pub lookahead_step_minutes: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance_seconds: default_tolerance_seconds(),
            bracket_seed_minutes: default_bracket_seed_minutes(),
            horizon_hours: default_horizon_hours(),
            lookahead_hours: default_lookahead_hours(),
            lookahead_step_minutes: default_lookahead_step_minutes(),
        }
    }
}

// Default value functions

fn default_beta() -> f64 {
    0.015
}

fn default_fasted() -> AbsorptionParams {
    AbsorptionParams {
        lag_minutes: 12.0,
        ka_per_hour: 1.0,
    }
}

fn default_fed() -> AbsorptionParams {
    AbsorptionParams {
        lag_minutes: 25.0,
        ka_per_hour: 0.5,
    }
}

fn default_decay_step_minutes() -> u32 {
    5
}

fn default_tolerance_seconds() -> f64 {
    30.0
}

fn default_bracket_seed_minutes() -> f64 {
    15.0
}

fn default_horizon_hours() -> f64 {
    24.0
}

fn default_lookahead_hours() -> f64 {
    2.0
}

fn default_lookahead_step_minutes() -> f64 {
    5.0
}
