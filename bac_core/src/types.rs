//! Core domain types for the BAC estimation system.
//!
//! This module defines the fundamental types used throughout the system:
//! - The physiological profile and its derived Widmark distribution ratio
//! - Drinks and logged intake entries
//! - Drink sessions (the collaborator-owned collection of entries)
//! - The drinking plan (target BAC plus the planned next drink)

use crate::params::{ETHANOL_DENSITY_G_PER_ML, MIN_BODY_WEIGHT_KG};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex, as used by the Watson total-body-water formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    Male,
    Female,
}

/// Physiological profile of the person being modeled
///
/// The profile is an immutable snapshot for the duration of an engine
/// query; it is owned and mutated only by the surrounding application.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub age_years: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: BiologicalSex,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age_years: 21,
            weight_kg: 70.0,
            height_cm: 175.0,
            sex: BiologicalSex::Male,
        }
    }
}

impl Profile {
    /// Body weight with the non-physical floor applied
    ///
    /// Weights at or below zero would make the Widmark division blow up,
    /// so anything under `MIN_BODY_WEIGHT_KG` is clamped rather than
    /// reported as an error.
    pub fn clamped_weight_kg(&self) -> f64 {
        self.weight_kg.max(MIN_BODY_WEIGHT_KG)
    }

    /// Total body water in liters, per the Watson formula
    pub fn total_body_water_l(&self) -> f64 {
        let weight = self.clamped_weight_kg();
        match self.sex {
            BiologicalSex::Male => {
                2.447 - 0.09156 * self.age_years as f64 + 0.1074 * self.height_cm + 0.3362 * weight
            }
            BiologicalSex::Female => -2.097 + 0.1069 * self.height_cm + 0.2466 * weight,
        }
    }

    /// Widmark distribution ratio `r` (dimensionless)
    ///
    /// Body-water-based factor converting ingested ethanol mass to a
    /// blood-concentration percentage.
    pub fn distribution_ratio(&self) -> f64 {
        self.total_body_water_l() / self.clamped_weight_kg()
    }
}

// ============================================================================
// Drink Types
// ============================================================================

/// Broad category of drink, used for default servings
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DrinkCategory {
    Beer,
    Wine,
    Cocktail,
    Spirit,
}

impl DrinkCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            DrinkCategory::Beer => "Beer",
            DrinkCategory::Wine => "Wine",
            DrinkCategory::Cocktail => "Cocktail",
            DrinkCategory::Spirit => "Spirit",
        }
    }
}

/// A drink: a volume of liquid at a given alcohol-by-volume strength
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Drink {
    pub category: DrinkCategory,
    pub name: String,
    pub volume_ml: f64,
    pub abv_percent: f64,
}

impl Drink {
    /// Mass of pure ethanol in this drink, in grams
    pub fn ethanol_grams(&self) -> f64 {
        self.volume_ml * (self.abv_percent / 100.0) * ETHANOL_DENSITY_G_PER_ML
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// A single logged intake event
///
/// Immutable once created. The engine never mutates entries; the
/// collaborator appends them to the session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkEntry {
    pub id: Uuid,
    pub drink: Drink,
    pub started_at: DateTime<Utc>,
}

impl DrinkEntry {
    pub fn new(drink: Drink, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            drink,
            started_at,
        }
    }
}

/// A drinking session: the collection of intake entries the estimators
/// operate over
///
/// Entry order must not affect any estimator output; the engine treats
/// the collection as unordered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkSession {
    pub id: Uuid,
    pub entries: Vec<DrinkEntry>,
}

impl Default for DrinkSession {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
        }
    }
}

impl DrinkSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the earliest entry, if any
    ///
    /// The naive estimator's elimination clock starts here.
    pub fn first_started_at(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.started_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Plan and State Types
// ============================================================================

/// The drinking plan: the BAC the user wants to stay at or under, and
/// the drink they intend to take next
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BacPlan {
    pub target_bac: f64,
    pub next_drink: Drink,
    pub eaten: bool,
}

impl Default for BacPlan {
    fn default() -> Self {
        Self {
            target_bac: 0.06,
            next_drink: crate::catalog::default_drink(DrinkCategory::Beer),
            eaten: false,
        }
    }
}

/// Persistent user state across CLI invocations
///
/// Holds everything the collaborator owns between engine queries: the
/// profile and the current plan. The drink journal is stored separately.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserState {
    pub profile: Profile,
    pub plan: BacPlan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watson_body_water_male() {
        // 21y, 175cm, 70kg male from the Watson paper worked example
        let profile = Profile::default();
        let tbw = profile.total_body_water_l();
        assert!((tbw - 42.85324).abs() < 1e-5);
        assert!((profile.distribution_ratio() - 0.6122).abs() < 1e-4);
    }

    #[test]
    fn test_watson_body_water_female_has_no_age_term() {
        let mut profile = Profile {
            sex: BiologicalSex::Female,
            ..Profile::default()
        };
        let tbw = profile.total_body_water_l();
        assert!((tbw - 33.8725).abs() < 1e-4);

        // Age must not change the female formula
        profile.age_years = 60;
        assert!((profile.total_body_water_l() - tbw).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_is_clamped() {
        let profile = Profile {
            weight_kg: 0.0,
            ..Profile::default()
        };
        let ratio = profile.distribution_ratio();
        assert!(ratio.is_finite());
        assert!(ratio > 0.0);
    }

    #[test]
    fn test_ethanol_grams_standard_drink() {
        // 44 mL at 40% ABV is roughly one US standard drink (~14 g)
        let drink = Drink {
            category: DrinkCategory::Spirit,
            name: "Std".into(),
            volume_ml: 44.0,
            abv_percent: 40.0,
        };
        assert!((drink.ethanol_grams() - 13.8864).abs() < 1e-4);
    }

    #[test]
    fn test_first_started_at_is_minimum() {
        let t0 = Utc::now();
        let drink = crate::catalog::default_drink(DrinkCategory::Beer);
        let mut session = DrinkSession::new();
        session
            .entries
            .push(DrinkEntry::new(drink.clone(), t0 + chrono::Duration::minutes(30)));
        session.entries.push(DrinkEntry::new(drink, t0));
        assert_eq!(session.first_started_at(), Some(t0));
    }

    #[test]
    fn test_empty_session_has_no_first_entry() {
        assert_eq!(DrinkSession::new().first_started_at(), None);
    }
}
