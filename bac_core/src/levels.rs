//! Buzz-level classification of a BAC value.
//!
//! Nine bands from sober to coma, used for human-readable status output
//! and for picking a plan target by named level.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Discrete impairment band for a BAC percentage
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuzzLevel {
    Sober,
    Lightheaded,
    Buzzed,
    LegallyIntoxicated,
    Drunk,
    VeryDrunk,
    DazedAndConfused,
    Stupor,
    Coma,
}

impl BuzzLevel {
    /// All levels in ascending BAC order
    pub const ALL: [BuzzLevel; 9] = [
        BuzzLevel::Sober,
        BuzzLevel::Lightheaded,
        BuzzLevel::Buzzed,
        BuzzLevel::LegallyIntoxicated,
        BuzzLevel::Drunk,
        BuzzLevel::VeryDrunk,
        BuzzLevel::DazedAndConfused,
        BuzzLevel::Stupor,
        BuzzLevel::Coma,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BuzzLevel::Sober => "Sober",
            BuzzLevel::Lightheaded => "Mild Effects (Lightheaded)",
            BuzzLevel::Buzzed => "Buzzed",
            BuzzLevel::LegallyIntoxicated => "Legally Intoxicated",
            BuzzLevel::Drunk => "Drunk",
            BuzzLevel::VeryDrunk => "Very Drunk",
            BuzzLevel::DazedAndConfused => "Dazed and Confused",
            BuzzLevel::Stupor => "Stupor",
            BuzzLevel::Coma => "Coma",
        }
    }

    /// Lower BAC bound of this band (inclusive)
    pub fn lower_bound_bac(&self) -> f64 {
        match self {
            BuzzLevel::Sober => 0.0,
            BuzzLevel::Lightheaded => 0.02,
            BuzzLevel::Buzzed => 0.05,
            BuzzLevel::LegallyIntoxicated => 0.08,
            BuzzLevel::Drunk => 0.11,
            BuzzLevel::VeryDrunk => 0.16,
            BuzzLevel::DazedAndConfused => 0.20,
            BuzzLevel::Stupor => 0.25,
            BuzzLevel::Coma => 0.31,
        }
    }

    /// Upper BAC bound of this band (exclusive)
    pub fn upper_bound_bac(&self) -> f64 {
        match self {
            BuzzLevel::Sober => 0.02,
            BuzzLevel::Lightheaded => 0.05,
            BuzzLevel::Buzzed => 0.08,
            BuzzLevel::LegallyIntoxicated => 0.11,
            BuzzLevel::Drunk => 0.16,
            BuzzLevel::VeryDrunk => 0.20,
            BuzzLevel::DazedAndConfused => 0.25,
            BuzzLevel::Stupor => 0.31,
            BuzzLevel::Coma => f64::INFINITY,
        }
    }

    /// Midpoint of the band, or the lower bound for the unbounded top band
    pub fn representative_bac(&self) -> f64 {
        let upper = self.upper_bound_bac();
        if upper.is_infinite() {
            return self.lower_bound_bac();
        }
        (self.lower_bound_bac() + upper) / 2.0
    }

    /// Classify a BAC percentage into its band
    pub fn from_bac(bac: f64) -> BuzzLevel {
        // Walk bands top-down; anything below the lowest bound is sober
        for level in Self::ALL.iter().rev() {
            if bac >= level.lower_bound_bac() {
                return *level;
            }
        }
        BuzzLevel::Sober
    }
}

impl FromStr for BuzzLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "sober" => Ok(BuzzLevel::Sober),
            "lightheaded" => Ok(BuzzLevel::Lightheaded),
            "buzzed" => Ok(BuzzLevel::Buzzed),
            "legally_intoxicated" => Ok(BuzzLevel::LegallyIntoxicated),
            "drunk" => Ok(BuzzLevel::Drunk),
            "very_drunk" => Ok(BuzzLevel::VeryDrunk),
            "dazed_and_confused" => Ok(BuzzLevel::DazedAndConfused),
            "stupor" => Ok(BuzzLevel::Stupor),
            "coma" => Ok(BuzzLevel::Coma),
            other => Err(format!("Unknown buzz level: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(BuzzLevel::from_bac(0.0), BuzzLevel::Sober);
        assert_eq!(BuzzLevel::from_bac(0.019), BuzzLevel::Sober);
        assert_eq!(BuzzLevel::from_bac(0.02), BuzzLevel::Lightheaded);
        assert_eq!(BuzzLevel::from_bac(0.079), BuzzLevel::Buzzed);
        assert_eq!(BuzzLevel::from_bac(0.08), BuzzLevel::LegallyIntoxicated);
        assert_eq!(BuzzLevel::from_bac(0.5), BuzzLevel::Coma);
    }

    #[test]
    fn test_negative_bac_is_sober() {
        assert_eq!(BuzzLevel::from_bac(-0.01), BuzzLevel::Sober);
    }

    #[test]
    fn test_bands_tile_without_gaps() {
        for pair in BuzzLevel::ALL.windows(2) {
            assert_eq!(pair[0].upper_bound_bac(), pair[1].lower_bound_bac());
        }
    }

    #[test]
    fn test_representative_bac() {
        assert!((BuzzLevel::Buzzed.representative_bac() - 0.065).abs() < 1e-12);
        // The unbounded top band falls back to its lower bound
        assert_eq!(BuzzLevel::Coma.representative_bac(), 0.31);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("buzzed".parse::<BuzzLevel>().unwrap(), BuzzLevel::Buzzed);
        assert_eq!(
            "Legally Intoxicated".parse::<BuzzLevel>().unwrap(),
            BuzzLevel::LegallyIntoxicated
        );
        assert_eq!(
            "very-drunk".parse::<BuzzLevel>().unwrap(),
            BuzzLevel::VeryDrunk
        );
        assert!("tipsy".parse::<BuzzLevel>().is_err());
    }
}
