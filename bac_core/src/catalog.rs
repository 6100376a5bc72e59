//! Default drink catalog.
//!
//! One default serving per category, each close to one US standard
//! drink (~14 g ethanol). Used when the user logs a drink by category
//! without spelling out volume and strength.

use crate::types::{Drink, DrinkCategory};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default servings - built once and reused across all operations
static DEFAULT_DRINKS: Lazy<HashMap<DrinkCategory, Drink>> = Lazy::new(build_default_drinks);

/// Default serving for the given category
pub fn default_drink(category: DrinkCategory) -> Drink {
    DEFAULT_DRINKS
        .get(&category)
        .cloned()
        .unwrap_or_else(|| build_drink(category))
}

fn build_default_drinks() -> HashMap<DrinkCategory, Drink> {
    let mut drinks = HashMap::new();
    for category in [
        DrinkCategory::Beer,
        DrinkCategory::Wine,
        DrinkCategory::Cocktail,
        DrinkCategory::Spirit,
    ] {
        drinks.insert(category, build_drink(category));
    }
    drinks
}

fn build_drink(category: DrinkCategory) -> Drink {
    match category {
        // 12 oz at 5%
        DrinkCategory::Beer => Drink {
            category,
            name: "Beer".into(),
            volume_ml: 355.0,
            abv_percent: 5.0,
        },
        // 5 oz at 12%
        DrinkCategory::Wine => Drink {
            category,
            name: "Wine".into(),
            volume_ml: 148.0,
            abv_percent: 12.0,
        },
        // One 1.5 oz spirit pour mixed, counted as its spirit content
        DrinkCategory::Cocktail => Drink {
            category,
            name: "Cocktail".into(),
            volume_ml: 44.0,
            abv_percent: 40.0,
        },
        // 1.5 oz at 40%
        DrinkCategory::Spirit => Drink {
            category,
            name: "Spirit".into(),
            volume_ml: 44.0,
            abv_percent: 40.0,
        },
    }
}
