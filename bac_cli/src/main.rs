use bac_core::*;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buzz")]
#[command(about = "Blood alcohol content estimation and drink planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current BAC estimates and plan advice (default)
    Status {
        /// Evaluate at this RFC 3339 timestamp instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Log a drink to the current session
    Drink {
        /// Drink category (beer, wine, cocktail, spirit)
        #[arg(long, default_value = "beer")]
        category: String,

        /// Volume in milliliters (category default serving if omitted)
        #[arg(long)]
        volume_ml: Option<f64>,

        /// Alcohol by volume in percent (category default if omitted)
        #[arg(long)]
        abv: Option<f64>,

        /// Free-form name for the drink
        #[arg(long)]
        name: Option<String>,

        /// Started at this RFC 3339 timestamp instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Show or update the physiological profile
    Profile {
        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        weight_kg: Option<f64>,

        #[arg(long)]
        height_cm: Option<f64>,

        /// Biological sex (male, female)
        #[arg(long)]
        sex: Option<String>,
    },

    /// Show or update the drinking plan
    Plan {
        /// Target by named buzz level (sober, lightheaded, buzzed, ...)
        #[arg(long, conflicts_with = "target_bac")]
        level: Option<String>,

        /// Target as a raw BAC percentage
        #[arg(long)]
        target_bac: Option<f64>,

        /// Category of the planned next drink
        #[arg(long)]
        category: Option<String>,

        /// Whether drinking on a full stomach
        #[arg(long)]
        eaten: Option<bool>,
    },

    /// Print a decay forecast from the current projected BAC
    Forecast {
        /// Evaluate from this RFC 3339 timestamp instead of now
        #[arg(long)]
        at: Option<String>,

        /// Step size in minutes
        #[arg(long)]
        step_minutes: Option<u32>,
    },

    /// Roll the drink journal up to CSV and end the session
    Archive {
        /// Delete archived journal files afterwards
        #[arg(long)]
        cleanup: bool,
    },
}

fn main() -> Result<()> {
    bac_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Status { at }) => cmd_status(&data_dir, at, &config),
        Some(Commands::Drink {
            category,
            volume_ml,
            abv,
            name,
            at,
        }) => cmd_drink(&data_dir, &category, volume_ml, abv, name, at),
        Some(Commands::Profile {
            age,
            weight_kg,
            height_cm,
            sex,
        }) => cmd_profile(&data_dir, age, weight_kg, height_cm, sex),
        Some(Commands::Plan {
            level,
            target_bac,
            category,
            eaten,
        }) => cmd_plan(&data_dir, level, target_bac, category, eaten),
        Some(Commands::Forecast { at, step_minutes }) => {
            cmd_forecast(&data_dir, at, step_minutes, &config)
        }
        Some(Commands::Archive { cleanup }) => cmd_archive(&data_dir, cleanup),
        None => cmd_status(&data_dir, None, &config),
    }
}

fn journal_path(data_dir: &PathBuf) -> PathBuf {
    data_dir.join("journal").join("drinks.jsonl")
}

fn state_path(data_dir: &PathBuf) -> PathBuf {
    data_dir.join("state.json")
}

fn cmd_status(data_dir: &PathBuf, at: Option<String>, config: &Config) -> Result<()> {
    let state = UserState::load(&state_path(data_dir))?;
    let session = load_session(&journal_path(data_dir))?;
    let now = parse_at(at)?;

    let naive = naive_bac(now, &session, &state.profile, &config.model);
    let projected = projected_bac(now, &session, &state.profile, state.plan.eaten, &config.model);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CURRENT SESSION");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Drinks logged: {} (~{:.1} g ethanol)",
        session.entries.len(),
        session
            .entries
            .iter()
            .map(|e| e.drink.ethanol_grams())
            .sum::<f64>()
    );
    println!();
    println!(
        "  Naive BAC:     {:.3}%  {}",
        naive,
        BuzzLevel::from_bac(naive).display_name()
    );
    println!(
        "  Projected BAC: {:.3}%  {}",
        projected,
        BuzzLevel::from_bac(projected).display_name()
    );
    println!();

    let target = state.plan.target_bac;
    println!(
        "  Plan: stay at or under {:.3}% ({})",
        target,
        BuzzLevel::from_bac(target).display_name()
    );

    let eta = time_to_reach(
        target,
        now,
        &session,
        &state.profile,
        state.plan.eaten,
        &config.model,
        &config.solver,
    );
    println!("  At or under target: {}", format_eta(eta, now));

    let safe = time_safe_for_next_drink(
        target,
        &state.plan.next_drink,
        now,
        &session,
        &state.profile,
        state.plan.eaten,
        &config.model,
        &config.solver,
    );
    println!(
        "  Safe for next {}: {}",
        state.plan.next_drink.name,
        format_eta(safe, now)
    );
    println!();

    Ok(())
}

fn cmd_drink(
    data_dir: &PathBuf,
    category: &str,
    volume_ml: Option<f64>,
    abv: Option<f64>,
    name: Option<String>,
    at: Option<String>,
) -> Result<()> {
    let category = parse_category(category)
        .ok_or_else(|| Error::InvalidInput(format!("Unknown category: {}", category)))?;

    let mut drink = default_drink(category);
    if let Some(volume_ml) = volume_ml {
        drink.volume_ml = volume_ml;
    }
    if let Some(abv) = abv {
        drink.abv_percent = abv;
    }
    if let Some(name) = name {
        drink.name = name;
    }

    if drink.volume_ml <= 0.0 {
        return Err(Error::InvalidInput("Volume must be positive".into()));
    }
    if drink.abv_percent <= 0.0 || drink.abv_percent > 100.0 {
        return Err(Error::InvalidInput(
            "ABV must be in (0, 100] percent".into(),
        ));
    }

    let started_at = parse_at(at)?;
    let entry = DrinkEntry::new(drink, started_at);

    let mut sink = JsonlSink::new(journal_path(data_dir));
    sink.append(&entry)?;

    println!(
        "✓ Logged {}: {:.0} mL at {:.1}% (~{:.1} g ethanol)",
        entry.drink.name,
        entry.drink.volume_ml,
        entry.drink.abv_percent,
        entry.drink.ethanol_grams()
    );

    Ok(())
}

fn cmd_profile(
    data_dir: &PathBuf,
    age: Option<u32>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    sex: Option<String>,
) -> Result<()> {
    let path = state_path(data_dir);

    let changed = age.is_some() || weight_kg.is_some() || height_cm.is_some() || sex.is_some();
    let state = if changed {
        UserState::update(&path, |state| {
            if let Some(age) = age {
                state.profile.age_years = age;
            }
            if let Some(weight_kg) = weight_kg {
                if weight_kg <= 0.0 {
                    return Err(Error::InvalidInput("Weight must be positive".into()));
                }
                state.profile.weight_kg = weight_kg;
            }
            if let Some(height_cm) = height_cm {
                if height_cm <= 0.0 {
                    return Err(Error::InvalidInput("Height must be positive".into()));
                }
                state.profile.height_cm = height_cm;
            }
            if let Some(ref sex) = sex {
                state.profile.sex = parse_sex(sex)
                    .ok_or_else(|| Error::InvalidInput(format!("Unknown sex: {}", sex)))?;
            }
            Ok(())
        })?
    } else {
        UserState::load(&path)?
    };

    let profile = &state.profile;
    println!("Profile:");
    println!("  Age:    {} years", profile.age_years);
    println!("  Weight: {:.1} kg", profile.weight_kg);
    println!("  Height: {:.1} cm", profile.height_cm);
    println!("  Sex:    {:?}", profile.sex);
    println!(
        "  Body water {:.1} L, distribution ratio {:.3}",
        profile.total_body_water_l(),
        profile.distribution_ratio()
    );

    if changed {
        println!("✓ Profile saved");
    }

    Ok(())
}

fn cmd_plan(
    data_dir: &PathBuf,
    level: Option<String>,
    target_bac: Option<f64>,
    category: Option<String>,
    eaten: Option<bool>,
) -> Result<()> {
    let path = state_path(data_dir);

    let changed =
        level.is_some() || target_bac.is_some() || category.is_some() || eaten.is_some();
    let state = if changed {
        UserState::update(&path, |state| {
            if let Some(ref level) = level {
                let level: BuzzLevel = level.parse().map_err(Error::InvalidInput)?;
                // Stay at the bottom edge of the chosen band
                state.plan.target_bac = level.lower_bound_bac();
            }
            if let Some(target_bac) = target_bac {
                if target_bac < 0.0 {
                    return Err(Error::InvalidInput("Target BAC cannot be negative".into()));
                }
                state.plan.target_bac = target_bac;
            }
            if let Some(ref category) = category {
                let category = parse_category(category)
                    .ok_or_else(|| Error::InvalidInput(format!("Unknown category: {}", category)))?;
                state.plan.next_drink = default_drink(category);
            }
            if let Some(eaten) = eaten {
                state.plan.eaten = eaten;
            }
            Ok(())
        })?
    } else {
        UserState::load(&path)?
    };

    let plan = &state.plan;
    println!("Plan:");
    println!(
        "  Target: {:.3}% ({})",
        plan.target_bac,
        BuzzLevel::from_bac(plan.target_bac).display_name()
    );
    println!(
        "  Next drink: {} ({:.0} mL at {:.1}%)",
        plan.next_drink.name, plan.next_drink.volume_ml, plan.next_drink.abv_percent
    );
    println!("  Eaten: {}", plan.eaten);

    if changed {
        println!("✓ Plan saved");
    }

    Ok(())
}

fn cmd_forecast(
    data_dir: &PathBuf,
    at: Option<String>,
    step_minutes: Option<u32>,
    config: &Config,
) -> Result<()> {
    let state = UserState::load(&state_path(data_dir))?;
    let session = load_session(&journal_path(data_dir))?;
    let now = parse_at(at)?;

    let initial =
        projected_bac(now, &session, &state.profile, state.plan.eaten, &config.model);
    let step = step_minutes.unwrap_or(config.model.decay_step_minutes);

    println!(
        "Decay forecast from {:.3}% (β = {} %/h, no further drinks):",
        initial, config.model.beta_percent_per_hour
    );
    for (t, bac) in decay_series(now, initial, step, config.model.beta_percent_per_hour) {
        println!("  {}  {:.3}%", t.format("%H:%M"), bac);
    }

    let hours = time_to_zero_hours(initial, config.model.beta_percent_per_hour);
    println!("Zero in ~{:.1} h", hours);

    Ok(())
}

fn cmd_archive(data_dir: &PathBuf, cleanup: bool) -> Result<()> {
    let journal_dir = data_dir.join("journal");
    let journal = journal_path(data_dir);
    let csv_path = data_dir.join("sessions.csv");

    if !journal.exists() {
        println!("No journal file found - nothing to archive.");
        return Ok(());
    }

    let count = bac_core::csv_rollup::journal_to_csv_and_archive(&journal, &csv_path)?;

    println!("✓ Archived {} drinks to CSV", count);
    println!("  CSV: {}", csv_path.display());

    if cleanup {
        let cleaned = bac_core::csv_rollup::cleanup_archived_journals(&journal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} archived journal files", cleaned);
        }
    }

    Ok(())
}

fn parse_at(at: Option<String>) -> Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::InvalidInput(format!("Invalid timestamp {:?}: {}", s, e))),
    }
}

fn parse_category(s: &str) -> Option<DrinkCategory> {
    match s.to_lowercase().as_str() {
        "beer" => Some(DrinkCategory::Beer),
        "wine" => Some(DrinkCategory::Wine),
        "cocktail" => Some(DrinkCategory::Cocktail),
        "spirit" | "shot" => Some(DrinkCategory::Spirit),
        _ => None,
    }
}

fn parse_sex(s: &str) -> Option<BiologicalSex> {
    match s.to_lowercase().as_str() {
        "male" | "m" => Some(BiologicalSex::Male),
        "female" | "f" => Some(BiologicalSex::Female),
        _ => None,
    }
}

/// Render an advisory timestamp the way the dashboard shows it
fn format_eta(eta: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match eta {
        None => "> 24h or unknown".into(),
        Some(t) if t <= now + chrono::Duration::seconds(1) => "now".into(),
        Some(t) => {
            let remaining = (t - now).num_seconds().max(0);
            format!("{} UTC (in {})", t.format("%H:%M"), hms(remaining))
        }
    }
}

fn hms(seconds: i64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
