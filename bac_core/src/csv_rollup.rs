//! CSV rollup: archive the drink journal into a long-term CSV log.
//!
//! Rolling up ends the current drinking session: entries are appended
//! to the CSV, the CSV is synced, and the journal is renamed aside so
//! the next drink starts a fresh session.

use crate::types::DrinkEntry;
use crate::Result;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    category: String,
    name: String,
    volume_ml: f64,
    abv_percent: f64,
    ethanol_grams: f64,
    started_at: String,
}

impl From<&DrinkEntry> for CsvRow {
    fn from(entry: &DrinkEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            category: entry.drink.category.display_name().to_lowercase(),
            name: entry.drink.name.clone(),
            volume_ml: entry.drink.volume_ml,
            abv_percent: entry.drink.abv_percent,
            ethanol_grams: entry.drink.ethanol_grams(),
            started_at: entry.started_at.to_rfc3339(),
        }
    }
}

/// Roll up journal entries into CSV and archive the journal atomically
///
/// The CSV is fsynced before the journal is renamed, and the journal is
/// renamed (not deleted) so the raw entries stay recoverable. Returns
/// the number of entries processed.
pub fn journal_to_csv_and_archive(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries = crate::journal::read_entries(journal_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in journal to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only the first writer of the file emits headers
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        let row = CsvRow::from(entry);
        writer.serialize(row)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} entries to CSV", entries.len());

    // Archive the journal by renaming it; the next drink starts a new
    // session file
    let archived_path = journal_path.with_extension("jsonl.archived");
    std::fs::rename(journal_path, &archived_path)?;

    tracing::info!("Archived journal to {:?}", archived_path);

    Ok(entries.len())
}

/// Clean up old archived journal files
///
/// Removes all .archived files in the given directory.
pub fn cleanup_archived_journals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "archived" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed archived journal: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} archived journal files", count);
    }

    Ok(count)
}
