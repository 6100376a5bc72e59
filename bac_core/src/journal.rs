//! Drink journal: append-only persistence for intake entries.
//!
//! Entries are appended to a JSONL (JSON Lines) file with file locking
//! for safe concurrent access. Reading rebuilds the current session;
//! corrupt lines are skipped with a warning rather than failing the
//! whole read.

use crate::types::{DrinkEntry, DrinkSession};
use crate::Result;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink for persisting intake entries
pub trait EntrySink {
    fn append(&mut self, entry: &DrinkEntry) -> Result<()>;
}

/// JSONL-based entry sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl EntrySink for JsonlSink {
    fn append(&mut self, entry: &DrinkEntry) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Exclusive lock while appending; released on drop
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended entry {} to journal", entry.id);
        Ok(())
    }
}

/// Read all intake entries from a journal file
pub fn read_entries(path: &Path) -> Result<Vec<DrinkEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<DrinkEntry>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse entry at line {}: {}", line_num + 1, e);
                // Keep reading; one bad line must not lose the session
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from journal", entries.len());
    Ok(entries)
}

/// Rebuild the current drinking session from a journal file
pub fn load_session(path: &Path) -> Result<DrinkSession> {
    let mut session = DrinkSession::new();
    session.entries = read_entries(path)?;
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_drink;
    use crate::types::DrinkCategory;
    use chrono::Utc;

    fn test_entry() -> DrinkEntry {
        DrinkEntry::new(default_drink(DrinkCategory::Beer), Utc::now())
    }

    #[test]
    fn test_append_and_read_single_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("drinks.jsonl");

        let entry = test_entry();
        let entry_id = entry.id;

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&entry).unwrap();

        let entries = read_entries(&journal_path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry_id);
    }

    #[test]
    fn test_append_multiple_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("drinks.jsonl");

        let mut sink = JsonlSink::new(&journal_path);
        for _ in 0..5 {
            sink.append(&test_entry()).unwrap();
        }

        let entries = read_entries(&journal_path).unwrap();
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_read_missing_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("nonexistent.jsonl");

        let entries = read_entries(&journal_path).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("drinks.jsonl");

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&test_entry()).unwrap();

        // Inject a corrupt line, then append another good one
        {
            let mut file = OpenOptions::new().append(true).open(&journal_path).unwrap();
            file.write_all(b"{ not json }\n").unwrap();
        }
        sink.append(&test_entry()).unwrap();

        let entries = read_entries(&journal_path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_load_session_from_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("drinks.jsonl");

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&test_entry()).unwrap();
        sink.append(&test_entry()).unwrap();

        let session = load_session(&journal_path).unwrap();
        assert_eq!(session.entries.len(), 2);
        assert!(session.first_started_at().is_some());
    }
}
