//! Record store for rollcall.
//!
//! This module owns the persisted attendance record list. The whole list is
//! kept as one JSON array under a single store key, and every mutation is a
//! full read-modify-write of that value through a [`KvBackend`].

pub mod backend;

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{AttendanceRecord, Month};

pub use backend::{KvBackend, MemoryBackend, SqliteBackend};

/// The store key the record list is persisted under by default.
///
/// Kept identical to the legacy browser deployment so existing data keeps
/// loading.
pub const DEFAULT_STORE_KEY: &str = "attendanceRecords";

/// Serialized form of an empty record list.
const EMPTY_LIST: &str = "[]";

/// The attendance record store.
///
/// Owns the persisted record list: append, delete by id, and full reads.
/// Derived views are computed elsewhere ([`crate::projection`]); the store
/// itself is only concerned with durability.
#[derive(Debug)]
pub struct RecordStore<B: KvBackend> {
    backend: B,
    key: String,
}

impl RecordStore<SqliteBackend> {
    /// Open a file-backed store at the given path under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing database cannot be opened.
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(SqliteBackend::open(path)?, key))
    }
}

impl RecordStore<MemoryBackend> {
    /// Create a store over a fresh in-memory backend, mainly for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), DEFAULT_STORE_KEY)
    }
}

impl<B: KvBackend> RecordStore<B> {
    /// Create a store over the given backend and store key.
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The store key the record list is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the full record list.
    ///
    /// On first use the key is initialized to an empty list before reading,
    /// so subsequent reads never miss. Legacy records persisted without ids
    /// are assigned fresh ids and the list is rewritten once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the value at the key is not a
    /// valid record list, or a backend error if storage fails.
    pub fn load(&mut self) -> Result<Vec<AttendanceRecord>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            self.backend.put(&self.key, EMPTY_LIST)?;
            debug!("Initialized empty record list at key '{}'", self.key);
            return Ok(Vec::new());
        };

        let mut records: Vec<AttendanceRecord> = serde_json::from_str(&raw)
            .map_err(|source| Error::corrupt_store(self.key.as_str(), source))?;

        if records.iter().any(|r| r.id.is_none()) {
            let assigned = backfill_ids(&mut records);
            self.save(&records)?;
            info!("Assigned ids to {assigned} legacy records");
        }

        Ok(records)
    }

    /// Append a new attendance entry and return the stored record.
    ///
    /// The student name is trimmed before storage; the record's display date
    /// and ordering timestamp are derived from `class_date`, and a fresh id
    /// is assigned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStudentName`] if the name is empty after
    /// trimming; no state changes in that case.
    pub fn append(
        &mut self,
        student_name: &str,
        month: Month,
        class_date: NaiveDate,
    ) -> Result<AttendanceRecord> {
        let name = student_name.trim();
        if name.is_empty() {
            return Err(Error::EmptyStudentName);
        }

        let mut records = self.load()?;
        let mut record = AttendanceRecord::new(name, month, class_date);
        record.id = Some(next_id(&records));
        records.push(record.clone());
        self.save(&records)?;

        debug!(
            "Appended record {} for {} ({})",
            record.id.unwrap_or_default(),
            record.student_name,
            record.month
        );
        Ok(record)
    }

    /// Get a record by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded.
    pub fn get(&mut self, id: i64) -> Result<Option<AttendanceRecord>> {
        let records = self.load()?;
        Ok(records.into_iter().find(|r| r.id == Some(id)))
    }

    /// Delete the record with the given id.
    ///
    /// Returns `true` if a record was deleted, `false` if no record has that
    /// id (in which case nothing is written).
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded or rewritten.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let mut records = self.load()?;
        let Some(pos) = records.iter().position(|r| r.id == Some(id)) else {
            return Ok(false);
        };

        let removed = records.remove(pos);
        self.save(&records)?;
        info!("Deleted record {} for {}", id, removed.student_name);
        Ok(true)
    }

    /// Distinct student names, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded.
    pub fn distinct_students(&mut self) -> Result<Vec<String>> {
        let records = self.load()?;
        let mut names: Vec<String> = Vec::new();
        for record in &records {
            if !names.iter().any(|n| n == &record.student_name) {
                names.push(record.student_name.clone());
            }
        }
        Ok(names)
    }

    /// Count records in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded.
    pub fn count(&mut self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the record list cannot be loaded.
    pub fn stats(&mut self) -> Result<StoreStats> {
        let records = self.load()?;

        let oldest_class = records
            .iter()
            .map(|r| r.timestamp)
            .min()
            .and_then(DateTime::from_timestamp_millis);
        let newest_class = records
            .iter()
            .map(|r| r.timestamp)
            .max()
            .and_then(DateTime::from_timestamp_millis);

        let mut students = 0usize;
        let mut seen: Vec<&str> = Vec::new();
        for record in &records {
            if !seen.contains(&record.student_name.as_str()) {
                seen.push(&record.student_name);
                students += 1;
            }
        }

        Ok(StoreStats {
            total_records: records.len(),
            distinct_students: students,
            oldest_class,
            newest_class,
        })
    }

    /// Reset the store to an empty record list.
    ///
    /// This is the recovery path for a corrupt store value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.put(&self.key, EMPTY_LIST)?;
        info!("Reset record list at key '{}'", self.key);
        Ok(())
    }

    /// Rewrite the full serialized record list.
    fn save(&mut self, records: &[AttendanceRecord]) -> Result<()> {
        let serialized = serde_json::to_string(records)?;
        self.backend.put(&self.key, &serialized)
    }
}

/// The id the next appended record receives.
fn next_id(records: &[AttendanceRecord]) -> i64 {
    records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1
}

/// Assign fresh ids to records that lack one, preserving list order.
///
/// Returns the number of ids assigned.
fn backfill_ids(records: &mut [AttendanceRecord]) -> usize {
    let mut next = records.iter().filter_map(|r| r.id).max().unwrap_or(0);
    let mut assigned = 0;
    for record in records.iter_mut() {
        if record.id.is_none() {
            next += 1;
            record.id = Some(next);
            assigned += 1;
        }
    }
    assigned
}

/// Statistics about the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Total number of records stored.
    pub total_records: usize,
    /// Number of distinct student names.
    pub distinct_students: usize,
    /// Class date of the oldest record.
    pub oldest_class: Option<DateTime<Utc>>,
    /// Class date of the newest record.
    pub newest_class: Option<DateTime<Utc>>,
}
