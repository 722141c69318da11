//! In-memory health record store.
//!
//! The collection is kept sorted by `date` descending after every insertion,
//! so "latest reading of a kind" is the first match in iteration order.
//! Readings can only be appended; there is no edit or delete, and nothing is
//! persisted.

use chrono::{DateTime, Utc};

use crate::types::{HealthReading, Measurement, ReadingKind};

/// Ordered, append-only collection of readings.
#[derive(Debug, Clone, Default)]
pub struct HealthRecordStore {
    readings: Vec<HealthReading>,
}

impl HealthRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing readings, sorting them newest first.
    pub fn from_readings(readings: impl IntoIterator<Item = HealthReading>) -> Self {
        let mut store = Self::new();
        for reading in readings {
            store.insert(reading);
        }
        store
    }

    /// Append a measurement stamped with the current time.
    pub fn append(&mut self, measurement: Measurement) -> &HealthReading {
        self.append_at(measurement, Utc::now())
    }

    /// Append a measurement with an explicit timestamp.
    pub fn append_at(&mut self, measurement: Measurement, date: DateTime<Utc>) -> &HealthReading {
        let idx = self.insert(HealthReading::new(measurement, date));
        tracing::debug!(
            kind = measurement.kind().as_str(),
            date = %date,
            total = self.readings.len(),
            "Appended reading"
        );
        &self.readings[idx]
    }

    /// Insert keeping descending order; among equal timestamps the newest
    /// insertion goes first.
    fn insert(&mut self, reading: HealthReading) -> usize {
        let idx = self.readings.partition_point(|r| r.date > reading.date);
        self.readings.insert(idx, reading);
        idx
    }

    /// All readings, newest first.
    pub fn readings(&self) -> &[HealthReading] {
        &self.readings
    }

    /// Latest reading of the given kind.
    pub fn latest(&self, kind: ReadingKind) -> Option<&HealthReading> {
        self.readings.iter().find(|r| r.kind() == kind)
    }

    /// Readings of the given kind, oldest first (chart order).
    pub fn history(&self, kind: ReadingKind) -> Vec<&HealthReading> {
        self.readings
            .iter()
            .rev()
            .filter(|r| r.kind() == kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
