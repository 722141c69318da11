//! Demonstration readings used to pre-populate the dashboard.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::store::HealthRecordStore;
use crate::types::{BloodPressure, HealthReading, Measurement};

/// Demo rows are defined in local wall-clock time.
fn at(day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Local
        .with_ymd_and_hms(2023, 10, day, hour, minute, 0)
        .single()
        .map(|d| d.with_timezone(&Utc))
}

/// The fixed demonstration rows, in insertion order.
pub fn demo_readings() -> Vec<HealthReading> {
    let bp = |systolic, diastolic| Measurement::BloodPressure(BloodPressure { systolic, diastolic });

    [
        (Measurement::BloodSugar(110.0), at(26, 8, 0)),
        (bp(120, 80), at(26, 8, 0)),
        (Measurement::Weight(75.0), at(26, 8, 0)),
        (Measurement::BloodSugar(140.0), at(26, 14, 0)),
        (Measurement::BloodSugar(105.0), at(27, 8, 30)),
        (bp(122, 81), at(27, 8, 30)),
        (Measurement::Weight(74.8), at(27, 8, 30)),
    ]
    .into_iter()
    .filter_map(|(measurement, date)| date.map(|d| HealthReading::new(measurement, d)))
    .collect()
}

/// A store pre-populated with [`demo_readings`].
pub fn demo_store() -> HealthRecordStore {
    HealthRecordStore::from_readings(demo_readings())
}
