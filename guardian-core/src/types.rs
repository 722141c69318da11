//! Core domain types for Health Guardian
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Reading** | One timestamped biometric data point |
//! | **Measurement** | The payload of a reading, without its timestamp |
//! | **ReadingKind** | Which biometric a reading records (blood sugar, blood pressure, weight) |
//! | **Meal analysis** | Structured AI commentary on a free-text meal description |
//! | **Transcript** | Ordered user/model messages in the health assistant |
//!
//! Every consumer of a reading matches on [`Measurement`] or [`ReadingKind`]
//! exhaustively; there is no runtime type inspection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Readings
// ============================================

/// Which biometric a reading records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingKind {
    BloodSugar,
    BloodPressure,
    Weight,
}

impl ReadingKind {
    /// All kinds, in dashboard display order.
    pub const ALL: [ReadingKind; 3] = [
        ReadingKind::BloodSugar,
        ReadingKind::BloodPressure,
        ReadingKind::Weight,
    ];

    /// Wire name, matching the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingKind::BloodSugar => "bloodSugar",
            ReadingKind::BloodPressure => "bloodPressure",
            ReadingKind::Weight => "weight",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            ReadingKind::BloodSugar => "Blood Sugar",
            ReadingKind::BloodPressure => "Blood Pressure",
            ReadingKind::Weight => "Weight",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            ReadingKind::BloodSugar => "mg/dL",
            ReadingKind::BloodPressure => "mmHg",
            ReadingKind::Weight => "kg",
        }
    }

    /// Padding applied around the data range on trend chart y-axes.
    pub fn chart_padding(&self) -> f64 {
        match self {
            ReadingKind::BloodSugar | ReadingKind::BloodPressure => 10.0,
            ReadingKind::Weight => 2.0,
        }
    }
}

impl std::fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for ReadingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bloodSugar" => Ok(ReadingKind::BloodSugar),
            "bloodPressure" => Ok(ReadingKind::BloodPressure),
            "weight" => Ok(ReadingKind::Weight),
            _ => Err(format!("unknown reading kind: {}", s)),
        }
    }
}

/// Blood pressure pair in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

/// A reading's payload, without its timestamp.
///
/// No range validation happens anywhere: a negative weight is stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Measurement {
    /// Blood sugar in mg/dL
    BloodSugar(f64),
    /// Blood pressure in mmHg
    BloodPressure(BloodPressure),
    /// Weight in kg
    Weight(f64),
}

impl Measurement {
    /// The kind of reading this measurement belongs to.
    pub fn kind(&self) -> ReadingKind {
        match self {
            Measurement::BloodSugar(_) => ReadingKind::BloodSugar,
            Measurement::BloodPressure(_) => ReadingKind::BloodPressure,
            Measurement::Weight(_) => ReadingKind::Weight,
        }
    }

    /// Value formatted for a metric card, without unit (e.g. "120/80").
    pub fn display_value(&self) -> String {
        match self {
            Measurement::BloodSugar(v) | Measurement::Weight(v) => format!("{}", v),
            Measurement::BloodPressure(bp) => format!("{}/{}", bp.systolic, bp.diastolic),
        }
    }

    /// Chart series values: one for scalars, systolic then diastolic for pressure.
    pub fn series(&self) -> Vec<f64> {
        match self {
            Measurement::BloodSugar(v) | Measurement::Weight(v) => vec![*v],
            Measurement::BloodPressure(bp) => {
                vec![f64::from(bp.systolic), f64::from(bp.diastolic)]
            }
        }
    }
}

/// One timestamped biometric data point.
///
/// Serializes as `{ "type": "bloodSugar", "value": 110.0, "date": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    #[serde(flatten)]
    pub measurement: Measurement,
    /// Assigned at creation time; never user-editable
    pub date: DateTime<Utc>,
}

impl HealthReading {
    pub fn new(measurement: Measurement, date: DateTime<Utc>) -> Self {
        Self { measurement, date }
    }

    pub fn kind(&self) -> ReadingKind {
        self.measurement.kind()
    }
}

// ============================================
// Meal analysis
// ============================================

/// Structured AI commentary on a meal.
///
/// Produced entirely by the AI gateway; the application only checks that the
/// response has this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealAnalysis {
    /// Brief summary of the meal's impact on blood sugar
    pub summary: String,
    /// Components generally good for blood sugar control
    pub good_for_sugar: Vec<String>,
    /// Components that could negatively impact blood sugar
    pub bad_for_sugar: Vec<String>,
    /// Actionable suggestions for healthier choices
    pub suggestions: Vec<String>,
}

// ============================================
// Chat
// ============================================

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Wire name used by the Gemini API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One message in the health assistant transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}
