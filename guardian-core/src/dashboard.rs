//! Dashboard projection over the reading store.
//!
//! Derives the latest reading per kind and the ascending history per kind
//! used for trend charts. The projection is pure: it never mutates the store.

use chrono::{DateTime, Utc};

use crate::format::{format_chart_label, format_timestamp_opt, NOT_AVAILABLE};
use crate::store::HealthRecordStore;
use crate::types::{HealthReading, ReadingKind};

/// Minimum number of points before a trend chart is drawn.
pub const MIN_TREND_POINTS: usize = 2;

/// One point on a trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    /// Short date label (e.g. "Oct 26")
    pub label: String,
    /// One value per series (systolic, diastolic for blood pressure)
    pub values: Vec<f64>,
}

/// Summary card and trend data for one reading kind.
#[derive(Debug, Clone)]
pub struct MetricSummary {
    pub kind: ReadingKind,
    /// Latest reading of this kind, if any
    pub latest: Option<HealthReading>,
    /// All readings of this kind, oldest first
    pub history: Vec<TrendPoint>,
}

impl MetricSummary {
    fn from_store(store: &HealthRecordStore, kind: ReadingKind) -> Self {
        let history = store
            .history(kind)
            .into_iter()
            .map(|r| TrendPoint {
                date: r.date,
                label: format_chart_label(r.date),
                values: r.measurement.series(),
            })
            .collect();

        Self {
            kind,
            latest: store.latest(kind).cloned(),
            history,
        }
    }

    /// Card value without unit, or "N/A".
    pub fn display_value(&self) -> String {
        self.latest
            .as_ref()
            .map(|r| r.measurement.display_value())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// "Last updated" timestamp text.
    pub fn last_updated(&self) -> String {
        format_timestamp_opt(self.latest.as_ref().map(|r| r.date))
    }

    /// Whether a trend chart should be drawn for this kind.
    pub fn has_trend(&self) -> bool {
        self.history.len() >= MIN_TREND_POINTS
    }

    /// Chart title, e.g. "Blood Sugar Trend".
    pub fn trend_title(&self) -> String {
        format!("{} Trend", self.kind.title())
    }

    /// Legend names, one per series.
    pub fn series_names(&self) -> &'static [&'static str] {
        match self.kind {
            ReadingKind::BloodSugar => &["Blood Sugar (mg/dL)"],
            ReadingKind::BloodPressure => &["Systolic", "Diastolic"],
            ReadingKind::Weight => &["Weight (kg)"],
        }
    }

    /// Data for one series as (unix seconds, value) pairs.
    pub fn series(&self, index: usize) -> Vec<(f64, f64)> {
        self.history
            .iter()
            .filter_map(|p| {
                p.values
                    .get(index)
                    .map(|v| (p.date.timestamp() as f64, *v))
            })
            .collect()
    }

    /// X-axis bounds in unix seconds.
    pub fn x_bounds(&self) -> [f64; 2] {
        let min = self.history.first().map(|p| p.date.timestamp() as f64);
        let max = self.history.last().map(|p| p.date.timestamp() as f64);
        match (min, max) {
            (Some(min), Some(max)) if max > min => [min, max],
            (Some(min), _) => [min - 3600.0, min + 3600.0],
            _ => [0.0, 1.0],
        }
    }

    /// Y-axis bounds: data range padded by the kind's chart padding.
    pub fn y_bounds(&self) -> [f64; 2] {
        let values = self.history.iter().flat_map(|p| p.values.iter().copied());
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        let pad = self.kind.chart_padding();
        [min - pad, max + pad]
    }

    /// First and last x-axis labels.
    pub fn x_labels(&self) -> Vec<String> {
        match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) if first.label != last.label => {
                vec![first.label.clone(), last.label.clone()]
            }
            (Some(first), _) => vec![first.label.clone()],
            _ => Vec::new(),
        }
    }
}

/// Everything the dashboard view needs, derived from the store.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    /// One summary per kind, in [`ReadingKind::ALL`] order
    pub metrics: Vec<MetricSummary>,
    /// Total readings in the store
    pub total_readings: usize,
}

impl DashboardSnapshot {
    /// Project the store into dashboard data.
    pub fn from_store(store: &HealthRecordStore) -> Self {
        Self {
            metrics: ReadingKind::ALL
                .iter()
                .map(|kind| MetricSummary::from_store(store, *kind))
                .collect(),
            total_readings: store.len(),
        }
    }

    /// True when there are no readings; the view shows onboarding instead of cards.
    pub fn is_empty(&self) -> bool {
        self.total_readings == 0
    }

    /// Summary for a given kind.
    pub fn metric(&self, kind: ReadingKind) -> Option<&MetricSummary> {
        self.metrics.iter().find(|m| m.kind == kind)
    }

    /// Summaries with enough points for a trend chart.
    pub fn trends(&self) -> impl Iterator<Item = &MetricSummary> {
        self.metrics.iter().filter(|m| m.has_trend())
    }
}
