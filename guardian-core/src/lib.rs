//! # guardian-core
//!
//! Core library for Health Guardian - a personal health dashboard with AI
//! meal analysis and a wellness assistant.
//!
//! This library provides:
//! - Domain types for readings, meal analyses, and chat messages
//! - The in-memory health record store and its dashboard projection
//! - The AI gateway (Gemini) behind the [`HealthGateway`] trait
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use guardian_core::{Config, DashboardSnapshot, GeminiGateway, HealthGateway, Measurement};
//!
//! let config = Config::load().expect("failed to load config");
//! let gateway = GeminiGateway::new(&config.gemini).expect("API key missing");
//!
//! let mut store = guardian_core::seed::demo_store();
//! store.append(Measurement::Weight(74.2));
//! let snapshot = DashboardSnapshot::from_store(&store);
//!
//! let analysis = gateway.analyze_meal("oatmeal with berries").expect("analysis failed");
//! println!("{} readings, {}", snapshot.total_readings, analysis.summary);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use dashboard::{DashboardSnapshot, MetricSummary, TrendPoint};
pub use error::{Error, Result};
pub use gateway::{GeminiGateway, HealthGateway};
pub use store::HealthRecordStore;
pub use types::*;

// Public modules
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod gateway;
pub mod logging;
pub mod seed;
pub mod store;
pub mod types;
