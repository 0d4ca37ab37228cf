#![forbid(unsafe_code)]

//! Core domain model and business logic for the Aegis family health toolkit.
//!
//! This crate provides:
//! - Domain types (chart geometry, symptom reports, assessments, vitals)
//! - Chart geometry engine (line, donut, bar) and SVG rendering
//! - Rule-based symptom triage and the vitals insight stub
//! - Symptom catalog (body regions and their tags)
//! - Report history persistence (JSONL log, CSV archive)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod chart;
pub mod svg;
pub mod triage;
pub mod insight;
pub mod report_log;
pub mod rollup;
pub mod vitals;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, BodyRegion, SymptomCatalog};
pub use config::Config;
pub use chart::{bar_geometry, donut_geometry, line_geometry};
pub use svg::{bar_chart_svg, donut_chart_svg, line_chart_svg};
pub use triage::assess;
pub use insight::vitals_insight;
pub use report_log::{load_recent_reports, JsonlSink, ReportSink};
pub use vitals::load_vitals_from_csv;
