//! `docextract-recon` — Financial consistency checks and total reconstruction.
//!
//! Pure engine crate: receives a document built from a prediction, checks
//! its totals against its tax breakdown, and derives whichever totals are
//! missing. No network or file IO beyond loading a config file.

pub mod checker;
pub mod checklist;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod prediction;
pub mod reconstruct;
pub mod render;
pub mod tolerance;

pub use checklist::{CheckName, Checklist};
pub use config::{EngineConfig, ToleranceConfig};
pub use engine::{process, process_pages};
pub use error::ReconError;
pub use merge::merge_pages;
pub use model::MonetaryDocument;
pub use prediction::{pages_from_json, RawPages, RawPrediction};
pub use reconstruct::reconstruct;
