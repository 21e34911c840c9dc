//! # wavecmp
//!
//! Pair audio files by filename across two directories and render waveform
//! plots with a shared amplitude scale, so the loudness of each A/B pair can
//! be compared visually.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavecmp::{compare::ComparisonEngine, config::Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = ComparisonEngine::new(Config::default());
//! let report = engine.compare("audios/raw", "audios/reorder", "images").await?;
//!
//! println!("{} of {} pairs rendered", report.complete_pairs(), report.pairs.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`pairing`] - recursive file collection and stem-based matching
//! - [`audio`] - decoding to mono sample buffers
//! - [`plot`] - shared amplitude ranges and waveform rendering
//! - [`compare`] - the pipeline engine and its batch report
//! - [`config`] - configuration management
//!
//! Both renders of a pair use one symmetric y-axis range derived from the
//! louder side's peak (with a small headroom margin), so a louder pair
//! visibly occupies more vertical space than a quieter one.

pub mod audio;
pub mod compare;
pub mod config;
pub mod error;
pub mod pairing;
pub mod plot;

// Re-export commonly used types for convenience
pub use crate::{
    compare::{BatchReport, ComparisonEngine, PairOutcome, SideOutcome},
    config::Config,
    error::{Result, WavecmpError},
    plot::AmplitudeRange,
};
