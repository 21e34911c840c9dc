//! # Comparison Module
//!
//! The pipeline that ties everything together: collect audio files from two
//! directories, pair them by stem, compute a shared amplitude range per
//! pair, and render both sides.
//!
//! Every pair is processed independently; a decode or render failure on one
//! side is recorded in the [`BatchReport`] and never stops the batch.

pub mod engine;
pub mod report;

pub use engine::ComparisonEngine;
pub use report::{BatchReport, PairOutcome, SideOutcome};
