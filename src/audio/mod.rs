//! # Audio Module
//!
//! Decodes audio files into mono sample buffers for waveform rendering.
//!
//! WAV files go through hound; everything else goes through Symphonia.
//! All input is downmixed to mono at its native sample rate, which is all
//! the plot needs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wavecmp::audio::AudioLoader;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let buffer = AudioLoader::load("kick.wav").await?;
//! println!("{:.1}s at {} Hz, peak {:.3}", buffer.duration(), buffer.sample_rate, buffer.peak());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod types;

pub use loader::AudioLoader;
pub use types::AudioBuffer;
