//! # Plot Module
//!
//! Shared amplitude scaling and waveform rendering.
//!
//! - **AmplitudeRange**: the symmetric y-axis range shared by both renders
//!   of a pair, so their vertical scales are directly comparable
//! - **WaveformRenderer**: draws one mono buffer as a time-domain waveform
//!   PNG via the plotters bitmap backend
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wavecmp::config::PlotConfig;
//! use wavecmp::plot::{AmplitudeRange, WaveformRenderer};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! # let (buf_a, buf_b): (wavecmp::audio::AudioBuffer, wavecmp::audio::AudioBuffer) = todo!();
//! let range = AmplitudeRange::shared(Some(&buf_a), Some(&buf_b));
//! let renderer = WaveformRenderer::new(PlotConfig::default())?;
//! renderer.render(&buf_a, "out/a.png".as_ref(), Some(range)).await?;
//! renderer.render(&buf_b, "out/b.png".as_ref(), Some(range)).await?;
//! # Ok(())
//! # }
//! ```

pub mod range;
pub mod renderer;

pub use range::{AmplitudeRange, DEFAULT_EPSILON, DEFAULT_MARGIN_FACTOR};
pub use renderer::WaveformRenderer;
