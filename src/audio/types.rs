use std::path::PathBuf;

/// Decoded mono audio with metadata
///
/// Immutable once loaded; lives only for the processing of one file.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples in the range [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Sample rate in Hz (native rate of the source file)
    pub sample_rate: u32,

    /// Original file path
    pub file_path: PathBuf,
}

impl AudioBuffer {
    /// Peak absolute amplitude, 0.0 for an empty buffer
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
