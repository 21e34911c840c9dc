use crate::audio::AudioBuffer;

/// Floor applied to the peak so silent audio never produces a zero-width range
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Headroom multiplier keeping the waveform off the plot edge
pub const DEFAULT_MARGIN_FACTOR: f32 = 1.02;

/// Symmetric amplitude range shared by the two renders of a pair
///
/// Invariant: `max = margin_factor * max(peak_a, peak_b, epsilon)` and
/// `min = -max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeRange {
    pub min: f32,
    pub max: f32,
}

impl AmplitudeRange {
    /// Shared range covering both buffers, with default epsilon and margin.
    ///
    /// An absent or empty buffer contributes a peak of 0.0; the result is
    /// symmetric in its arguments.
    pub fn shared(a: Option<&AudioBuffer>, b: Option<&AudioBuffer>) -> Self {
        Self::shared_with(a, b, DEFAULT_EPSILON, DEFAULT_MARGIN_FACTOR)
    }

    /// Shared range with explicit epsilon floor and margin factor
    pub fn shared_with(
        a: Option<&AudioBuffer>,
        b: Option<&AudioBuffer>,
        epsilon: f32,
        margin_factor: f32,
    ) -> Self {
        let peak_a = a.map(AudioBuffer::peak).unwrap_or(0.0);
        let peak_b = b.map(AudioBuffer::peak).unwrap_or(0.0);
        Self::around_peak(peak_a.max(peak_b), epsilon, margin_factor)
    }

    /// Symmetric range around a single peak value
    pub fn around_peak(peak: f32, epsilon: f32, margin_factor: f32) -> Self {
        let bound = peak.max(epsilon) * margin_factor;
        Self {
            min: -bound,
            max: bound,
        }
    }

    /// `count` evenly spaced tick values from min to max inclusive
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        if count < 2 {
            return vec![self.min];
        }

        let step = (self.max - self.min) / (count - 1) as f32;
        (0..count).map(|i| self.min + step * i as f32).collect()
    }
}
