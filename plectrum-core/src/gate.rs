//! # Amplitude Gate
//!
//! Decides whether a window carries enough signal energy to be worth
//! analyzing at all. Gating on RMS amplitude suppresses spectral
//! analysis during silence, which would otherwise produce spurious
//! note flicker from background noise.

/// Default RMS threshold below which a window is treated as silence.
pub const MIN_AMPLITUDE: f32 = 0.01;

/// RMS-based silence gate.
#[derive(Debug, Clone)]
pub struct AmplitudeGate {
    threshold: f32,
}

impl AmplitudeGate {
    /// Creates a gate with the given RMS threshold.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Returns true iff the window's RMS amplitude exceeds the threshold.
    pub fn should_analyze(&self, window: &[f32]) -> bool {
        rms(window) > self.threshold
    }
}

impl Default for AmplitudeGate {
    fn default() -> Self {
        Self::new(MIN_AMPLITUDE)
    }
}

/// Computes the root-mean-square amplitude of a sample slice.
///
/// An empty slice has an RMS of 0.0.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_rejected() {
        let gate = AmplitudeGate::default();
        assert!(!gate.should_analyze(&[0.0; 2048]));
    }

    #[test]
    fn full_scale_is_accepted() {
        let gate = AmplitudeGate::default();
        assert!(gate.should_analyze(&[1.0; 2048]));
    }

    #[test]
    fn empty_window_is_rejected() {
        let gate = AmplitudeGate::default();
        assert!(!gate.should_analyze(&[]));
    }

    #[test]
    fn rms_of_square_wave() {
        // A ±0.5 square wave has an RMS of exactly 0.5.
        let samples: Vec<f32> = (0..256)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        assert!((rms(&samples) - 0.5).abs() < 1e-6);
    }
}
