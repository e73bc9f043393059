//! # Windowing & Spectral Estimator
//!
//! Turns a fixed-size analysis window into a one-sided magnitude
//! spectrum: DC offset removal, Hann windowing to reduce spectral
//! leakage, then a forward FFT via RustFFT.
//!
//! The Hann coefficients and the FFT plan are computed once at
//! construction and reused for every window, since this transform is
//! the dominant per-cycle cost.

use rustfft::{Fft, FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// Reusable spectral estimator for windows of a fixed length.
pub struct SpectrumAnalyzer {
    window_len: usize,
    hann: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl SpectrumAnalyzer {
    /// Plans an FFT and precomputes Hann coefficients for `window_len`
    /// samples. `window_len` should be a power of two.
    pub fn new(window_len: usize) -> Self {
        assert!(window_len >= 4, "window too short for spectral analysis");
        let n_minus_1 = (window_len - 1) as f32;
        let hann = (0..window_len)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / n_minus_1).cos()))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);

        Self {
            window_len,
            hann,
            fft,
        }
    }

    /// The window length this analyzer was planned for.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Computes the one-sided magnitude spectrum of an analysis window.
    ///
    /// Returns `window_len / 2` magnitudes, one per bin up to the
    /// Nyquist frequency. Pure function of the input; the window itself
    /// is not retained.
    ///
    /// # Panics
    /// If `window.len()` differs from the planned window length.
    pub fn magnitudes(&self, window: &[f32]) -> Vec<f32> {
        assert_eq!(
            window.len(),
            self.window_len,
            "analysis window length must match the planned FFT size"
        );

        let mut signal = window.to_vec();
        remove_dc_offset(&mut signal);

        let mut buffer: Vec<Complex<f32>> = signal
            .iter()
            .zip(self.hann.iter())
            .map(|(&sample, &w)| Complex {
                re: sample * w,
                im: 0.0,
            })
            .collect();

        self.fft.process(&mut buffer);

        // Real input: only the first half of the spectrum is meaningful.
        buffer
            .iter()
            .take(self.window_len / 2)
            .map(|c| c.norm())
            .collect()
    }
}

/// Removes the DC offset from a signal by making its average value zero.
///
/// A DC component shows up as a large spike at bin 0 and can leak into
/// the low bins where the guitar's fundamentals live.
fn remove_dc_offset(signal: &mut [f32]) {
    let len = signal.len();
    if len == 0 {
        return;
    }
    let avg = signal.iter().sum::<f32>() / len as f32;
    if avg.abs() > 1e-6 {
        for sample in signal.iter_mut() {
            *sample -= avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn peak_lands_in_expected_bin() {
        const N: usize = 4096;
        let analyzer = SpectrumAnalyzer::new(N);
        // 440 Hz at 44.1 kHz falls in bin round(440 * 4096 / 44100) = 41.
        let mags = analyzer.magnitudes(&sine(440.0, 44100.0, N));
        assert_eq!(mags.len(), N / 2);

        let max_bin = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_bin, 41);
    }

    #[test]
    fn dc_is_suppressed() {
        const N: usize = 4096;
        let analyzer = SpectrumAnalyzer::new(N);
        // A 220 Hz sine riding on a large DC offset: bin 0 must not win.
        let signal: Vec<f32> = sine(220.0, 44100.0, N)
            .into_iter()
            .map(|s| s * 0.1 + 0.8)
            .collect();
        let mags = analyzer.magnitudes(&signal);

        let max_bin = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_bin, 20); // round(220 * 4096 / 44100)
    }

    #[test]
    fn magnitudes_are_non_negative() {
        const N: usize = 1024;
        let analyzer = SpectrumAnalyzer::new(N);
        let mags = analyzer.magnitudes(&sine(110.0, 44100.0, N));
        assert!(mags.iter().all(|&m| m >= 0.0));
    }
}
