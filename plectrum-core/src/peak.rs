//! # Peak Refiner
//!
//! Locates the dominant bin of a magnitude spectrum and refines it to
//! sub-bin resolution with parabolic interpolation over the three
//! log-magnitudes around the peak. Numeric degeneracies (zero
//! magnitudes, flat neighborhoods) degrade to the unrefined bin rather
//! than raising; a crash mid-stream is not acceptable in the audio path.

/// Floor applied to magnitudes before taking the log, so that an exact
/// zero neighbor cannot produce `-inf`.
const LOG_FLOOR: f32 = 1e-12;

/// Refines the dominant spectral peak to a frequency in Hz.
///
/// `magnitudes` is the one-sided spectrum (length `window_len / 2`);
/// bin spacing is `sample_rate / window_len`. Returns `None` when the
/// spectrum has no positive-magnitude peak, i.e. nothing to report.
pub fn refine_peak(magnitudes: &[f32], sample_rate: u32, window_len: usize) -> Option<f32> {
    if magnitudes.len() < 3 {
        return None;
    }

    // Endpoints are excluded so the interpolation neighbors always exist.
    let mut max_bin = 0usize;
    let mut max_mag = 0.0f32;
    for (i, &mag) in magnitudes.iter().enumerate().take(magnitudes.len() - 1).skip(1) {
        if mag > max_mag {
            max_mag = mag;
            max_bin = i;
        }
    }
    if max_bin == 0 {
        // No bin had positive magnitude.
        return None;
    }

    let alpha = magnitudes[max_bin - 1].max(LOG_FLOOR).ln();
    let beta = magnitudes[max_bin].max(LOG_FLOOR).ln();
    let gamma = magnitudes[max_bin + 1].max(LOG_FLOOR).ln();

    // Fit a parabola through the three log-magnitudes. A flat or linear
    // neighborhood makes the denominator vanish; use the raw bin then.
    let denom = alpha - 2.0 * beta + gamma;
    let delta = if denom.abs() > f32::EPSILON {
        let d = 0.5 * (alpha - gamma) / denom;
        if d.is_finite() { d } else { 0.0 }
    } else {
        0.0
    };

    let peak_bin = max_bin as f32 + delta;
    let frequency = peak_bin * sample_rate as f32 / window_len as f32;

    if frequency.is_finite() && frequency > 0.0 {
        Some(frequency)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;
    const WINDOW_LEN: usize = 4096;

    fn bin_hz(bin: f32) -> f32 {
        bin * SAMPLE_RATE as f32 / WINDOW_LEN as f32
    }

    #[test]
    fn all_zero_spectrum_yields_none() {
        let mags = vec![0.0f32; WINDOW_LEN / 2];
        assert!(refine_peak(&mags, SAMPLE_RATE, WINDOW_LEN).is_none());
    }

    #[test]
    fn flat_neighborhood_falls_back_to_raw_bin() {
        // A uniform spectrum makes every neighborhood perfectly flat:
        // the parabola is degenerate and the refiner must return the
        // unrefined bin instead of dividing by zero.
        let mags = vec![1.0f32; 64];
        let freq = refine_peak(&mags, SAMPLE_RATE, WINDOW_LEN).unwrap();
        // The strictly-greater scan settles on the first interior bin.
        assert!((freq - bin_hz(1.0)).abs() < 1e-3);
    }

    #[test]
    fn zero_neighbors_do_not_panic() {
        let mut mags = vec![0.0f32; 64];
        mags[20] = 1.0;
        let freq = refine_peak(&mags, SAMPLE_RATE, WINDOW_LEN).unwrap();
        // Symmetric (floored) neighbors: delta is 0, raw bin frequency.
        assert!((freq - bin_hz(20.0)).abs() < 1e-3);
    }

    #[test]
    fn interpolation_shifts_toward_larger_neighbor() {
        let mut mags = vec![0.0f32; 64];
        mags[29] = 0.4;
        mags[30] = 1.0;
        mags[31] = 0.7;
        let freq = refine_peak(&mags, SAMPLE_RATE, WINDOW_LEN).unwrap();
        assert!(freq > bin_hz(30.0));
        assert!(freq < bin_hz(30.5));
    }

    #[test]
    fn endpoint_bins_are_never_selected() {
        // Huge energy at bin 0 (DC) must not be picked as the peak.
        let mut mags = vec![0.0f32; 64];
        mags[0] = 100.0;
        mags[5] = 1.0;
        let freq = refine_peak(&mags, SAMPLE_RATE, WINDOW_LEN).unwrap();
        assert!((freq - bin_hz(5.0)).abs() < 1e-3);
    }
}
