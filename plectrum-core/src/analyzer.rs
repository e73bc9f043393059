//! # Analysis Controller
//!
//! Runs the per-window pipeline: amplitude gate, spectral estimate,
//! peak refinement, note mapping. Each call is a pure transformation
//! of one window; there is no cross-cycle state to corrupt, which
//! matters because the pipeline runs unbounded against a live stream.

use crate::gate::AmplitudeGate;
use crate::peak::refine_peak;
use crate::spectrum::SpectrumAnalyzer;
use crate::{AnalysisResult, tuning};

/// Per-window pitch analysis pipeline.
pub struct Analyzer {
    sample_rate: u32,
    gate: AmplitudeGate,
    spectrum: SpectrumAnalyzer,
}

impl Analyzer {
    /// Creates an analyzer for windows of `window_len` samples captured
    /// at `sample_rate` Hz, gated at the given RMS threshold.
    pub fn new(sample_rate: u32, window_len: usize, gate_threshold: f32) -> Self {
        Self {
            sample_rate,
            gate: AmplitudeGate::new(gate_threshold),
            spectrum: SpectrumAnalyzer::new(window_len),
        }
    }

    /// The sample rate this analyzer was configured with.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Analyzes one complete window.
    ///
    /// Windows rejected by the gate and spectra without a discernible
    /// peak both yield the explicit "no pitch" result; neither is an
    /// error condition.
    pub fn process_window(&self, window: &[f32]) -> AnalysisResult {
        if !self.gate.should_analyze(window) {
            return AnalysisResult::no_pitch();
        }

        let magnitudes = self.spectrum.magnitudes(window);
        let Some(frequency) = refine_peak(&magnitudes, self.sample_rate, window.len()) else {
            return AnalysisResult::no_pitch();
        };

        let note = tuning::match_note(frequency);
        AnalysisResult {
            frequency_hz: Some(frequency),
            note: Some(note),
        }
    }
}
