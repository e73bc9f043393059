// plectrum-core/src/lib.rs

//! The core logic for the guitar tuner.
//! This crate is responsible for audio capture, windowed spectral
//! analysis, sub-bin peak refinement and note mapping. It is completely
//! headless and contains no display code.

pub mod analyzer;
pub mod audio;
pub mod buffer;
pub mod error;
pub mod gate;
pub mod peak;
pub mod spectrum;
pub mod tuning;

pub use analyzer::Analyzer;
pub use error::AudioError;
pub use tuning::NoteMatch;

/// Represents the result of a single analysis window.
///
/// One of these is produced per window handed to the [`Analyzer`].
/// `note` is `None` when the amplitude gate rejected the window or no
/// spectral peak was found; that is the explicit "no pitch this cycle"
/// signal, not an error.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The refined fundamental frequency in Hz, if one was found.
    pub frequency_hz: Option<f32>,
    /// The nearest equal-tempered note and its cents deviation.
    pub note: Option<NoteMatch>,
}

impl AnalysisResult {
    /// The result for a window that produced nothing to report.
    pub fn no_pitch() -> Self {
        Self {
            frequency_hz: None,
            note: None,
        }
    }
}
