//! Terminal rendering of tuning readings.
//!
//! One status line, rewritten in place: detected frequency, nearest
//! note, target frequency and a cents meter. Tolerant of terminals
//! without cursor addressing since it only uses carriage returns.

use plectrum_core::AnalysisResult;
use plectrum_core::tuning::TuningPreset;
use std::io::{self, Write};

/// Meter width in characters; the needle sits center when in tune.
const METER_WIDTH: usize = 41;

/// Cents magnitude considered "in tune" for the marker.
const IN_TUNE_CENTS: f32 = 5.0;

/// Writes one reading over the current terminal line.
pub fn render(result: &AnalysisResult, preset: &TuningPreset) -> io::Result<()> {
    let mut out = io::stdout().lock();

    match (&result.frequency_hz, &result.note) {
        (Some(freq), Some(note)) => {
            let marker = if note.cents_offset.abs() <= IN_TUNE_CENTS {
                "✓"
            } else if note.cents_offset > 0.0 {
                "♯"
            } else {
                "♭"
            };
            write!(
                out,
                "\r\x1b[2K{:>4} {} {:7.2} Hz  target {:7.2} Hz  string {:6.2} Hz  {} {:+6.1}¢",
                note.note_name,
                meter(note.cents_offset),
                freq,
                note.target_frequency_hz,
                preset.nearest_string(*freq),
                marker,
                note.cents_offset,
            )?;
        }
        _ => {
            write!(out, "\r\x1b[2K  --  {}  listening...", meter(f32::NAN))?;
        }
    }
    out.flush()
}

/// Renders the cents meter, e.g. `[--------|----█----]` for ~+12¢.
///
/// The needle position maps ±50 cents across the meter width, clamped
/// at the ends the way the reference hardware-style meter does.
fn meter(cents: f32) -> String {
    let mut chars: Vec<char> = std::iter::repeat('-').take(METER_WIDTH).collect();
    let center = METER_WIDTH / 2;
    chars[center] = '|';

    if cents.is_finite() {
        let pos = center as f32 + cents / 50.0 * center as f32;
        let pos = (pos.round() as isize).clamp(0, METER_WIDTH as isize - 1) as usize;
        chars[pos] = '█';
    }

    let body: String = chars.into_iter().collect();
    format!("[{body}]")
}
