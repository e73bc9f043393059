//! # Musical Tuning Module
//!
//! Equal-temperament note table and cents arithmetic for the tuner.
//! The table covers octaves 0 through 7 (C0 to B7), which comfortably
//! spans the playable range of a guitar in any common tuning, and is
//! computed once at startup. Also carries the closed set of string
//! tuning presets selectable from the CLI.

use once_cell::sync::Lazy;

/// Represents a single musical note with its name and frequency.
#[derive(Debug, Clone)]
pub struct Note {
    /// Note name (e.g. "A4", "C#3")
    pub name: String,
    /// Equal-tempered frequency in Hz (A4 = 440)
    pub frequency: f32,
}

/// The nearest note to a detected frequency, with its tuning deviation.
#[derive(Debug, Clone)]
pub struct NoteMatch {
    /// Name of the nearest note (e.g. "E2")
    pub note_name: String,
    /// The note's exact equal-tempered frequency in Hz
    pub target_frequency_hz: f32,
    /// Deviation from the target in cents; positive = sharp
    pub cents_offset: f32,
}

/// Statically computed notes for octaves 0..=7 (C0 to B7), ascending.
///
/// Frequencies follow equal temperament with A4 = 440 Hz:
/// `f = 440 * 2^(k/12)` where k is the semitone distance from A4.
static NOTES: Lazy<Vec<Note>> = Lazy::new(|| {
    const NOTE_NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    // A4 sits 57 semitones above C0.
    const A4_INDEX: i32 = 57;

    let mut notes = Vec::with_capacity(8 * 12);
    for octave in 0..8 {
        for (i, name) in NOTE_NAMES.iter().enumerate() {
            let semitones_from_a4 = (octave * 12 + i as i32) - A4_INDEX;
            let frequency = 440.0 * 2.0_f32.powf(semitones_from_a4 as f32 / 12.0);
            notes.push(Note {
                name: format!("{}{}", name, octave),
                frequency,
            });
        }
    }
    notes
});

/// Finds the note whose target frequency is closest to `freq`.
///
/// Closeness is absolute difference in Hz. On an exact tie (possible
/// only at precise midpoints) the lower note wins: the table is
/// ascending and only a strictly smaller difference replaces the
/// current best.
pub fn find_nearest_note(freq: f32) -> &'static Note {
    let mut best = &NOTES[0];
    let mut best_diff = (best.frequency - freq).abs();
    for note in NOTES.iter().skip(1) {
        let diff = (note.frequency - freq).abs();
        if diff < best_diff {
            best = note;
            best_diff = diff;
        }
    }
    best
}

/// Calculates the deviation of `freq` from `target_freq` in cents.
///
/// 100 cents is one semitone. Positive values mean the detected pitch
/// is sharp of the target, negative flat.
pub fn cents_offset(freq: f32, target_freq: f32) -> f32 {
    1200.0 * (freq / target_freq).log2()
}

/// Maps a detected frequency to the nearest note plus cents deviation.
///
/// `freq` must be finite and positive; the peak refiner never emits
/// anything else.
pub fn match_note(freq: f32) -> NoteMatch {
    let note = find_nearest_note(freq);
    NoteMatch {
        note_name: note.name.clone(),
        target_frequency_hz: note.frequency,
        cents_offset: cents_offset(freq, note.frequency),
    }
}

/// A named set of open-string target frequencies.
///
/// Presets are plain data selected once at startup; there is no preset
/// management beyond this fixed table.
#[derive(Debug, Clone, Copy)]
pub struct TuningPreset {
    pub name: &'static str,
    /// Open-string frequencies in Hz, first string (highest) to sixth.
    pub strings: [f32; 6],
}

/// The closed set of supported string tunings.
pub const TUNING_PRESETS: &[TuningPreset] = &[
    TuningPreset {
        name: "standard",
        strings: [329.63, 246.94, 196.00, 146.83, 110.00, 82.41],
    },
    TuningPreset {
        name: "drop-d",
        strings: [329.63, 246.94, 196.00, 146.83, 110.00, 73.42],
    },
    TuningPreset {
        name: "open-g",
        strings: [392.00, 293.66, 196.00, 146.83, 98.00, 98.00],
    },
    TuningPreset {
        name: "dadgad",
        strings: [293.66, 220.00, 196.00, 146.83, 110.00, 73.42],
    },
];

/// Looks up a preset by name, case-insensitively.
pub fn preset_by_name(name: &str) -> Option<&'static TuningPreset> {
    TUNING_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

impl TuningPreset {
    /// Returns the open-string target frequency closest to `freq`.
    pub fn nearest_string(&self, freq: f32) -> f32 {
        let mut best = self.strings[0];
        for &s in &self.strings[1..] {
            if (s - freq).abs() < (best - freq).abs() {
                best = s;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn a2_maps_exactly() {
        let m = match_note(110.0);
        assert_eq!(m.note_name, "A2");
        assert_relative_eq!(m.target_frequency_hz, 110.0, epsilon = 1e-6);
        assert!(m.cents_offset.abs() < 1e-6);
    }

    #[test]
    fn low_e_string_maps_to_e2() {
        let m = match_note(82.41);
        assert_eq!(m.note_name, "E2");
        // 82.41 Hz sits a fraction of a cent above the exact E2.
        assert!(m.cents_offset.abs() < 1.0);
    }

    #[test]
    fn a4_reference_is_exact() {
        let m = match_note(440.0);
        assert_eq!(m.note_name, "A4");
        assert_relative_eq!(m.target_frequency_hz, 440.0, epsilon = 1e-4);
    }

    #[test]
    fn cents_scale_and_sign() {
        // Detuning A4 by a known number of cents must read back as that
        // many cents, positive when sharp and negative when flat.
        let target = 440.0f32;
        for c in [-45.0f32, -10.0, 0.0, 10.0, 45.0, 50.0] {
            let freq = target * 2.0f32.powf(c / 1200.0);
            let m = match_note(freq);
            assert_eq!(m.note_name, "A4", "c = {c}");
            assert!((m.cents_offset - c).abs() < 0.01, "c = {c}, got {}", m.cents_offset);
        }
    }

    #[test]
    fn near_midpoint_resolves_to_each_side() {
        // Just below the Hz midpoint between A4 and A#4 the lower note
        // wins; just above, the upper one.
        let a4 = 440.0f32;
        let a_sharp4 = 440.0 * 2.0f32.powf(1.0 / 12.0);
        let mid = (a4 + a_sharp4) / 2.0;
        assert_eq!(match_note(mid - 0.01).note_name, "A4");
        assert_eq!(match_note(mid + 0.01).note_name, "A#4");
    }

    #[test]
    fn table_spans_octaves_0_through_7() {
        assert_eq!(NOTES.len(), 96);
        assert_eq!(NOTES.first().unwrap().name, "C0");
        assert_eq!(NOTES.last().unwrap().name, "B7");
        // C0 is 16.35 Hz in equal temperament.
        assert_relative_eq!(NOTES[0].frequency, 16.3516, epsilon = 1e-3);
    }

    #[test]
    fn preset_lookup_is_case_insensitive() {
        assert!(preset_by_name("Standard").is_some());
        assert!(preset_by_name("DADGAD").is_some());
        assert!(preset_by_name("lute").is_none());
    }

    #[test]
    fn nearest_string_picks_low_e() {
        let preset = preset_by_name("standard").unwrap();
        assert_relative_eq!(preset.nearest_string(80.0), 82.41, epsilon = 1e-3);
        assert_relative_eq!(preset.nearest_string(331.0), 329.63, epsilon = 1e-3);
    }
}
