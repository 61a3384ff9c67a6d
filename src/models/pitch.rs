//! Static pitch table
//!
//! Maps every MIDI note number to a PBASIC constant name, a display name
//! and its equal-tempered frequency (A4 = 440 Hz).

use once_cell::sync::Lazy;

use super::PitchId;

/// Number of addressable MIDI pitches
pub const PITCH_COUNT: usize = 128;

/// Reference pitch for the frequency calculation (A4)
const A4_PITCH: i32 = 69;
const A4_FREQUENCY: f64 = 440.0;

/// Pitch class spellings, using `s` for sharp so they are valid identifiers
const PITCH_CLASSES: [&str; 12] = ["C", "Cs", "D", "Ds", "E", "F", "Fs", "G", "Gs", "A", "As", "B"];

/// Entry of the pitch table
#[derive(Debug, Clone, PartialEq)]
pub struct PitchInfo {
    pub pitch: PitchId,
    /// Identifier usable as a PBASIC constant (e.g. `Cs4`, `Cm1`)
    pub name: String,
    /// Human readable spelling (e.g. `C#4`, `C-1`)
    pub display: String,
    /// Frequency in Hz
    pub frequency: f64,
}

impl PitchInfo {
    /// Frequency rounded to the nearest whole Hz
    pub fn rounded_frequency(&self) -> u32 {
        self.frequency.round() as u32
    }
}

static PITCH_TABLE: Lazy<Vec<PitchInfo>> = Lazy::new(|| (0..PITCH_COUNT as u8).map(build_entry).collect());

fn build_entry(pitch: PitchId) -> PitchInfo {
    let class = PITCH_CLASSES[pitch as usize % 12];
    // MIDI note 0 = C-1, so C4 (middle C) = 60
    let octave = pitch as i32 / 12 - 1;
    let octave_name = if octave < 0 {
        format!("m{}", -octave)
    } else {
        octave.to_string()
    };

    let name = format!("{}{}", class, octave_name);
    let display = name.replace('s', "#").replace('m', "-");
    let frequency = A4_FREQUENCY * 2f64.powf((pitch as i32 - A4_PITCH) as f64 / 12.0);

    PitchInfo {
        pitch,
        name,
        display,
        frequency,
    }
}

/// Look up a pitch in the table, `None` outside the MIDI range
pub fn pitch_info(pitch: PitchId) -> Option<&'static PitchInfo> {
    PITCH_TABLE.get(pitch as usize)
}
