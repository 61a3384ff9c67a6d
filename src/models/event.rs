//! Note events as handed over by the event source
//!
//! An event carries its delta-time relative to the previous event of the
//! same voice, exactly as it appears in a Standard MIDI File track.

use serde::{Deserialize, Serialize};

use super::PitchId;

/// Whether a pitch starts or stops sounding
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteKind {
    NoteOn,
    NoteOff,
}

/// A single on/off occurrence in one voice's timeline
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteEvent {
    pub kind: NoteKind,
    pub pitch: PitchId,
    /// Ticks elapsed since the previous event in the same voice
    pub delta: u32,
}

impl NoteEvent {
    pub fn on(pitch: PitchId, delta: u32) -> Self {
        Self {
            kind: NoteKind::NoteOn,
            pitch,
            delta,
        }
    }

    pub fn off(pitch: PitchId, delta: u32) -> Self {
        Self {
            kind: NoteKind::NoteOff,
            pitch,
            delta,
        }
    }
}
