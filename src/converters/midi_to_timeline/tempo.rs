//! Tick to wall-clock conversion
//!
//! A single tempo is assumed for the whole piece.

use serde::{Deserialize, Serialize};

use crate::models::Tick;

/// Default tempo: 500,000 µs per quarter note = 120 BPM
pub const DEFAULT_MICROSECONDS_PER_BEAT: u32 = 500_000;

/// Convert a tick delta to milliseconds
///
/// # Arguments
/// * `delta_ticks` - Ticks to convert
/// * `ticks_per_beat` - Resolution from the MIDI header (must be > 0)
/// * `microseconds_per_beat` - Tempo from the MIDI tempo meta event
///
/// # Returns
/// Duration in milliseconds, unrounded
pub fn ticks_to_ms(delta_ticks: Tick, ticks_per_beat: u16, microseconds_per_beat: u32) -> f64 {
    // Ticks to beats and then beats to µs
    (delta_ticks as f64 / ticks_per_beat as f64) * microseconds_per_beat as f64 / 1000.0
}

/// Tempo parameters of a piece
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tempo {
    pub ticks_per_beat: u16,
    pub microseconds_per_beat: u32,
}

impl Tempo {
    pub fn new(ticks_per_beat: u16, microseconds_per_beat: u32) -> Self {
        Self {
            ticks_per_beat,
            microseconds_per_beat,
        }
    }

    pub fn ticks_to_ms(&self, delta_ticks: Tick) -> f64 {
        ticks_to_ms(delta_ticks, self.ticks_per_beat, self.microseconds_per_beat)
    }

    /// Duration in whole milliseconds, rounded up so no sounding span becomes zero
    pub fn duration_ms(&self, delta_ticks: Tick) -> u64 {
        self.ticks_to_ms(delta_ticks).ceil() as u64
    }

    pub fn bpm(&self) -> f64 {
        60_000_000.0 / self.microseconds_per_beat as f64
    }
}
