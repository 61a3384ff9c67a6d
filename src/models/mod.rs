//! Models module for the MIDI to FREQOUT converter
//!
//! This module contains the data models that flow through the
//! conversion pipeline: raw note events, per-voice intervals,
//! merged segments and the static pitch table.

pub mod event;
pub mod interval;
pub mod pitch;

// Re-export commonly used types
pub use event::*;
pub use interval::*;
pub use pitch::{pitch_info, PitchInfo, PITCH_COUNT};

/// MIDI note number (0-127, where 60 = C4)
pub type PitchId = u8;

/// Count of MIDI ticks since the start of the piece
pub type Tick = u64;
