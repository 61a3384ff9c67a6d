//! Format converters
//!
//! This module contains the conversion from Standard MIDI Files to the
//! two-voice segment timeline.

pub mod midi_to_timeline;

// Re-export for convenience
pub use midi_to_timeline::{
    build_timeline,
    parse_midi,
    MergeError,
    NoteOffPolicy,
    ParseError,
    ReduceError,
    Song,
    Tempo,
    Timeline,
    TimelineError,
};
