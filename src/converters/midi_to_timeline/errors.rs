//! Error types for MIDI to timeline conversion
//!
//! `ParseError` covers the event source, `ReduceError` malformed events
//! inside one voice and `MergeError` internal-consistency faults of the
//! two-voice merge. None of them is recoverable at the point of detection.

use thiserror::Error;

use crate::models::{PitchId, Tick, Voice};

/// Fatal errors while reading the Standard MIDI File
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Bytes are not a well-formed SMF
    #[error("Invalid MIDI file: {0}")]
    InvalidMidi(String),

    /// Only metrical (ticks per beat) timing can be converted
    #[error("Unsupported MIDI timing: SMPTE timecode is not supported")]
    UnsupportedTiming,

    /// Ticks per beat of zero would make every duration infinite
    #[error("Invalid MIDI header: ticks per beat is zero")]
    ZeroTicksPerBeat,

    /// A tempo of zero microseconds per beat would make every duration zero
    #[error("Invalid tempo event: zero microseconds per beat")]
    ZeroTempo,

    /// Requested track index does not exist
    #[error("Missing track {index} ({available} tracks in file)")]
    MissingTrack { index: usize, available: usize },
}

/// Malformed event in a single voice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// Note-off for a pitch that is not sounding (strict policy only)
    #[error("Note-off for pitch {pitch} at tick {tick} has no matching note-on")]
    UnmatchedNoteOff { pitch: PitchId, tick: Tick },

    /// Pitch identifiers must be in the MIDI range 0-127
    #[error("Pitch {pitch} at tick {tick} is outside the MIDI range 0-127")]
    PitchOutOfRange { pitch: PitchId, tick: Tick },
}

/// Internal-consistency fault detected by the merger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A sweep step did not move the sweep position forward
    #[error("Merge made no progress at tick {tick}")]
    NoProgress { tick: Tick },

    /// A cursor still holds sound after the sweep finished
    #[error("Unconsumed {voice} pitch {pitch} left after the merge finished at tick {tick}")]
    LeftoverSound { voice: Voice, pitch: PitchId, tick: Tick },

    /// A cursor still points at an interval the sweep has already passed
    #[error("Stale {voice} interval for pitch {pitch} at tick {tick}")]
    StaleInterval { voice: Voice, pitch: PitchId, tick: Tick },

    /// An input interval with `end <= start`
    #[error("Degenerate {voice} interval [{start}, {end})")]
    DegenerateInterval { voice: Voice, start: Tick, end: Tick },

    /// An input interval starting before the previous one of the same voice ended
    #[error("Overlapping {voice} intervals at tick {tick}")]
    OverlappingIntervals { voice: Voice, tick: Tick },
}

/// Failure while building the merged timeline of two voices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    /// Bad input in one voice
    #[error("Malformed {voice} event: {source}")]
    Reduce {
        voice: Voice,
        #[source]
        source: ReduceError,
    },

    /// Internal merge fault (indicates a bug or invariant-violating input)
    #[error("Merge invariant violated: {0}")]
    Merge(#[from] MergeError),
}
