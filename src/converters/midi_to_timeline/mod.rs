//! MIDI to timeline converter module
//!
//! Turns the two voices of a Standard MIDI File into one ordered,
//! gap-free sequence of chord segments.
//!
//! # Overview
//!
//! The converter follows a four-stage pipeline:
//! 1. **Parse**: Read note events and tempo with midly
//! 2. **Reduce**: Collapse each voice to its highest sounding pitch
//! 3. **Filter**: Drop silent intervals (the merger re-derives rests)
//! 4. **Merge**: Sweep both voices into segments of 0, 1 or 2 pitches
//!
//! # Basic Usage
//!
//! ```ignore
//! use freqout::converters::midi_to_timeline::{build_timeline, parse_midi, NoteOffPolicy};
//!
//! let song = parse_midi(&bytes)?;
//! let (melody, bass) = song.select_voices(0, 1)?;
//! let timeline = build_timeline(melody, bass, NoteOffPolicy::Lenient)?;
//! for segment in &timeline.segments {
//!     println!("{:?} {}..{}", segment.pitches, segment.start, segment.end);
//! }
//! ```

pub mod errors;
pub mod merger;
pub mod parser;
pub mod reducer;
pub mod tempo;

// Re-export main API
pub use errors::{MergeError, ParseError, ReduceError, TimelineError};
pub use merger::merge_tracks;
pub use parser::{parse_midi, Song};
pub use reducer::{collapse_intervals, reduce_voice, NoteOffPolicy};
pub use tempo::{ticks_to_ms, Tempo, DEFAULT_MICROSECONDS_PER_BEAT};

use crate::models::{sounding_intervals, MergedSegment, MonoInterval, NoteEvent, Voice};

/// Reduced voices together with their merged segments
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub melody: Vec<MonoInterval>,
    pub bass: Vec<MonoInterval>,
    pub segments: Vec<MergedSegment>,
}

/// Reduce both voices and merge them
///
/// # Arguments
/// * `melody` - Events of the first voice
/// * `bass` - Events of the second voice
/// * `policy` - Handling of note-offs for silent pitches
///
/// # Returns
/// * `Ok(Timeline)` - Per-voice intervals and merged segments
/// * `Err(TimelineError)` - Malformed events or a merge fault
pub fn build_timeline(
    melody: &[NoteEvent],
    bass: &[NoteEvent],
    policy: NoteOffPolicy,
) -> Result<Timeline, TimelineError> {
    let reduce = |voice: Voice, events: &[NoteEvent]| {
        reduce_voice(events, policy).map_err(|source| TimelineError::Reduce { voice, source })
    };

    let melody = reduce(Voice::Melody, melody)?;
    let bass = reduce(Voice::Bass, bass)?;

    log::debug!(
        "Reduced voices to {} melody and {} bass intervals",
        melody.len(),
        bass.len()
    );

    let segments = merge_tracks(&sounding_intervals(&melody), &sounding_intervals(&bass))?;

    Ok(Timeline {
        melody,
        bass,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_timeline() {
        let melody = [
            NoteEvent::on(72, 0),
            NoteEvent::off(72, 480),
            NoteEvent::on(74, 480),
            NoteEvent::off(74, 480),
        ];
        let bass = [NoteEvent::on(48, 240), NoteEvent::off(48, 960)];

        let timeline = build_timeline(&melody, &bass, NoteOffPolicy::Lenient).expect("timeline");

        assert_eq!(
            timeline.melody,
            vec![
                MonoInterval::new(Some(72), 0, 480),
                MonoInterval::new(None, 480, 960),
                MonoInterval::new(Some(74), 960, 1440),
            ]
        );
        assert_eq!(
            timeline.segments,
            vec![
                MergedSegment::single(72, 0, 240),
                MergedSegment::pair(72, 48, 240, 480),
                MergedSegment::single(48, 480, 960),
                MergedSegment::pair(74, 48, 960, 1200),
                MergedSegment::single(74, 1200, 1440),
            ]
        );
    }

    #[test]
    fn test_reduce_error_names_voice() {
        let melody = [NoteEvent::on(60, 0), NoteEvent::off(60, 10)];
        let bass = [NoteEvent::off(40, 5)];

        let err = build_timeline(&melody, &bass, NoteOffPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            TimelineError::Reduce {
                voice: Voice::Bass,
                source: ReduceError::UnmatchedNoteOff { pitch: 40, tick: 5 },
            }
        );
        assert!(err.to_string().contains("bass"));
    }
}
