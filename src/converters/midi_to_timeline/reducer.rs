//! Voice reduction
//!
//! Turns one voice's on/off events into a gap-free sequence of monophonic
//! intervals, keeping only the highest pitch that is active at any time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::errors::ReduceError;
use crate::models::{MonoInterval, NoteEvent, NoteKind, PitchId, Tick};

pub type Result<T> = std::result::Result<T, ReduceError>;

/// Highest valid MIDI pitch
pub const MAX_PITCH: PitchId = 127;

/// What to do with a note-off whose pitch is not sounding
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteOffPolicy {
    /// Treat it as a no-op (real-world files contain stray note-offs)
    #[default]
    Lenient,
    /// Fail with `ReduceError::UnmatchedNoteOff`
    Strict,
}

/// Reduce one voice to monophonic intervals
///
/// # Algorithm
/// 1. Walk the events, accumulating delta-times into an absolute tick
/// 2. Before time advances, snapshot the highest active pitch together
///    with the tick it became current at
/// 3. Apply the event to the active set
/// 4. Turn snapshots into intervals (each ends where the next starts) and
///    collapse neighbours carrying the same pitch
///
/// The final interval ends at the last note-off seen in the voice. A note
/// still held after that tick is cut there; if that leaves the final
/// interval empty it is dropped.
pub fn reduce_voice(events: &[NoteEvent], policy: NoteOffPolicy) -> Result<Vec<MonoInterval>> {
    let mut active: BTreeSet<PitchId> = BTreeSet::new();
    let mut tick: Tick = 0;
    let mut last_note_off: Tick = 0;

    // (highest pitch, start tick) of every span between time advances
    let mut snapshots: Vec<(Option<PitchId>, Tick)> = Vec::new();

    for event in events {
        if event.pitch > MAX_PITCH {
            return Err(ReduceError::PitchOutOfRange {
                pitch: event.pitch,
                tick: tick + event.delta as Tick,
            });
        }

        // The snapshot describes the span that just ended, so it is taken
        // before this event is applied
        if event.delta > 0 {
            snapshots.push((active.last().copied(), tick));
            tick += event.delta as Tick;
        }

        match event.kind {
            NoteKind::NoteOff => {
                if !active.remove(&event.pitch) {
                    match policy {
                        NoteOffPolicy::Strict => {
                            return Err(ReduceError::UnmatchedNoteOff {
                                pitch: event.pitch,
                                tick,
                            });
                        }
                        NoteOffPolicy::Lenient => {
                            log::debug!("Ignoring note-off for silent pitch {} at tick {}", event.pitch, tick);
                        }
                    }
                }
                last_note_off = tick;
            }
            NoteKind::NoteOn => {
                active.insert(event.pitch);
            }
        }
    }

    if !active.is_empty() {
        log::warn!(
            "Pitches {:?} still held at end of voice, cut at last note-off (tick {})",
            active,
            last_note_off
        );
    }

    let mut intervals: Vec<MonoInterval> = snapshots
        .iter()
        .enumerate()
        .map(|(i, &(pitch, start))| {
            let end = snapshots.get(i + 1).map_or(last_note_off, |&(_, next)| next);
            MonoInterval::new(pitch, start, end)
        })
        .collect();
    intervals = collapse_intervals(&intervals);

    if let Some(last) = intervals.last().copied() {
        if last.end <= last.start {
            if last.pitch.is_some() {
                log::warn!(
                    "Dropping pitch {:?} starting at tick {}: voice has no note-off after it (last at tick {})",
                    last.pitch,
                    last.start,
                    last.end
                );
            }
            intervals.pop();
        }
    }

    Ok(intervals)
}

/// Merge neighbouring intervals that carry the same pitch (or are both silent)
///
/// The merged interval keeps the earlier start and the later end. Running
/// this on its own output changes nothing.
pub fn collapse_intervals(intervals: &[MonoInterval]) -> Vec<MonoInterval> {
    let mut collapsed: Vec<MonoInterval> = Vec::with_capacity(intervals.len());

    for interval in intervals {
        match collapsed.last_mut() {
            Some(previous) if previous.pitch == interval.pitch => {
                previous.end = interval.end;
            }
            _ => collapsed.push(*interval),
        }
    }

    collapsed
}
