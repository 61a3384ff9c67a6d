//! Two-voice merge
//!
//! Sweeps a single position `t` over the melody and bass intervals and
//! emits one segment per span in which the set of sounding pitches is
//! constant. The output is contiguous from tick 0, never overlaps and holds
//! at most one pitch per voice, ordered `[melody, bass]`.

use super::errors::MergeError;
use crate::models::{MergedSegment, SoundingInterval, Tick, Voice};

pub type Result<T> = std::result::Result<T, MergeError>;

/// Where a voice stands relative to the sweep position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoiceState {
    /// Current interval covers `t`
    Sounding(SoundingInterval),
    /// Current interval starts after `t`
    Pending(SoundingInterval),
    /// No intervals left
    Finished,
}

/// Forward-only position in one voice's interval list
struct Cursor<'a> {
    voice: Voice,
    intervals: &'a [SoundingInterval],
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(voice: Voice, intervals: &'a [SoundingInterval]) -> Self {
        Self {
            voice,
            intervals,
            index: 0,
        }
    }

    fn current(&self) -> Option<&'a SoundingInterval> {
        self.intervals.get(self.index)
    }

    fn state_at(&self, t: Tick) -> Result<VoiceState> {
        match self.current() {
            None => Ok(VoiceState::Finished),
            Some(interval) if interval.start > t => Ok(VoiceState::Pending(*interval)),
            Some(interval) if interval.end > t => Ok(VoiceState::Sounding(*interval)),
            Some(interval) => Err(MergeError::StaleInterval {
                voice: self.voice,
                pitch: interval.pitch,
                tick: t,
            }),
        }
    }

    /// Move past the current interval if the sweep has reached its end
    fn consume_ended(&mut self, t: Tick) {
        if self.current().is_some_and(|interval| interval.end <= t) {
            self.index += 1;
        }
    }

    /// Every interval consumed and the last one ended by `t`
    fn check_drained(&self, t: Tick) -> Result<()> {
        let leftover = self.current().or_else(|| {
            self.index
                .checked_sub(1)
                .and_then(|last| self.intervals.get(last))
                .filter(|interval| interval.end > t)
        });

        match leftover {
            Some(interval) => Err(MergeError::LeftoverSound {
                voice: self.voice,
                pitch: interval.pitch,
                tick: t,
            }),
            None => Ok(()),
        }
    }
}

/// A segment must move the sweep forward
fn check_progress(segment: &MergedSegment, t: Tick) -> Result<()> {
    if segment.end <= t {
        return Err(MergeError::NoProgress { tick: t });
    }
    Ok(())
}

/// Merge the sounding intervals of two voices into chord segments
///
/// Both inputs must be ordered, non-overlapping and free of silent
/// intervals. If one voice is empty the other is returned as single-pitch
/// segments, with rests filling any gaps.
///
/// # Errors
/// * `DegenerateInterval` / `OverlappingIntervals` for malformed input
/// * `NoProgress`, `StaleInterval`, `LeftoverSound` if the sweep loses
///   track of its cursors. Input that passed validation never reaches
///   these; they guard the sweep itself.
pub fn merge_tracks(melody: &[SoundingInterval], bass: &[SoundingInterval]) -> Result<Vec<MergedSegment>> {
    validate_voice(Voice::Melody, melody)?;
    validate_voice(Voice::Bass, bass)?;

    match (melody.is_empty(), bass.is_empty()) {
        (true, true) => return Ok(Vec::new()),
        (false, true) => return Ok(single_voice_segments(melody)),
        (true, false) => return Ok(single_voice_segments(bass)),
        (false, false) => {}
    }

    let mut first = Cursor::new(Voice::Melody, melody);
    let mut second = Cursor::new(Voice::Bass, bass);
    let mut segments = Vec::with_capacity(melody.len() + bass.len());
    let mut t: Tick = 0;

    loop {
        use VoiceState::*;

        let segment = match (first.state_at(t)?, second.state_at(t)?) {
            (Finished, Finished) => break,

            // Both playing: run until the earlier of the two ends
            (Sounding(a), Sounding(b)) => MergedSegment::pair(a.pitch, b.pitch, t, a.end.min(b.end)),

            // One playing, the other still to come
            (Sounding(a), Pending(b)) => MergedSegment::single(a.pitch, t, a.end.min(b.start)),
            (Pending(a), Sounding(b)) => MergedSegment::single(b.pitch, t, b.end.min(a.start)),

            // Rest until whichever starts first
            (Pending(a), Pending(b)) => MergedSegment::rest(t, a.start.min(b.start)),

            // Rest before the last notes of a single voice
            (Finished, Pending(next)) | (Pending(next), Finished) => MergedSegment::rest(t, next.start),

            // Only one voice left
            (Sounding(only), Finished) | (Finished, Sounding(only)) => {
                MergedSegment::single(only.pitch, t, only.end)
            }
        };

        check_progress(&segment, t)?;
        t = segment.end;
        segments.push(segment);

        // Equal ends consume both cursors, so no zero-length segment follows
        first.consume_ended(t);
        second.consume_ended(t);
    }

    first.check_drained(t)?;
    second.check_drained(t)?;

    log::debug!(
        "Merged {} melody and {} bass intervals into {} segments ending at tick {}",
        melody.len(),
        bass.len(),
        segments.len(),
        t
    );

    Ok(segments)
}

/// Reshape one voice into segments, inserting rests where it is silent
fn single_voice_segments(intervals: &[SoundingInterval]) -> Vec<MergedSegment> {
    let mut segments = Vec::with_capacity(intervals.len() * 2);
    let mut t: Tick = 0;

    for interval in intervals {
        if interval.start > t {
            segments.push(MergedSegment::rest(t, interval.start));
        }
        segments.push(MergedSegment::single(interval.pitch, interval.start, interval.end));
        t = interval.end;
    }

    segments
}

/// Intervals must be non-empty and strictly ordered within a voice
fn validate_voice(voice: Voice, intervals: &[SoundingInterval]) -> Result<()> {
    if let Some(bad) = intervals.iter().find(|interval| interval.end <= interval.start) {
        return Err(MergeError::DegenerateInterval {
            voice,
            start: bad.start,
            end: bad.end,
        });
    }

    if let Some(pair) = intervals.windows(2).find(|pair| pair[1].start < pair[0].end) {
        return Err(MergeError::OverlappingIntervals {
            voice,
            tick: pair[1].start,
        });
    }

    Ok(())
}
