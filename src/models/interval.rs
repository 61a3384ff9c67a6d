//! Time spans produced by the reducer and the merger
//!
//! All spans are half-open `[start, end)` in ticks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PitchId, Tick};

/// Which of the two input voices an interval belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Voice {
    Melody,
    Bass,
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voice::Melody => write!(f, "melody"),
            Voice::Bass => write!(f, "bass"),
        }
    }
}

/// Maximal span during which one voice's highest active pitch is constant
///
/// `pitch == None` means the voice is silent over the span.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoInterval {
    pub pitch: Option<PitchId>,
    pub start: Tick,
    pub end: Tick,
}

impl MonoInterval {
    pub fn new(pitch: Option<PitchId>, start: Tick, end: Tick) -> Self {
        Self { pitch, start, end }
    }

    /// The sounding part of this interval, if any
    pub fn sounding(&self) -> Option<SoundingInterval> {
        self.pitch.map(|pitch| SoundingInterval {
            pitch,
            start: self.start,
            end: self.end,
        })
    }
}

/// A [`MonoInterval`] that is known to carry a pitch
///
/// This is what the merger consumes; silence is re-derived there.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoundingInterval {
    pub pitch: PitchId,
    pub start: Tick,
    pub end: Tick,
}

impl SoundingInterval {
    pub fn new(pitch: PitchId, start: Tick, end: Tick) -> Self {
        Self { pitch, start, end }
    }

    pub fn duration(&self) -> Tick {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval is sounding at tick `t`
    pub fn contains(&self, t: Tick) -> bool {
        self.start <= t && t < self.end
    }
}

/// Drop the silent intervals of a reduced voice
pub fn sounding_intervals(intervals: &[MonoInterval]) -> Vec<SoundingInterval> {
    intervals.iter().filter_map(MonoInterval::sounding).collect()
}

/// One output unit of the merger: the pitches sounding over `[start, end)`
///
/// `pitches` holds at most two entries, ordered `[melody, bass]` when both
/// voices sound. An empty set is a rest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MergedSegment {
    pub pitches: Vec<PitchId>,
    pub start: Tick,
    pub end: Tick,
}

impl MergedSegment {
    pub fn rest(start: Tick, end: Tick) -> Self {
        Self {
            pitches: Vec::new(),
            start,
            end,
        }
    }

    pub fn single(pitch: PitchId, start: Tick, end: Tick) -> Self {
        Self {
            pitches: vec![pitch],
            start,
            end,
        }
    }

    pub fn pair(melody: PitchId, bass: PitchId, start: Tick, end: Tick) -> Self {
        Self {
            pitches: vec![melody, bass],
            start,
            end,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn duration(&self) -> Tick {
        self.end.saturating_sub(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounding_filters_silence() {
        let intervals = vec![
            MonoInterval::new(Some(60), 0, 10),
            MonoInterval::new(None, 10, 20),
            MonoInterval::new(Some(62), 20, 30),
        ];

        let sounding = sounding_intervals(&intervals);
        assert_eq!(
            sounding,
            vec![
                SoundingInterval::new(60, 0, 10),
                SoundingInterval::new(62, 20, 30),
            ]
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let interval = SoundingInterval::new(60, 5, 10);
        assert!(!interval.contains(4));
        assert!(interval.contains(5));
        assert!(interval.contains(9));
        assert!(!interval.contains(10));
    }

    #[test]
    fn test_segment_constructors() {
        assert!(MergedSegment::rest(0, 10).is_rest());
        assert_eq!(MergedSegment::single(60, 0, 10).pitches, vec![60]);
        assert_eq!(MergedSegment::pair(60, 48, 0, 10).pitches, vec![60, 48]);
        assert_eq!(MergedSegment::pair(60, 48, 5, 10).duration(), 5);
    }

    #[test]
    fn test_voice_display() {
        assert_eq!(Voice::Melody.to_string(), "melody");
        assert_eq!(Voice::Bass.to_string(), "bass");
    }
}
