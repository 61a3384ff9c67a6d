//! Standard MIDI File event source
//!
//! Reads an SMF with midly and hands every track over as an ordered list
//! of note-on/note-off events, with the end-of-track marker stripped.

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use super::errors::ParseError;
use super::tempo::{Tempo, DEFAULT_MICROSECONDS_PER_BEAT};
use crate::models::NoteEvent;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Note events and tempo extracted from a MIDI file
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub tempo: Tempo,
    pub tracks: Vec<Vec<NoteEvent>>,
}

impl Song {
    /// Events of the track at `index`, if the file has one
    pub fn voice(&self, index: usize) -> Option<&[NoteEvent]> {
        self.tracks.get(index).map(Vec::as_slice)
    }

    /// Pick the melody and bass tracks
    ///
    /// The melody track is required; a missing bass track is treated as
    /// an empty voice so single-track files still convert.
    pub fn select_voices(&self, melody: usize, bass: usize) -> Result<(&[NoteEvent], &[NoteEvent])> {
        let melody_events = self.voice(melody).ok_or(ParseError::MissingTrack {
            index: melody,
            available: self.tracks.len(),
        })?;

        let bass_events = match self.voice(bass) {
            Some(events) => events,
            None => {
                log::warn!(
                    "Bass track {} not present ({} tracks), converting melody only",
                    bass,
                    self.tracks.len()
                );
                &[]
            }
        };

        Ok((melody_events, bass_events))
    }
}

/// Parse SMF bytes into per-track note events
pub fn parse_midi(bytes: &[u8]) -> Result<Song> {
    let smf = Smf::parse(bytes).map_err(|e| ParseError::InvalidMidi(e.to_string()))?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int(),
        Timing::Timecode(..) => return Err(ParseError::UnsupportedTiming),
    };
    if ticks_per_beat == 0 {
        return Err(ParseError::ZeroTicksPerBeat);
    }

    let tempo = Tempo::new(ticks_per_beat, find_tempo(&smf.tracks)?);

    let tracks: Vec<Vec<NoteEvent>> = smf
        .tracks
        .iter()
        .map(|track| track_to_note_events(track))
        .collect();

    log::debug!(
        "Parsed {} tracks at {} ticks per beat, {:.1} BPM",
        tracks.len(),
        tempo.ticks_per_beat,
        tempo.bpm()
    );

    Ok(Song { tempo, tracks })
}

/// First tempo meta event in file order, or 120 BPM if there is none
///
/// Only a single tempo is supported; later changes are reported and ignored.
fn find_tempo(tracks: &[Vec<TrackEvent<'_>>]) -> Result<u32> {
    let mut tempos = tracks.iter().flatten().filter_map(|event| match event.kind {
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Some(tempo.as_int()),
        _ => None,
    });

    let Some(first) = tempos.next() else {
        return Ok(DEFAULT_MICROSECONDS_PER_BEAT);
    };
    if first == 0 {
        return Err(ParseError::ZeroTempo);
    }

    let ignored = tempos.filter(|&tempo| tempo != first).count();
    if ignored > 0 {
        log::warn!(
            "Ignoring {} tempo changes, using {} µs per beat throughout",
            ignored,
            first
        );
    }

    Ok(first)
}

/// Keep only note-on/note-off messages of a track
///
/// The delta-time of every dropped event is carried into the next kept
/// one, so kept events stay at their absolute tick. A note-on with zero
/// velocity is a note-off.
fn track_to_note_events(track: &[TrackEvent<'_>]) -> Vec<NoteEvent> {
    let mut events = Vec::new();
    let mut carried_delta = 0u32;

    for event in track {
        carried_delta = carried_delta.saturating_add(event.delta.as_int());

        let note = match event.kind {
            TrackEventKind::Midi { message, .. } => match message {
                MidiMessage::NoteOn { key, vel } if vel.as_int() == 0 => {
                    NoteEvent::off(key.as_int(), carried_delta)
                }
                MidiMessage::NoteOn { key, .. } => NoteEvent::on(key.as_int(), carried_delta),
                MidiMessage::NoteOff { key, .. } => NoteEvent::off(key.as_int(), carried_delta),
                _ => continue,
            },
            TrackEventKind::Meta(MetaMessage::EndOfTrack) => break,
            _ => continue,
        };

        events.push(note);
        carried_delta = 0;
    }

    events
}
