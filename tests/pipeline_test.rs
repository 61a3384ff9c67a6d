// End-to-end conversion of MIDI files written to disk

use std::io::Write;

use freqout::converters::midi_to_timeline::{ReduceError, TimelineError};
use freqout::renderers::pbasic::Instruction;
use freqout::{convert_file, convert_midi_to_bs2, ConversionError, ConversionSettings, MergedSegment, Voice};
use freqout::converters::NoteOffPolicy;
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tempfile::NamedTempFile;

fn note(delta: u32, key: u8, on: bool) -> TrackEvent<'static> {
    let message = if on {
        MidiMessage::NoteOn {
            key: key.into(),
            vel: 100.into(),
        }
    } else {
        MidiMessage::NoteOff {
            key: key.into(),
            vel: 0.into(),
        }
    };
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Midi {
            channel: 0.into(),
            message,
        },
    }
}

fn end_of_track() -> TrackEvent<'static> {
    TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

fn tempo(microseconds_per_beat: u32) -> TrackEvent<'static> {
    TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(microseconds_per_beat.into())),
    }
}

/// Serialize tracks as a Format 1 SMF at 480 ticks per beat
fn smf_bytes(tracks: Vec<Vec<TrackEvent<'static>>>) -> Vec<u8> {
    let smf = Smf {
        header: Header {
            format: Format::Parallel,
            timing: Timing::Metrical(480.into()),
        },
        tracks,
    };
    let mut out = Vec::new();
    smf.write(&mut out).expect("Failed to write SMF");
    out
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Two bars of melody over a held bass note
fn two_voice_song() -> Vec<u8> {
    smf_bytes(vec![
        vec![
            tempo(500_000),
            note(0, 72, true),
            note(480, 72, false),
            note(0, 74, true),
            note(480, 74, false),
            end_of_track(),
        ],
        vec![note(0, 48, true), note(960, 48, false), end_of_track()],
    ])
}

#[test]
fn test_convert_two_voice_file() {
    let file = write_temp(&two_voice_song());

    let result = convert_file(file.path(), None).expect("conversion should succeed");

    assert_eq!(
        result.segments,
        vec![
            MergedSegment::pair(72, 48, 0, 480),
            MergedSegment::pair(74, 48, 480, 960),
        ]
    );
    assert_eq!(result.total_ms(), 1000);

    let program = &result.program;
    assert!(program.starts_with("' {$STAMP BS2}\n' {$PBASIC 2.5}\n"));
    assert!(program.contains("speaker PIN 10"));
    assert!(program.contains("C3 CON 131        ' C3\nC5 CON 523        ' C5\nD5 CON 587        ' D5"));
    assert!(program.contains("FREQOUT speaker, 500, C5, C3\nFREQOUT speaker, 500, D5, C3"));
    assert!(!program.contains("PAUSE"));
}

#[test]
fn test_rests_and_single_track() {
    // Format 0 style: only one track, starting after a beat of silence
    let bytes = smf_bytes(vec![vec![
        note(480, 69, true),
        note(240, 69, false),
        note(240, 71, true),
        note(480, 71, false),
        end_of_track(),
    ]]);

    let result = convert_midi_to_bs2(&bytes, None).expect("conversion should succeed");

    assert_eq!(
        result.instructions,
        vec![
            Instruction::Rest { duration_ms: 500 },
            Instruction::Play {
                pitches: vec![69],
                duration_ms: 250
            },
            Instruction::Rest { duration_ms: 250 },
            Instruction::Play {
                pitches: vec![71],
                duration_ms: 500
            },
        ]
    );
    assert!(result.program.contains("PAUSE 500\nFREQOUT speaker, 250, A4\nPAUSE 250\nFREQOUT speaker, 500, B4"));
}

#[test]
fn test_melody_chord_keeps_highest_pitch() {
    let bytes = smf_bytes(vec![
        vec![
            note(0, 60, true),
            note(0, 64, true),
            note(0, 67, true),
            note(480, 67, false),
            note(0, 64, false),
            note(0, 60, false),
            end_of_track(),
        ],
        vec![note(0, 36, true), note(480, 36, false), end_of_track()],
    ]);

    let result = convert_midi_to_bs2(&bytes, None).expect("conversion should succeed");
    assert_eq!(result.segments, vec![MergedSegment::pair(67, 36, 0, 480)]);
    assert!(!result.program.contains("C4 CON"));
}

#[test]
fn test_tempo_override() {
    let settings = ConversionSettings {
        microseconds_per_beat: Some(1_000_000),
        ..ConversionSettings::default()
    };

    let result = convert_midi_to_bs2(&two_voice_song(), Some(settings)).expect("conversion should succeed");
    assert_eq!(result.total_ms(), 2000);
    assert!(result.program.contains("FREQOUT speaker, 1000, C5, C3"));
}

#[test]
fn test_swapped_voice_order() {
    let settings = ConversionSettings {
        melody_track: 1,
        bass_track: 0,
        ..ConversionSettings::default()
    };

    let result = convert_midi_to_bs2(&two_voice_song(), Some(settings)).expect("conversion should succeed");
    assert_eq!(result.segments[0], MergedSegment::pair(48, 72, 0, 480));
}

#[test]
fn test_strict_policy_rejects_stray_note_off() {
    let bytes = smf_bytes(vec![
        vec![note(0, 72, true), note(480, 72, false), end_of_track()],
        vec![note(0, 48, true), note(240, 50, false), note(240, 48, false), end_of_track()],
    ]);

    let lenient = convert_midi_to_bs2(&bytes, None).expect("lenient conversion should succeed");
    assert_eq!(lenient.segments, vec![MergedSegment::pair(72, 48, 0, 480)]);

    let settings = ConversionSettings {
        note_off_policy: NoteOffPolicy::Strict,
        ..ConversionSettings::default()
    };
    let strict = convert_midi_to_bs2(&bytes, Some(settings));
    assert_eq!(
        strict.unwrap_err(),
        ConversionError::Timeline(TimelineError::Reduce {
            voice: Voice::Bass,
            source: ReduceError::UnmatchedNoteOff { pitch: 50, tick: 240 },
        })
    );
}

#[test]
fn test_empty_tracks_produce_empty_music() {
    let bytes = smf_bytes(vec![vec![end_of_track()], vec![end_of_track()]]);

    let result = convert_midi_to_bs2(&bytes, None).expect("conversion should succeed");
    assert!(result.segments.is_empty());
    assert!(result.instructions.is_empty());
    assert!(result.program.contains("' ==== Music Starts Here ===="));
}

#[test]
fn test_missing_melody_track() {
    let settings = ConversionSettings {
        melody_track: 5,
        ..ConversionSettings::default()
    };
    let result = convert_midi_to_bs2(&two_voice_song(), Some(settings));
    assert!(matches!(result, Err(ConversionError::Parse(_))));
}
