//! Top-level conversion API
//!
//! Wires the pipeline together: parse the MIDI file, build the two-voice
//! timeline, emit instructions and render the BS2 program.

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::converters::midi_to_timeline::{build_timeline, parse_midi, ParseError, Tempo, TimelineError};
use crate::models::MergedSegment;
use crate::renderers::pbasic::{emit_instructions, render_program, EmitError, Instruction};
use crate::settings::ConversionSettings;

/// Top-level conversion error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The input could not be read as a usable MIDI file
    #[error("MIDI parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// Malformed events or an internal merge fault
    #[error("Timeline construction failed: {0}")]
    Timeline(#[from] TimelineError),

    /// The timeline cannot be expressed as a BS2 program
    #[error("Program generation failed: {0}")]
    Emit(#[from] EmitError),

    /// Invalid or unreadable settings
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Input file could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result of a successful conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Complete PBASIC source
    pub program: String,

    /// Merged timeline the program was generated from
    pub segments: Vec<MergedSegment>,

    /// One instruction per segment
    pub instructions: Vec<Instruction>,

    /// Tempo used for the tick to millisecond conversion
    pub tempo: Tempo,
}

impl ConversionResult {
    /// Total playing time of the program in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.instructions
            .iter()
            .map(|instruction| u64::from(instruction.duration_ms()))
            .sum()
    }
}

/// Convert Standard MIDI File bytes to a BASIC Stamp 2 program.
///
/// # Arguments
///
/// * `bytes` - SMF contents
/// * `settings` - Optional conversion settings (uses defaults if None)
///
/// # Returns
///
/// * `Ok(ConversionResult)` - Program source plus the intermediate timeline
/// * `Err(ConversionError)` - Fatal error; no partial output is produced
pub fn convert_midi_to_bs2(
    bytes: &[u8],
    settings: Option<ConversionSettings>,
) -> Result<ConversionResult, ConversionError> {
    let settings = settings.unwrap_or_default();
    settings.validate()?;

    let song = parse_midi(bytes)?;

    let tempo = match settings.microseconds_per_beat {
        Some(microseconds_per_beat) => Tempo::new(song.tempo.ticks_per_beat, microseconds_per_beat),
        None => song.tempo,
    };

    let (melody, bass) = song.select_voices(settings.melody_track, settings.bass_track)?;
    let timeline = build_timeline(melody, bass, settings.note_off_policy)?;

    let instructions = emit_instructions(&timeline.segments, &tempo)?;
    let program = render_program(&instructions, &settings)?;

    log::info!(
        "Converted {} melody and {} bass events into {} instructions at {:.1} BPM",
        melody.len(),
        bass.len(),
        instructions.len(),
        tempo.bpm()
    );

    Ok(ConversionResult {
        program,
        segments: timeline.segments,
        instructions,
        tempo,
    })
}

/// Read a MIDI file from disk and convert it
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    settings: Option<ConversionSettings>,
) -> Result<ConversionResult, ConversionError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ConversionError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    log::info!("Read {} bytes from {}", bytes.len(), path.display());

    convert_midi_to_bs2(&bytes, settings)
}
