//! Segment to PBASIC instruction conversion
//!
//! Each merged segment becomes exactly one instruction, in order: a
//! `FREQOUT` for sounding segments and a `PAUSE` for rests.

use serde::Serialize;
use std::collections::BTreeSet;

use super::defaults::{CONSTANT_COMMENT_COLUMN, MAX_DURATION_MS, SPEAKER_ALIAS};
use super::templates::{render_template, TemplateContext};
use super::{EmitError, Result};
use crate::converters::midi_to_timeline::Tempo;
use crate::models::{pitch_info, MergedSegment, PitchId, PitchInfo};
use crate::settings::ConversionSettings;

/// FREQOUT takes one or two frequencies
const MAX_FREQOUT_PITCHES: usize = 2;

/// One line of the music section
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Play { pitches: Vec<PitchId>, duration_ms: u16 },
    Rest { duration_ms: u16 },
}

impl Instruction {
    pub fn duration_ms(&self) -> u16 {
        match self {
            Instruction::Play { duration_ms, .. } | Instruction::Rest { duration_ms } => *duration_ms,
        }
    }

    /// Render as a PBASIC statement
    pub fn to_pbasic(&self) -> Result<String> {
        match self {
            Instruction::Play { pitches, duration_ms } => {
                let names = pitches
                    .iter()
                    .map(|&pitch| lookup(pitch).map(|info| info.name.as_str()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("FREQOUT {}, {}, {}", SPEAKER_ALIAS, duration_ms, names.join(", ")))
            }
            Instruction::Rest { duration_ms } => Ok(format!("PAUSE {}", duration_ms)),
        }
    }
}

fn lookup(pitch: PitchId) -> Result<&'static PitchInfo> {
    pitch_info(pitch).ok_or(EmitError::UnknownPitch(pitch))
}

/// Convert merged segments to instructions
///
/// Durations are rounded up to whole milliseconds so short segments never
/// vanish.
pub fn emit_instructions(segments: &[MergedSegment], tempo: &Tempo) -> Result<Vec<Instruction>> {
    segments
        .iter()
        .map(|segment| {
            if segment.pitches.len() > MAX_FREQOUT_PITCHES {
                return Err(EmitError::TooManyPitches {
                    start: segment.start,
                    count: segment.pitches.len(),
                });
            }

            let duration_ms = tempo.duration_ms(segment.duration());
            if duration_ms > MAX_DURATION_MS {
                return Err(EmitError::DurationOverflow {
                    start: segment.start,
                    duration_ms,
                });
            }
            let duration_ms = duration_ms as u16;

            Ok(if segment.is_rest() {
                Instruction::Rest { duration_ms }
            } else {
                Instruction::Play {
                    pitches: segment.pitches.clone(),
                    duration_ms,
                }
            })
        })
        .collect()
}

/// `CON` declarations for every pitch the program plays, lowest first
pub fn constant_declarations(instructions: &[Instruction]) -> Result<Vec<String>> {
    let used: BTreeSet<PitchId> = instructions
        .iter()
        .filter_map(|instruction| match instruction {
            Instruction::Play { pitches, .. } => Some(pitches.iter().copied()),
            Instruction::Rest { .. } => None,
        })
        .flatten()
        .collect();

    used.into_iter()
        .map(|pitch| {
            let info = lookup(pitch)?;
            let declaration = format!("{} CON {}", info.name, info.rounded_frequency());
            Ok(format!(
                "{:<width$}' {}",
                declaration,
                info.display,
                width = CONSTANT_COMMENT_COLUMN
            ))
        })
        .collect()
}

/// Render the complete BS2 program
pub fn render_program(instructions: &[Instruction], settings: &ConversionSettings) -> Result<String> {
    let constants = constant_declarations(instructions)?.join("\n");
    let music = instructions
        .iter()
        .map(Instruction::to_pbasic)
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    let context = TemplateContext::new(
        &settings.stamp_target,
        &settings.pbasic_version,
        SPEAKER_ALIAS,
        settings.speaker_pin,
    )
    .constants(constants)
    .instructions(music);

    render_template(settings.template, &context)
}
