//! Conversion settings
//!
//! Every field has a default, so a settings file only needs to list what it
//! changes:
//!
//! ```json
//! { "speaker_pin": 3, "bass_track": 2, "note_off_policy": "strict" }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::ConversionError;
use crate::converters::midi_to_timeline::NoteOffPolicy;
use crate::renderers::pbasic::defaults::{
    DEFAULT_BASS_TRACK, DEFAULT_MELODY_TRACK, DEFAULT_PBASIC_VERSION, DEFAULT_SPEAKER_PIN,
    DEFAULT_STAMP_TARGET, MAX_SPEAKER_PIN,
};
use crate::renderers::pbasic::ProgramTemplate;

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Track index of the first voice
    pub melody_track: usize,

    /// Track index of the second voice (may be absent from the file)
    pub bass_track: usize,

    /// BS2 I/O pin driving the speaker
    pub speaker_pin: u8,

    /// `{$STAMP}` directive target
    pub stamp_target: String,

    /// `{$PBASIC}` directive version
    pub pbasic_version: String,

    /// Tempo override; the file's first tempo event is used when `None`
    pub microseconds_per_beat: Option<u32>,

    /// Handling of note-offs for pitches that are not sounding
    pub note_off_policy: NoteOffPolicy,

    /// Output layout
    pub template: ProgramTemplate,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            melody_track: DEFAULT_MELODY_TRACK,
            bass_track: DEFAULT_BASS_TRACK,
            speaker_pin: DEFAULT_SPEAKER_PIN,
            stamp_target: DEFAULT_STAMP_TARGET.to_string(),
            pbasic_version: DEFAULT_PBASIC_VERSION.to_string(),
            microseconds_per_beat: None,
            note_off_policy: NoteOffPolicy::default(),
            template: ProgramTemplate::default(),
        }
    }
}

impl ConversionSettings {
    /// Load settings from JSON, filling in defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConversionError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the generated program or the tempo math cannot use
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.speaker_pin > MAX_SPEAKER_PIN {
            return Err(ConversionError::Settings(format!(
                "speaker pin {} is out of range 0-{}",
                self.speaker_pin, MAX_SPEAKER_PIN
            )));
        }
        if self.microseconds_per_beat == Some(0) {
            return Err(ConversionError::Settings(
                "microseconds per beat must be greater than zero".to_string(),
            ));
        }
        if self.melody_track == self.bass_track {
            return Err(ConversionError::Settings(format!(
                "melody and bass both use track {}",
                self.melody_track
            )));
        }
        Ok(())
    }
}
