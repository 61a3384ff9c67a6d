//! Two-voice MIDI to BASIC Stamp 2 converter
//!
//! Reads the melody and bass tracks of a Standard MIDI File, reduces each
//! to its highest sounding pitch, merges both into one gap-free timeline of
//! chord segments and renders that as a PBASIC `FREQOUT`/`PAUSE` program.

pub mod api;
pub mod converters;
pub mod models;
pub mod renderers;
pub mod settings;

// Re-export commonly used types
pub use api::{convert_file, convert_midi_to_bs2, ConversionError, ConversionResult};
pub use models::*;
pub use settings::ConversionSettings;
