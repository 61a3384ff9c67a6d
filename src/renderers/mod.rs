//! Renderers module for the MIDI to FREQOUT converter
//!
//! This module contains the export logic that turns a merged
//! timeline into device programs.

pub mod pbasic;

// Re-export commonly used types
pub use pbasic::{emit_instructions, render_program, EmitError, Instruction, ProgramTemplate};
