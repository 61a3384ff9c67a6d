//! BASIC Stamp 2 program generation
//!
//! Turns merged segments into `FREQOUT`/`PAUSE` instructions and renders
//! them, together with the frequency constants they use, into a complete
//! PBASIC 2.5 program.
//!
//! # Usage
//! ```rust,ignore
//! use crate::renderers::pbasic::{emit_instructions, render_program};
//!
//! let instructions = emit_instructions(&timeline.segments, &tempo)?;
//! let program = render_program(&instructions, &settings)?;
//! ```

pub mod defaults;
pub mod emitter;
pub mod templates;

// Re-export main conversion functions
pub use emitter::{constant_declarations, emit_instructions, render_program, Instruction};
pub use templates::ProgramTemplate;

use thiserror::Error;

use crate::models::{PitchId, Tick};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("Segment at tick {start} lasts {duration_ms} ms, more than a BS2 instruction can hold (65535 ms)")]
    DurationOverflow { start: Tick, duration_ms: u64 },
    #[error("Segment at tick {start} has {count} pitches, FREQOUT plays at most two")]
    TooManyPitches { start: Tick, count: usize },
    #[error("Pitch {0} is outside the pitch table")]
    UnknownPitch(PitchId),
    #[error("Template rendering failed: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, EmitError>;
