//! PBASIC template rendering system
//!
//! Provides Mustache-based templates for BASIC Stamp 2 program generation.
//! Every value is inserted unescaped (`{{{ }}}`) since PBASIC comments use
//! characters that HTML escaping would mangle.
//!
//! ## Template Variants
//!
//! - `Annotated` (default): section comments between the directives, the
//!   pin declaration, the constants and the music
//! - `Compact`: the same program without section comments

use serde::{Deserialize, Serialize};

use super::EmitError;

/// Template selection for PBASIC output
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgramTemplate {
    #[default]
    Annotated,
    Compact,
}

/// Context data for template rendering
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    /// `' {$STAMP BS2}` line
    pub stamp_directive: String,

    /// `' {$PBASIC 2.5}` line
    pub pbasic_directive: String,

    /// Name the speaker pin is declared as
    pub speaker_alias: String,

    /// I/O pin number
    pub speaker_pin: String,

    /// Pre-rendered `CON` declarations, one per line
    pub constants: String,

    /// Pre-rendered FREQOUT/PAUSE lines
    pub instructions: String,
}

impl TemplateContext {
    pub fn new(stamp_target: &str, pbasic_version: &str, speaker_alias: &str, speaker_pin: u8) -> Self {
        Self {
            stamp_directive: format!("' {{$STAMP {}}}", stamp_target),
            pbasic_directive: format!("' {{$PBASIC {}}}", pbasic_version),
            speaker_alias: speaker_alias.to_string(),
            speaker_pin: speaker_pin.to_string(),
            constants: String::new(),
            instructions: String::new(),
        }
    }

    pub fn constants<S: Into<String>>(mut self, constants: S) -> Self {
        self.constants = constants.into();
        self
    }

    pub fn instructions<S: Into<String>>(mut self, instructions: S) -> Self {
        self.instructions = instructions.into();
        self
    }
}

/// Get template content by type
pub fn get_template_content(template_type: ProgramTemplate) -> &'static str {
    match template_type {
        ProgramTemplate::Annotated => include_str!("templates/annotated.bs2.mustache"),
        ProgramTemplate::Compact => include_str!("templates/compact.bs2.mustache"),
    }
}

/// Render a PBASIC program using a template
pub fn render_template(template_type: ProgramTemplate, context: &TemplateContext) -> Result<String, EmitError> {
    let template = mustache::compile_str(get_template_content(template_type))
        .map_err(|e| EmitError::Template(e.to_string()))?;
    template
        .render_to_string(context)
        .map_err(|e| EmitError::Template(e.to_string()))
}
