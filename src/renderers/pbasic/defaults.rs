//! Default values for BASIC Stamp 2 output
//!
//! Provides sensible defaults for the generated program and for which
//! MIDI tracks carry the two voices.

/// Pin the piezo speaker is wired to
pub const DEFAULT_SPEAKER_PIN: u8 = 10;

/// Highest I/O pin on a BS2 (P0-P15)
pub const MAX_SPEAKER_PIN: u8 = 15;

/// Identifier the speaker pin is declared under
pub const SPEAKER_ALIAS: &str = "speaker";

/// `{$STAMP ...}` editor directive target
pub const DEFAULT_STAMP_TARGET: &str = "BS2";

/// `{$PBASIC ...}` language version directive
pub const DEFAULT_PBASIC_VERSION: &str = "2.5";

/// Track holding the melody voice
pub const DEFAULT_MELODY_TRACK: usize = 0;

/// Track holding the bass voice
pub const DEFAULT_BASS_TRACK: usize = 1;

/// Longest duration a FREQOUT or PAUSE argument can hold (16-bit)
pub const MAX_DURATION_MS: u64 = u16::MAX as u64;

/// Column the trailing comment of a constant declaration starts at
pub const CONSTANT_COMMENT_COLUMN: usize = 18;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_SPEAKER_PIN, 10);
        assert!(DEFAULT_SPEAKER_PIN <= MAX_SPEAKER_PIN);
        assert_eq!(DEFAULT_MELODY_TRACK, 0);
        assert_eq!(DEFAULT_BASS_TRACK, 1);
        assert_eq!(MAX_DURATION_MS, 65_535);
    }
}
