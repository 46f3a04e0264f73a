//! Display frame
//!
//! One update of the two text fields the game renders: a large centered
//! beat glyph and a status line at the bottom of the screen.

use core::fmt;

use heapless::String;

/// Maximum characters in the primary field (12x16 glyphs on 128px).
pub const PRIMARY_LEN: usize = 10;

/// Maximum characters in the secondary field (6x8 glyphs on 128px).
pub const SECONDARY_LEN: usize = 21;

/// A single display update.
///
/// Frames are emitted by the game state machines only when the screen
/// content actually changes; quiet ticks emit nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Large centered text (beat glyph, prompt, rating).
    pub primary: String<PRIMARY_LEN>,
    /// Status line (running score, selection feedback).
    pub secondary: String<SECONDARY_LEN>,
}

impl Frame {
    /// Build a frame from two text fields, truncating to the field widths.
    pub fn new(primary: &str, secondary: &str) -> Self {
        Self {
            primary: truncated(primary),
            secondary: truncated(secondary),
        }
    }

    /// Build a frame with a formatted secondary field.
    pub fn with_status(primary: &str, status: fmt::Arguments<'_>) -> Self {
        let mut secondary: String<SECONDARY_LEN> = String::new();
        // Overflow truncates; never an error path
        let _ = fmt::write(&mut secondary, status);
        Self {
            primary: truncated(primary),
            secondary,
        }
    }

    /// Build a frame with a formatted primary field.
    pub fn with_primary(primary: fmt::Arguments<'_>, secondary: &str) -> Self {
        let mut field: String<PRIMARY_LEN> = String::new();
        let _ = fmt::write(&mut field, primary);
        Self {
            primary: field,
            secondary: truncated(secondary),
        }
    }
}

/// Copy a string, dropping characters past the field width.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_frame() {
        let frame = Frame::new("DRUM", "Tap to start");
        assert_eq!(frame.primary.as_str(), "DRUM");
        assert_eq!(frame.secondary.as_str(), "Tap to start");
    }

    #[test]
    fn test_formatted_status() {
        let frame = Frame::with_status("[3]", format_args!("Hit: {}/{}", 2, 3));
        assert_eq!(frame.primary.as_str(), "[3]");
        assert_eq!(frame.secondary.as_str(), "Hit: 2/3");
    }

    #[test]
    fn test_overlong_fields_truncate() {
        let frame = Frame::new(
            "a primary far too long",
            "a secondary line that is far too long",
        );
        assert_eq!(frame.primary.len(), PRIMARY_LEN);
        assert_eq!(frame.secondary.len(), SECONDARY_LEN);
    }
}
