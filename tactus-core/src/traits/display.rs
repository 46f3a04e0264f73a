//! Display trait

/// The two-field text display the game renders into.
///
/// Rendering is best-effort: callers never propagate the error. A failed
/// refresh leaves a stale screen and the game carries on.
pub trait BeatDisplay {
    /// Bus or controller error type.
    type Error;

    /// Render the large beat glyph and the status line.
    fn show(&mut self, primary: &str, secondary: &str) -> Result<(), Self::Error>;
}
