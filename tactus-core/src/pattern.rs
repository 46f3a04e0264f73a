//! Rhythm pattern catalog
//!
//! Patterns are fixed at compile time. Catalog order defines the
//! tap-count selection indices (1 tap = first pattern, and so on).

/// Upper bound on beats per pattern (sizes per-round outcome storage).
pub const MAX_BEATS: usize = 16;

/// A named rhythm pattern: an ordered sequence of beat intervals.
///
/// Invariants (enforced by authoring, checked in tests): the sequence is
/// non-empty and every interval exceeds the preview active-glyph hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    /// Stable catalog key.
    pub key: &'static str,
    /// Human-readable name shown on the display.
    pub name: &'static str,
    /// Beat intervals in milliseconds.
    pub beats_ms: &'static [u32],
}

impl Pattern {
    /// Number of beats in the pattern.
    pub fn len(&self) -> usize {
        self.beats_ms.len()
    }

    /// True if the pattern has no beats (never holds for catalog entries).
    pub fn is_empty(&self) -> bool {
        self.beats_ms.is_empty()
    }
}

/// The built-in patterns, in selection order.
pub static CATALOG: &[Pattern] = &[
    Pattern {
        key: "ROCK",
        name: "Rock Beat",
        // Classic 4/4 rock: steady quarter notes
        beats_ms: &[1000, 1000, 1000, 1000, 1000, 1000, 1000, 1000],
    },
    Pattern {
        key: "MARCH",
        name: "March",
        // Marching rhythm: steady but slightly faster
        beats_ms: &[700, 700, 700, 700, 700, 700, 700, 700],
    },
    Pattern {
        key: "HABANERA",
        name: "Habanera",
        // Habanera/tango rhythm: 1 + 1.5 + 0.5 + 1 beats
        beats_ms: &[1000, 1500, 500, 1000, 1000, 1500, 500, 1000],
    },
    Pattern {
        key: "BOSSA",
        name: "Bossa Nova",
        // Bossa nova clave-style rhythm
        beats_ms: &[900, 500, 500, 900, 900, 500, 500, 900],
    },
];

/// Look up a catalog pattern by its stable key.
pub fn by_key(key: &str) -> Option<&'static Pattern> {
    CATALOG.iter().find(|pattern| pattern.key == key)
}
