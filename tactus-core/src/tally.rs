//! Playthrough score accumulator and rating tiers

/// Running (score, total_beats) tally for one playthrough.
///
/// `begin_beat` is called exactly once per judged beat regardless of
/// outcome; `record_hit` only on hits, so `score <= total_beats` always.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tally {
    /// Beats answered with an in-window tap.
    pub score: u16,
    /// Beats judged so far.
    pub total_beats: u16,
}

impl Tally {
    /// Create an empty tally.
    pub const fn new() -> Self {
        Self {
            score: 0,
            total_beats: 0,
        }
    }

    /// Reset for a new playthrough.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start judging a beat.
    pub fn begin_beat(&mut self) {
        self.total_beats += 1;
    }

    /// Record an in-window tap for the current beat.
    pub fn record_hit(&mut self) {
        debug_assert!(self.score < self.total_beats);
        self.score += 1;
    }

    /// Hit percentage, 0 when no beats were judged.
    pub fn percentage(&self) -> u16 {
        if self.total_beats == 0 {
            0
        } else {
            self.score * 100 / self.total_beats
        }
    }

    /// Rating tier for the current percentage.
    pub fn rating(&self) -> Rating {
        Rating::from_percentage(self.percentage())
    }
}

/// Coarse qualitative grade for a finished playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rating {
    Perfect,
    Great,
    Good,
    Retry,
}

impl Rating {
    /// Tier boundaries are inclusive at the lower bound.
    pub fn from_percentage(pct: u16) -> Self {
        if pct >= 90 {
            Rating::Perfect
        } else if pct >= 70 {
            Rating::Great
        } else if pct >= 50 {
            Rating::Good
        } else {
            Rating::Retry
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Rating::Perfect => "PERFECT!",
            Rating::Great => "GREAT!",
            Rating::Good => "GOOD",
            Rating::Retry => "RETRY?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_tally_is_retry() {
        let tally = Tally::new();
        assert_eq!(tally.percentage(), 0);
        assert_eq!(tally.rating(), Rating::Retry);
    }

    #[test]
    fn test_ninety_percent_is_inclusive() {
        let tally = Tally {
            score: 9,
            total_beats: 10,
        };
        assert_eq!(tally.percentage(), 90);
        assert_eq!(tally.rating(), Rating::Perfect);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Rating::from_percentage(100), Rating::Perfect);
        assert_eq!(Rating::from_percentage(89), Rating::Great);
        assert_eq!(Rating::from_percentage(70), Rating::Great);
        assert_eq!(Rating::from_percentage(69), Rating::Good);
        assert_eq!(Rating::from_percentage(50), Rating::Good);
        assert_eq!(Rating::from_percentage(49), Rating::Retry);
        assert_eq!(Rating::from_percentage(0), Rating::Retry);
    }

    #[test]
    fn test_half_hits_is_good() {
        let mut tally = Tally::new();
        for i in 0..4 {
            tally.begin_beat();
            if i % 2 == 0 {
                tally.record_hit();
            }
        }
        assert_eq!(tally.percentage(), 50);
        assert_eq!(tally.rating(), Rating::Good);
    }

    #[test]
    fn test_reset_clears_both_counters() {
        let mut tally = Tally::new();
        tally.begin_beat();
        tally.record_hit();
        tally.reset();
        assert_eq!(tally, Tally::new());
    }

    proptest! {
        #[test]
        fn prop_score_never_exceeds_total(outcomes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut tally = Tally::new();
            for (i, hit) in outcomes.iter().enumerate() {
                tally.begin_beat();
                prop_assert_eq!(tally.total_beats as usize, i + 1);
                if *hit {
                    tally.record_hit();
                }
                prop_assert!(tally.score <= tally.total_beats);
            }
            prop_assert!(tally.percentage() <= 100);
        }
    }
}
