//! Tap-count pattern selection
//!
//! The player taps N times to pick the Nth pattern. A selection locks in
//! once taps stop for the confirm-silence interval; with no taps at all
//! it falls back to the first pattern after a longer timeout.

use crate::frame::Frame;
use crate::pattern::Pattern;
use crate::timing::{CONFIRM_SILENCE_MS, SELECT_SETTLE_MS, SELECT_TIMEOUT_MS};

/// Result of one selector tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Still collecting taps. Carries a feedback frame when a new tap
    /// was counted, nothing on quiet ticks.
    Pending(Option<Frame>),
    /// Selection locked in: catalog index of the chosen pattern.
    Chosen(usize),
}

/// Tap-burst pattern selector.
#[derive(Debug)]
pub struct PatternSelector {
    catalog: &'static [Pattern],
    started_ms: u64,
    last_tap_ms: u64,
    tap_count: u16,
}

impl PatternSelector {
    /// Begin a selection round, returning the prompt frame.
    ///
    /// Tap samples during the initial settle period are discarded, so
    /// leftover motion from the start gesture cannot count as a vote.
    pub fn start(catalog: &'static [Pattern], now_ms: u64) -> (Self, Frame) {
        let selector = Self {
            catalog,
            started_ms: now_ms,
            last_tap_ms: now_ms,
            tap_count: 0,
        };
        let frame = Frame::with_status("SELECT", format_args!("1-{} taps", catalog.len()));
        (selector, frame)
    }

    /// Advance the selector by one poll tick.
    pub fn tick(&mut self, now_ms: u64, tapped: bool) -> Selection {
        if now_ms < self.started_ms + SELECT_SETTLE_MS {
            return Selection::Pending(None);
        }

        if tapped {
            self.tap_count += 1;
            self.last_tap_ms = now_ms;
            let implied = &self.catalog[self.implied_index()];
            let frame = Frame::with_primary(format_args!("{}", self.tap_count), implied.name);
            return Selection::Pending(Some(frame));
        }

        // Taps counted and the player has gone quiet: lock it in
        if self.tap_count > 0 && now_ms - self.last_tap_ms > CONFIRM_SILENCE_MS {
            return Selection::Chosen(self.implied_index());
        }

        // No taps at all: default to the first pattern
        if self.tap_count == 0 && now_ms - self.started_ms > SELECT_TIMEOUT_MS {
            self.tap_count = 1;
            return Selection::Chosen(0);
        }

        Selection::Pending(None)
    }

    /// Catalog index implied by the current count: clamp(count, 1, N) - 1.
    fn implied_index(&self) -> usize {
        let n = self.catalog.len() as u16;
        (self.tap_count.clamp(1, n) - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::CATALOG;
    use crate::timing::POLL_MS;

    fn after_settle(start: u64) -> u64 {
        start + SELECT_SETTLE_MS
    }

    #[test]
    fn test_prompt_frame() {
        let (_, frame) = PatternSelector::start(CATALOG, 0);
        assert_eq!(frame.primary.as_str(), "SELECT");
        assert_eq!(frame.secondary.as_str(), "1-4 taps");
    }

    #[test]
    fn test_no_taps_defaults_to_first_pattern() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 1_000);
        let mut now = 1_000;
        while now <= 1_000 + SELECT_TIMEOUT_MS {
            assert_eq!(sel.tick(now, false), Selection::Pending(None));
            now += POLL_MS;
        }
        assert_eq!(sel.tick(now, false), Selection::Chosen(0));
    }

    #[test]
    fn test_three_taps_then_silence_picks_third() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 0);
        let mut now = after_settle(0);
        for _ in 0..3 {
            assert!(matches!(sel.tick(now, true), Selection::Pending(Some(_))));
            now += 200;
        }
        // 1.6s of silence since the last tap
        let last_tap = now - 200;
        assert_eq!(sel.tick(last_tap + 1_600, false), Selection::Chosen(2));
    }

    #[test]
    fn test_overcounting_clamps_to_last_pattern() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 0);
        let mut now = after_settle(0);
        let mut last_frame = None;
        for _ in 0..7 {
            if let Selection::Pending(Some(frame)) = sel.tick(now, true) {
                last_frame = Some(frame);
            }
            now += 100;
        }
        // Feedback already shows the clamped (last) pattern
        let frame = last_frame.unwrap();
        assert_eq!(frame.primary.as_str(), "7");
        assert_eq!(frame.secondary.as_str(), CATALOG[3].name);

        assert_eq!(sel.tick(now + CONFIRM_SILENCE_MS + 1, false), Selection::Chosen(3));
    }

    #[test]
    fn test_taps_during_settle_are_discarded() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 0);
        assert_eq!(sel.tick(100, true), Selection::Pending(None));
        assert_eq!(sel.tick(200, true), Selection::Pending(None));
        // First counted tap is the one after the settle period
        let now = after_settle(0);
        match sel.tick(now, true) {
            Selection::Pending(Some(frame)) => assert_eq!(frame.primary.as_str(), "1"),
            other => panic!("expected feedback frame, got {:?}", other),
        }
    }

    #[test]
    fn test_quiet_ticks_emit_no_frames() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 0);
        let now = after_settle(0);
        sel.tick(now, true);
        for i in 1..100 {
            assert_eq!(sel.tick(now + i * POLL_MS, false), Selection::Pending(None));
        }
    }

    #[test]
    fn test_feedback_shows_implied_pattern() {
        let (mut sel, _) = PatternSelector::start(CATALOG, 0);
        let now = after_settle(0);
        match sel.tick(now, true) {
            Selection::Pending(Some(frame)) => {
                assert_eq!(frame.primary.as_str(), "1");
                assert_eq!(frame.secondary.as_str(), CATALOG[0].name);
            }
            other => panic!("expected feedback frame, got {:?}", other),
        }
        match sel.tick(now + 300, true) {
            Selection::Pending(Some(frame)) => {
                assert_eq!(frame.primary.as_str(), "2");
                assert_eq!(frame.secondary.as_str(), CATALOG[1].name);
            }
            other => panic!("expected feedback frame, got {:?}", other),
        }
    }
}
