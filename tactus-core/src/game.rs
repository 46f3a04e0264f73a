//! Top-level game cycle
//!
//! Idle prompt -> tap-count pattern selection -> countdown -> judged
//! playthrough -> rating -> retry prompt, forever. There is no exit
//! condition: the device stays in this cycle until powered off.

use crate::frame::Frame;
use crate::pattern::Pattern;
use crate::scheduler::{BeatScheduler, Step};
use crate::select::{PatternSelector, Selection};
use crate::tally::Tally;
use crate::timing::{COUNT_HOLD_MS, GO_HOLD_MS, RATING_DWELL_MS, RETRY_SETTLE_MS};

/// Game cycle state.
#[derive(Debug)]
enum State {
    /// Waiting for the start gesture, with no timeout.
    Idle,
    /// Collecting the pattern-selection tap burst.
    Selecting(PatternSelector),
    /// 3-2-1-GO countdown; `step` 0..=3, display only.
    Countdown {
        step: u8,
        until: u64,
        pattern: usize,
    },
    /// Judged playthrough in progress.
    Playing(BeatScheduler),
    /// Final rating on screen.
    Rating { until: u64 },
    /// Waiting for the retry gesture, with no timeout.
    Retry { accept_at: u64 },
}

/// The whole game as one tick-driven machine.
///
/// Owns the playthrough tally exclusively; it is reset at the start of
/// every cycle and mutated only while a round runs.
#[derive(Debug)]
pub struct Game {
    catalog: &'static [Pattern],
    tally: Tally,
    state: State,
}

impl Game {
    /// Create the game in the idle state, returning the splash frame.
    pub fn new(catalog: &'static [Pattern]) -> (Self, Frame) {
        let game = Self {
            catalog,
            tally: Tally::new(),
            state: State::Idle,
        };
        (game, splash())
    }

    /// Current playthrough tally.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Advance the game by one poll tick.
    ///
    /// `tapped` is the consumed tap-sensor sample for this tick. Returns
    /// a frame only when the screen content changes.
    pub fn tick(&mut self, now_ms: u64, tapped: bool) -> Option<Frame> {
        match &mut self.state {
            State::Idle => {
                if tapped {
                    self.tally.reset();
                    let (selector, frame) = PatternSelector::start(self.catalog, now_ms);
                    self.state = State::Selecting(selector);
                    return Some(frame);
                }
                None
            }

            State::Selecting(selector) => match selector.tick(now_ms, tapped) {
                Selection::Pending(frame) => frame,
                Selection::Chosen(pattern) => {
                    self.state = State::Countdown {
                        step: 0,
                        until: now_ms + COUNT_HOLD_MS,
                        pattern,
                    };
                    Some(Frame::new("3", "Get ready..."))
                }
            },

            State::Countdown {
                step,
                until,
                pattern,
            } => {
                if now_ms < *until {
                    return None;
                }
                *step += 1;
                match *step {
                    1 => {
                        *until = now_ms + COUNT_HOLD_MS;
                        Some(Frame::new("2", "Get ready..."))
                    }
                    2 => {
                        *until = now_ms + COUNT_HOLD_MS;
                        Some(Frame::new("1", "Get ready..."))
                    }
                    3 => {
                        *until = now_ms + GO_HOLD_MS;
                        Some(Frame::new("GO!", ""))
                    }
                    _ => {
                        let catalog = self.catalog;
                        let (scheduler, frame) = BeatScheduler::start(&catalog[*pattern], now_ms);
                        self.state = State::Playing(scheduler);
                        Some(frame)
                    }
                }
            }

            State::Playing(scheduler) => match scheduler.tick(now_ms, tapped, &mut self.tally) {
                Step::Running(frame) => frame,
                Step::Finished => {
                    let frame = rating_frame(&self.tally);
                    self.state = State::Rating {
                        until: now_ms + RATING_DWELL_MS,
                    };
                    Some(frame)
                }
            },

            State::Rating { until } => {
                if now_ms >= *until {
                    self.state = State::Retry {
                        accept_at: now_ms + RETRY_SETTLE_MS,
                    };
                    return Some(Frame::new("AGAIN?", "Tap to retry"));
                }
                None
            }

            State::Retry { accept_at } => {
                if tapped && now_ms >= *accept_at {
                    self.state = State::Idle;
                    return Some(splash());
                }
                None
            }
        }
    }
}

/// Idle prompt.
fn splash() -> Frame {
    Frame::new("DRUM", "Tap to start")
}

/// Final rating with the score breakdown.
fn rating_frame(tally: &Tally) -> Frame {
    Frame::with_status(
        tally.rating().label(),
        format_args!(
            "{}/{} = {}%",
            tally.score,
            tally.total_beats,
            tally.percentage()
        ),
    )
}
