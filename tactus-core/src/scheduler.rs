//! Beat scheduling and tap judgement
//!
//! Runs one full playthrough of a pattern: the announce/preview phases
//! (visual only, taps discarded), then one judged tap window per beat,
//! then the per-round result card.
//!
//! The scheduler never sleeps. The caller polls the tap sensor and calls
//! [`BeatScheduler::tick`] with the current time and the latest sample;
//! because the sensor is consumed on every tick, taps landing outside an
//! open window are discarded for the whole remaining interval and cannot
//! leak into the next beat's window.

use heapless::{String, Vec};

use crate::frame::{Frame, SECONDARY_LEN};
use crate::pattern::{Pattern, MAX_BEATS};
use crate::tally::Tally;
use crate::timing::{
    ANNOUNCE_MS, PREVIEW_ACTIVE_MS, PREVIEW_GAP_MS, RESULT_DWELL_MS, TAP_WINDOW_MS,
    WATCH_PROMPT_MS, YOUR_TURN_MS,
};

/// Judgement of a single beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeatOutcome {
    /// Tap observed inside the window.
    Hit,
    /// Window elapsed with no tap.
    Miss,
}

impl BeatOutcome {
    /// Result-card glyph.
    fn glyph(self) -> char {
        match self {
            BeatOutcome::Hit => 'O',
            BeatOutcome::Miss => 'X',
        }
    }
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Round still in progress; carries a frame when the screen changes.
    Running(Option<Frame>),
    /// Round finished (result card dwell included).
    Finished,
}

/// Playthrough phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pattern name on screen.
    Announce { until: u64 },
    /// "Watch..." prompt before the preview.
    WatchPrompt { until: u64 },
    /// Preview: active glyph held at a beat onset.
    PreviewActive { beat: usize, until: u64 },
    /// Preview: inactive glyph for the rest of the interval.
    PreviewRest { beat: usize, until: u64 },
    /// Quiet gap after the preview.
    PreviewGap { until: u64 },
    /// "Your turn!" prompt before judgement starts.
    YourTurn { until: u64 },
    /// Tap window open for a beat.
    Window { beat: usize, closes: u64, beat_ends: u64 },
    /// Window closed; waiting out the rest of the interval.
    Rest { beat: usize, until: u64 },
    /// Per-round result card.
    Result { until: u64 },
    /// Terminal for this round.
    Done,
}

/// One playthrough of a pattern.
#[derive(Debug)]
pub struct BeatScheduler {
    pattern: &'static Pattern,
    phase: Phase,
    outcomes: Vec<BeatOutcome, MAX_BEATS>,
}

impl BeatScheduler {
    /// Begin a playthrough, returning the announce frame.
    pub fn start(pattern: &'static Pattern, now_ms: u64) -> (Self, Frame) {
        let scheduler = Self {
            pattern,
            phase: Phase::Announce {
                until: now_ms + ANNOUNCE_MS,
            },
            outcomes: Vec::new(),
        };
        let frame = Frame::new(pattern.name, "");
        (scheduler, frame)
    }

    /// Judgements recorded so far, in beat order.
    pub fn outcomes(&self) -> &[BeatOutcome] {
        &self.outcomes
    }

    /// Advance the playthrough by one poll tick.
    ///
    /// `tapped` is the consumed sensor sample for this tick; it only
    /// matters while a window is open and is discarded everywhere else.
    pub fn tick(&mut self, now_ms: u64, tapped: bool, tally: &mut Tally) -> Step {
        match self.phase {
            Phase::Announce { until } => {
                if now_ms >= until {
                    self.phase = Phase::WatchPrompt {
                        until: now_ms + WATCH_PROMPT_MS,
                    };
                    return Step::Running(Some(Frame::new("Watch...", "")));
                }
                Step::Running(None)
            }

            Phase::WatchPrompt { until } => {
                if now_ms >= until {
                    return Step::Running(Some(self.preview_beat(0, now_ms)));
                }
                Step::Running(None)
            }

            Phase::PreviewActive { beat, until } => {
                if now_ms >= until {
                    let interval = self.interval_ms(beat);
                    self.phase = Phase::PreviewRest {
                        beat,
                        // Clamped: intervals always exceed the active hold
                        until: now_ms + interval.saturating_sub(PREVIEW_ACTIVE_MS),
                    };
                    return Step::Running(Some(Frame::new("[ ]", "")));
                }
                Step::Running(None)
            }

            Phase::PreviewRest { beat, until } => {
                if now_ms >= until {
                    let next = beat + 1;
                    if next < self.pattern.len() {
                        return Step::Running(Some(self.preview_beat(next, now_ms)));
                    }
                    // Screen keeps the inactive glyph through the gap
                    self.phase = Phase::PreviewGap {
                        until: now_ms + PREVIEW_GAP_MS,
                    };
                }
                Step::Running(None)
            }

            Phase::PreviewGap { until } => {
                if now_ms >= until {
                    self.phase = Phase::YourTurn {
                        until: now_ms + YOUR_TURN_MS,
                    };
                    return Step::Running(Some(Frame::new("Your turn!", "")));
                }
                Step::Running(None)
            }

            Phase::YourTurn { until } => {
                if now_ms >= until {
                    return Step::Running(Some(self.open_window(0, now_ms, tally)));
                }
                Step::Running(None)
            }

            Phase::Window {
                beat,
                closes,
                beat_ends,
            } => {
                if tapped {
                    tally.record_hit();
                    let _ = self.outcomes.push(BeatOutcome::Hit);
                    return Step::Running(Some(self.close_window(beat, now_ms, beat_ends, tally)));
                }
                if now_ms >= closes {
                    let _ = self.outcomes.push(BeatOutcome::Miss);
                    return Step::Running(Some(self.close_window(beat, now_ms, beat_ends, tally)));
                }
                Step::Running(None)
            }

            Phase::Rest { beat, until } => {
                if now_ms >= until {
                    return Step::Running(Some(self.next_beat(beat, now_ms, tally)));
                }
                Step::Running(None)
            }

            Phase::Result { until } => {
                if now_ms >= until {
                    self.phase = Phase::Done;
                    return Step::Finished;
                }
                Step::Running(None)
            }

            Phase::Done => Step::Finished,
        }
    }

    fn interval_ms(&self, beat: usize) -> u64 {
        self.pattern.beats_ms[beat] as u64
    }

    /// Show the active glyph at a preview beat onset.
    fn preview_beat(&mut self, beat: usize, now_ms: u64) -> Frame {
        self.phase = Phase::PreviewActive {
            beat,
            until: now_ms + PREVIEW_ACTIVE_MS,
        };
        Frame::new("[O]", "")
    }

    /// Open the tap window for a judged beat.
    fn open_window(&mut self, beat: usize, now_ms: u64, tally: &mut Tally) -> Frame {
        tally.begin_beat();
        self.phase = Phase::Window {
            beat,
            closes: now_ms + TAP_WINDOW_MS,
            beat_ends: now_ms + self.interval_ms(beat),
        };
        if tally.total_beats > 1 {
            Frame::with_primary(
                format_args!("[{}]", beat + 1),
                // Running score excludes the beat being judged
                &status_line(tally.score, tally.total_beats - 1),
            )
        } else {
            Frame::with_primary(format_args!("[{}]", beat + 1), "TAP!")
        }
    }

    /// Close the window and wait out the rest of the interval.
    ///
    /// When the window consumed the whole interval there is nothing left
    /// to wait for and the round advances immediately.
    fn close_window(
        &mut self,
        beat: usize,
        now_ms: u64,
        beat_ends: u64,
        tally: &mut Tally,
    ) -> Frame {
        if now_ms >= beat_ends {
            return self.next_beat(beat, now_ms, tally);
        }
        self.phase = Phase::Rest {
            beat,
            until: beat_ends,
        };
        Frame::new("[ ]", &status_line(tally.score, tally.total_beats))
    }

    /// Open the next beat's window, or show the result card after the last.
    fn next_beat(&mut self, beat: usize, now_ms: u64, tally: &mut Tally) -> Frame {
        let next = beat + 1;
        if next < self.pattern.len() {
            return self.open_window(next, now_ms, tally);
        }
        self.result_card(now_ms)
    }

    fn result_card(&mut self, now_ms: u64) -> Frame {
        self.phase = Phase::Result {
            until: now_ms + RESULT_DWELL_MS,
        };
        let hits = self
            .outcomes
            .iter()
            .filter(|o| matches!(o, BeatOutcome::Hit))
            .count();

        let mut glyphs: String<SECONDARY_LEN> = String::new();
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 && glyphs.push(' ').is_err() {
                break;
            }
            if glyphs.push(outcome.glyph()).is_err() {
                break;
            }
        }

        Frame::with_primary(format_args!("{}/{}", hits, self.pattern.len()), &glyphs)
    }
}

/// Running score status line.
fn status_line(score: u16, total: u16) -> String<SECONDARY_LEN> {
    let mut line: String<SECONDARY_LEN> = String::new();
    let _ = core::fmt::write(&mut line, format_args!("Hit: {}/{}", score, total));
    line
}
