//! Fixed timing constants
//!
//! Every duration in the game is compile-time fixed; there is no runtime
//! configuration. All values are milliseconds.

/// Game loop poll period. One cadence serves every phase: tap windows
/// need <= 10ms resolution, everything else tolerates up to 20ms.
pub const POLL_MS: u64 = 10;

/// Tap acceptance window after a beat is shown.
pub const TAP_WINDOW_MS: u64 = 300;

/// How long the "active" glyph is held during the rhythm preview.
pub const PREVIEW_ACTIVE_MS: u64 = 150;

/// Silence after the last tap that locks in a pattern selection.
pub const CONFIRM_SILENCE_MS: u64 = 1_500;

/// With no taps at all, selection falls back to the first pattern.
pub const SELECT_TIMEOUT_MS: u64 = 5_000;

/// Settle period after the selection prompt before taps are accepted.
pub const SELECT_SETTLE_MS: u64 = 500;

/// Pattern name dwell before the preview starts.
pub const ANNOUNCE_MS: u64 = 1_200;

/// "Watch..." prompt dwell.
pub const WATCH_PROMPT_MS: u64 = 500;

/// Gap between the end of the preview and the "Your turn!" prompt.
pub const PREVIEW_GAP_MS: u64 = 500;

/// "Your turn!" prompt dwell.
pub const YOUR_TURN_MS: u64 = 800;

/// Countdown digit hold (3, 2, 1).
pub const COUNT_HOLD_MS: u64 = 800;

/// "GO!" hold at the end of the countdown.
pub const GO_HOLD_MS: u64 = 400;

/// Per-round result card dwell.
pub const RESULT_DWELL_MS: u64 = 1_500;

/// Final rating dwell.
pub const RATING_DWELL_MS: u64 = 3_000;

/// Settle period after the retry prompt before taps are accepted.
pub const RETRY_SETTLE_MS: u64 = 500;
