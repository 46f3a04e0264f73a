//! Tap sensor trait

/// A source of discrete tap events, polled rather than pushed.
///
/// Implementations latch a tap until it is consumed: `poll_tap` reports
/// `true` at most once per physical tap, and subsequent calls report
/// `false` until a new tap occurs. Coalescing of rapid taps is the
/// caller's business; the sensor only answers "did at least one tap
/// happen since the last poll".
pub trait TapSensor {
    /// Bus or sensor error type.
    type Error;

    /// Report and consume a pending tap.
    fn poll_tap(&mut self) -> Result<bool, Self::Error>;

    /// Discard any pending tap without reporting it.
    ///
    /// A no-op when nothing is pending; calling it twice is equivalent
    /// to calling it once.
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.poll_tap().map(|_| ())
    }
}
