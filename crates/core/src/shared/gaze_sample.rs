use std::time::Duration;

/// Normalized horizontal eye position for one processed camera frame.
///
/// `0.0` is the left edge of the camera frame, `1.0` the right edge.
/// Timestamps are offsets from a monotonic session origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeSample {
    value: f64,
    at: Duration,
}

impl GazeSample {
    pub fn new(value: f64, at: Duration) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&value),
            "gaze sample must be within [0, 1]"
        );
        Self { value, at }
    }

    /// Producer-side filtering of a raw detector reading.
    ///
    /// Non-finite readings are dropped so the frame is skipped instead of
    /// resetting the interpreter with a sentinel.
    pub fn clamped(raw: f64, at: Duration) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        Some(Self::new(raw.clamp(0.0, 1.0), at))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn at(&self) -> Duration {
        self.at
    }
}
