use std::time::Duration;

/// A sample strictly above this, coming from at-or-below, is a rising edge.
pub const GAZE_HIGH_THRESHOLD: f64 = 0.6;

/// A sample strictly below this, coming from at-or-above, is a falling edge.
pub const GAZE_LOW_THRESHOLD: f64 = 0.4;

/// Minimum time between two emitted gesture commands.
pub const GESTURE_COOLDOWN: Duration = Duration::from_secs(1);

/// Eye position assumed before the first sample arrives (frame center).
pub const INITIAL_EYE_X: f64 = 0.5;

/// Bounded capacity of the observation channel between camera and interpreter.
pub const OBSERVATION_CHANNEL_CAPACITY: usize = 8;

/// Fallback layout when no display file is given: two 1080p panels side by side.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1920;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 1080;
