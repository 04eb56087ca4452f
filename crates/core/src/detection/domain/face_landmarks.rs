//! Eye landmarks reported by the external vision detector.
//!
//! Only the pupils matter for gaze gestures: a single tracked pupil's
//! horizontal position, normalized by the frame width, becomes the gaze sample.

use std::time::Duration;

use crate::shared::gaze_sample::GazeSample;

/// Which pupil drives the gesture interpreter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackedEye {
    #[default]
    Left,
    Right,
}

impl TrackedEye {
    fn other(self) -> Self {
        match self {
            TrackedEye::Left => TrackedEye::Right,
            TrackedEye::Right => TrackedEye::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    /// Pixel coordinates; points with x <= 0 are treated as invisible.
    left_pupil: (f64, f64),
    right_pupil: (f64, f64),
    frame_width: u32,
}

impl FaceLandmarks {
    pub fn new(left_pupil: (f64, f64), right_pupil: (f64, f64), frame_width: u32) -> Self {
        Self {
            left_pupil,
            right_pupil,
            frame_width,
        }
    }

    pub fn pupil(&self, eye: TrackedEye) -> (f64, f64) {
        match eye {
            TrackedEye::Left => self.left_pupil,
            TrackedEye::Right => self.right_pupil,
        }
    }

    pub fn has_visible(&self) -> bool {
        self.left_pupil.0 > 0.0 || self.right_pupil.0 > 0.0
    }

    /// Horizontal position of `eye` divided by frame width, unclamped.
    ///
    /// Returns `None` when the pupil is invisible or the frame has no width.
    pub fn normalized_eye_x(&self, eye: TrackedEye) -> Option<f64> {
        let (x, _) = self.pupil(eye);
        if x <= 0.0 || self.frame_width == 0 {
            return None;
        }
        Some(x / self.frame_width as f64)
    }

    /// Gaze sample for this frame, falling back to the other pupil when the
    /// tracked one was not found.
    pub fn gaze_sample(&self, eye: TrackedEye, at: Duration) -> Option<GazeSample> {
        if !self.has_visible() {
            return None;
        }
        self.normalized_eye_x(eye)
            .or_else(|| self.normalized_eye_x(eye.other()))
            .and_then(|x| GazeSample::clamped(x, at))
    }
}
