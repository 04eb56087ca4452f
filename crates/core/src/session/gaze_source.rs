use std::time::Duration;

use crate::detection::domain::face_landmarks::{FaceLandmarks, TrackedEye};
use crate::shared::gaze_sample::GazeSample;

/// One processed camera frame as seen by the session.
///
/// `eye_x` is the raw normalized reading from the landmark detector, or
/// `None` when no face was found in the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeObservation {
    pub at: Duration,
    pub eye_x: Option<f64>,
}

impl GazeObservation {
    pub fn new(at: Duration, eye_x: Option<f64>) -> Self {
        Self { at, eye_x }
    }

    pub fn no_face(at: Duration) -> Self {
        Self { at, eye_x: None }
    }

    pub fn from_landmarks(
        at: Duration,
        landmarks: Option<&FaceLandmarks>,
        eye: TrackedEye,
    ) -> Self {
        let eye_x = landmarks
            .and_then(|lm| lm.gaze_sample(eye, at))
            .map(|sample| sample.value());
        Self { at, eye_x }
    }

    /// The sample to feed the interpreter, if this frame produced one.
    pub fn sample(&self) -> Option<GazeSample> {
        self.eye_x.and_then(|x| GazeSample::clamped(x, self.at))
    }
}

/// Produces gaze observations in capture order.
///
/// Implementations wrap a live camera feed or a recorded trace.
pub trait GazeSource: Send {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<GazeObservation, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
