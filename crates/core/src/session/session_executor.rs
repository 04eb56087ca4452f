use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::cursor::domain::cursor_relocator::CursorRelocator;
use crate::gesture::domain::gesture_command::{DisplaySide, EnabledDirections, GestureOutcome};
use crate::session::gaze_source::GazeSource;
use crate::session::session_logger::SessionLogger;
use crate::shared::gaze_sample::GazeSample;

/// Published to the UI observer once per processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    pub at: Duration,
    /// `None` when the frame had no detected face.
    pub sample: Option<GazeSample>,
    /// `None` when the interpreter was not consulted.
    pub outcome: Option<GestureOutcome>,
}

/// Return `false` to stop the session after the current frame.
pub type EventCallback = Box<dyn Fn(&GestureEvent) -> bool + Send>;

/// Configuration for a gaze session run.
pub struct SessionConfig {
    pub enabled: EnabledDirections,
    /// Interpreter creation time on the observation clock.
    pub created_at: Duration,
    pub on_event: Option<EventCallback>,
    pub logger: Box<dyn SessionLogger>,
    pub cancelled: Arc<AtomicBool>,
}

/// Counters accumulated over one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub frames: usize,
    pub samples: usize,
    pub missing_faces: usize,
    pub moved_left: usize,
    pub moved_right: usize,
    /// Crossings dropped because they fell inside the cooldown.
    pub absorbed: usize,
    /// Crossings toward a disabled direction.
    pub suppressed: usize,
}

impl SessionReport {
    pub fn commands(&self) -> usize {
        self.moved_left + self.moved_right
    }

    pub fn record(&mut self, outcome: GestureOutcome) {
        self.samples += 1;
        match outcome {
            GestureOutcome::Fired(DisplaySide::Left) => self.moved_left += 1,
            GestureOutcome::Fired(DisplaySide::Right) => self.moved_right += 1,
            GestureOutcome::Absorbed(_) => self.absorbed += 1,
            GestureOutcome::Suppressed(_) => self.suppressed += 1,
            GestureOutcome::Idle | GestureOutcome::CoolingDown => {}
        }
    }
}

/// Abstracts how the observe → interpret → relocate loop is executed.
pub trait GazeSessionExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn GazeSource>,
        relocator: Box<dyn CursorRelocator>,
        config: SessionConfig,
    ) -> Result<SessionReport, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_by_outcome() {
        let mut report = SessionReport::default();
        report.record(GestureOutcome::Idle);
        report.record(GestureOutcome::CoolingDown);
        report.record(GestureOutcome::Fired(DisplaySide::Left));
        report.record(GestureOutcome::Fired(DisplaySide::Right));
        report.record(GestureOutcome::Fired(DisplaySide::Right));
        report.record(GestureOutcome::Absorbed(DisplaySide::Left));
        report.record(GestureOutcome::Suppressed(DisplaySide::Right));

        assert_eq!(report.samples, 7);
        assert_eq!(report.moved_left, 1);
        assert_eq!(report.moved_right, 2);
        assert_eq!(report.commands(), 3);
        assert_eq!(report.absorbed, 1);
        assert_eq!(report.suppressed, 1);
        assert_eq!(report.frames, 0);
    }
}
