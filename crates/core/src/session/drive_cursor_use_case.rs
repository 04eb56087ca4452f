use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::cursor::domain::cursor_relocator::CursorRelocator;
use crate::gesture::domain::gesture_command::EnabledDirections;
use crate::session::gaze_source::GazeSource;
use crate::session::session_executor::{
    EventCallback, GazeSessionExecutor, SessionConfig, SessionReport,
};
use crate::session::session_logger::{NullSessionLogger, SessionLogger};

/// Drives the cursor from a stream of gaze observations.
///
/// Wires the source and relocator together and delegates execution to a
/// `GazeSessionExecutor`. This is a single-use struct: `execute` consumes
/// the owned components, so calling it twice will fail.
pub struct DriveCursorUseCase {
    source: Option<Box<dyn GazeSource>>,
    relocator: Option<Box<dyn CursorRelocator>>,
    executor: Box<dyn GazeSessionExecutor>,
    enabled: EnabledDirections,
    created_at: Duration,
    on_event: Option<EventCallback>,
    logger: Option<Box<dyn SessionLogger>>,
    cancelled: Arc<AtomicBool>,
}

impl DriveCursorUseCase {
    pub fn new(
        source: Box<dyn GazeSource>,
        relocator: Box<dyn CursorRelocator>,
        executor: Box<dyn GazeSessionExecutor>,
        enabled: EnabledDirections,
    ) -> Self {
        Self {
            source: Some(source),
            relocator: Some(relocator),
            executor,
            enabled,
            created_at: Duration::ZERO,
            on_event: None,
            logger: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_created_at(mut self, created_at: Duration) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_event_callback(mut self, on_event: EventCallback) -> Self {
        self.on_event = Some(on_event);
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn SessionLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_cancellation(mut self, cancelled: Arc<AtomicBool>) -> Self {
        self.cancelled = cancelled;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn execute(&mut self) -> Result<SessionReport, Box<dyn std::error::Error>> {
        let config = SessionConfig {
            enabled: self.enabled,
            created_at: self.created_at,
            on_event: self.on_event.take(),
            logger: self
                .logger
                .take()
                .unwrap_or_else(|| Box::new(NullSessionLogger)),
            cancelled: self.cancelled.clone(),
        };

        self.executor.execute(
            self.source.take().ok_or("Session already executed")?,
            self.relocator.take().ok_or("Session already executed")?,
            config,
        )
    }
}
