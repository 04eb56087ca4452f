use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::cursor::domain::cursor_relocator::CursorRelocator;
use crate::gesture::domain::gaze_gesture_interpreter::GazeGestureInterpreter;
use crate::gesture::domain::gesture_command::GestureOutcome;
use crate::session::gaze_source::{GazeObservation, GazeSource};
use crate::session::session_executor::{
    GazeSessionExecutor, GestureEvent, SessionConfig, SessionReport,
};
use crate::shared::constants::OBSERVATION_CHANNEL_CAPACITY;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Runs the gaze session with the source on its own thread.
///
/// Layout: `source → main [interpret/relocate/publish]`
///
/// The calling thread is the only one that touches the interpreter, so a
/// camera that delivers frames on a background thread never races it.
pub struct ThreadedGazeSession {
    channel_capacity: usize,
}

impl ThreadedGazeSession {
    pub fn new() -> Self {
        Self {
            channel_capacity: OBSERVATION_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(channel_capacity: usize) -> Self {
        Self {
            channel_capacity: channel_capacity.max(1),
        }
    }
}

impl Default for ThreadedGazeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeSessionExecutor for ThreadedGazeSession {
    fn execute(
        &self,
        source: Box<dyn GazeSource>,
        mut relocator: Box<dyn CursorRelocator>,
        mut config: SessionConfig,
    ) -> Result<SessionReport, Box<dyn std::error::Error>> {
        let (observation_tx, observation_rx) =
            crossbeam_channel::bounded::<Result<GazeObservation, SendError>>(self.channel_capacity);

        let source_handle = spawn_source(source, observation_tx, config.cancelled.clone());

        config.logger.info(&format!(
            "Gaze session started (left: {}, right: {})",
            config.enabled.left, config.enabled.right
        ));

        let (report, main_error) = run_main_loop(observation_rx, &mut *relocator, &mut config);

        // Unblocks a live source waiting for its next frame.
        if main_error.is_some() {
            config.cancelled.store(true, Ordering::Relaxed);
        }

        let result = join_source(source_handle, main_error);
        config.logger.summary();
        result.map(|()| report)
    }
}

fn spawn_source(
    mut source: Box<dyn GazeSource>,
    observation_tx: crossbeam_channel::Sender<Result<GazeObservation, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for observation in source.observations() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = observation.map_err(|e| -> SendError { e.to_string().into() });
            if observation_tx.send(mapped).is_err() {
                break;
            }
        }
        source.close();
    })
}

/// Receives observations, drives the interpreter, relocates the cursor on
/// fired gestures and publishes one event per frame.
fn run_main_loop(
    observation_rx: crossbeam_channel::Receiver<Result<GazeObservation, SendError>>,
    relocator: &mut dyn CursorRelocator,
    config: &mut SessionConfig,
) -> (SessionReport, Option<Box<dyn std::error::Error>>) {
    let mut interpreter =
        GazeGestureInterpreter::with_directions(config.created_at, config.enabled);
    let mut report = SessionReport::default();

    for received in observation_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            break;
        }

        let observation = match received {
            Ok(observation) => observation,
            Err(e) => return (report, Some(e.to_string().into())),
        };

        report.frames += 1;
        config.logger.frame(report.frames);

        // Frames without a face leave the interpreter untouched.
        let sample = observation.sample();
        let outcome = match sample {
            Some(sample) => {
                let outcome = interpreter.evaluate(sample, observation.at);
                report.record(outcome);
                config.logger.gesture(observation.at, outcome);
                Some(outcome)
            }
            None => {
                report.missing_faces += 1;
                None
            }
        };

        if let Some(GestureOutcome::Fired(side)) = outcome {
            let started = Instant::now();
            if let Err(e) = relocator.relocate_cursor_to_display(side) {
                return (report, Some(e));
            }
            config
                .logger
                .timing("relocate", started.elapsed().as_secs_f64() * 1000.0);
        }

        if let Some(ref callback) = config.on_event {
            let event = GestureEvent {
                at: observation.at,
                sample,
                outcome,
            };
            if !callback(&event) {
                config.logger.info("Gaze session stopped by observer");
                config.cancelled.store(true, Ordering::Relaxed);
                break;
            }
        }
    }

    (report, None)
}

/// Joins the source thread and coalesces the first error encountered.
///
/// The source closed itself before the thread finished.
fn join_source(
    source_handle: std::thread::JoinHandle<()>,
    first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let joined = source_handle.join();

    match (first_error, joined) {
        (Some(e), _) => Err(e),
        (None, Ok(())) => Ok(()),
        (None, Err(_)) => Err("Source thread panicked".into()),
    }
}
