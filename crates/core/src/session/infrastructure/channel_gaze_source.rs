use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use thiserror::Error;

use crate::detection::domain::face_landmarks::{FaceLandmarks, TrackedEye};
use crate::session::gaze_source::{GazeObservation, GazeSource};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FeedError {
    #[error("gaze session is no longer receiving observations")]
    Closed,
}

/// Creates a live feed for camera callbacks and the source a session reads.
///
/// Observations are stamped relative to the moment the feed is created, so
/// a session over this source should use `Duration::ZERO` as its creation
/// time.
pub fn gaze_feed(
    capacity: usize,
    eye: TrackedEye,
    cancelled: Arc<AtomicBool>,
) -> (GazeFeed, ChannelGazeSource) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity.max(1));
    let feed = GazeFeed {
        sender,
        origin: Instant::now(),
        eye,
    };
    let source = ChannelGazeSource {
        receiver,
        cancelled,
    };
    (feed, source)
}

/// Producer half, handed to whatever thread delivers camera frames.
///
/// Never blocks: when the session falls behind, the newest frame is dropped,
/// like a capture pipeline discarding late frames.
#[derive(Clone)]
pub struct GazeFeed {
    sender: Sender<GazeObservation>,
    origin: Instant,
    eye: TrackedEye,
}

impl GazeFeed {
    /// Returns `Ok(false)` when the observation was dropped because the
    /// session is busy.
    pub fn push(&self, observation: GazeObservation) -> Result<bool, FeedError> {
        match self.sender.try_send(observation) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                log::debug!(
                    "Dropping gaze observation at {:?}: session busy",
                    observation.at
                );
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(FeedError::Closed),
        }
    }

    /// Pushes the detector output for a frame captured just now.
    pub fn push_landmarks(&self, landmarks: Option<&FaceLandmarks>) -> Result<bool, FeedError> {
        let at = self.origin.elapsed();
        self.push(GazeObservation::from_landmarks(at, landmarks, self.eye))
    }
}

/// Consumer half: yields observations until every feed is dropped or the
/// session is cancelled.
pub struct ChannelGazeSource {
    receiver: Receiver<GazeObservation>,
    cancelled: Arc<AtomicBool>,
}

impl GazeSource for ChannelGazeSource {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<GazeObservation, Box<dyn std::error::Error>>> + '_> {
        let receiver = &self.receiver;
        let cancelled = &self.cancelled;
        Box::new(std::iter::from_fn(move || loop {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            match receiver.recv_timeout(POLL_INTERVAL) {
                Ok(observation) => return Some(Ok(observation)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }))
    }

    fn close(&mut self) {
        // Pending observations are discarded with the receiver.
    }
}
