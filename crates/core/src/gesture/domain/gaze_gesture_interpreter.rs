//! Threshold-crossing gesture interpreter with a post-command cooldown.
//!
//! A command fires only on the sample where gaze crosses a threshold, never
//! while it stays past it. After a command, every sample within
//! `GESTURE_COOLDOWN` is absorbed, but the previous eye position keeps
//! tracking so that a later re-crossing fires normally.

use std::time::Duration;

use crate::gesture::domain::gesture_command::{
    DisplaySide, EnabledDirections, GestureCommand, GestureOutcome,
};
use crate::shared::constants::{
    GAZE_HIGH_THRESHOLD, GAZE_LOW_THRESHOLD, GESTURE_COOLDOWN, INITIAL_EYE_X,
};
use crate::shared::gaze_sample::GazeSample;

pub struct GazeGestureInterpreter {
    last_eye_x: f64,
    last_movement_at: Duration,
    enabled: EnabledDirections,
}

impl GazeGestureInterpreter {
    /// `created_at` seeds the cooldown, so nothing fires during the first
    /// second of a session.
    pub fn new(created_at: Duration) -> Self {
        Self::with_directions(created_at, EnabledDirections::BOTH)
    }

    pub fn with_directions(created_at: Duration, enabled: EnabledDirections) -> Self {
        Self {
            last_eye_x: INITIAL_EYE_X,
            last_movement_at: created_at,
            enabled,
        }
    }

    pub fn last_eye_x(&self) -> f64 {
        self.last_eye_x
    }

    pub fn last_movement_at(&self) -> Duration {
        self.last_movement_at
    }

    pub fn enabled(&self) -> EnabledDirections {
        self.enabled
    }

    pub fn update(&mut self, sample: GazeSample, now: Duration) -> GestureCommand {
        self.evaluate(sample, now).command()
    }

    /// Like `update`, but reports why the command was or was not emitted.
    pub fn evaluate(&mut self, sample: GazeSample, now: Duration) -> GestureOutcome {
        let x = sample.value();
        let outcome = self.decide(x, now);

        if let GestureOutcome::Fired(side) = outcome {
            self.last_movement_at = now;
            log::info!("Gaze crossed toward {side} display at {:.3}s", now.as_secs_f64());
        } else {
            log::debug!("Gaze sample {x:.3} at {:.3}s: {outcome:?}", now.as_secs_f64());
        }

        self.last_eye_x = x;
        outcome
    }

    fn decide(&self, x: f64, now: Duration) -> GestureOutcome {
        let crossing = self.crossing(x);

        // A clock running backwards counts as zero elapsed time.
        if now.saturating_sub(self.last_movement_at) <= GESTURE_COOLDOWN {
            return match crossing {
                Some(side) => GestureOutcome::Absorbed(side),
                None => GestureOutcome::CoolingDown,
            };
        }

        match crossing {
            None => GestureOutcome::Idle,
            Some(side) if self.enabled.allows(side) => GestureOutcome::Fired(side),
            Some(side) => GestureOutcome::Suppressed(side),
        }
    }

    /// Strict on the new sample, inclusive on the previous one.
    fn crossing(&self, x: f64) -> Option<DisplaySide> {
        if x > GAZE_HIGH_THRESHOLD && self.last_eye_x <= GAZE_HIGH_THRESHOLD {
            Some(DisplaySide::Left)
        } else if x < GAZE_LOW_THRESHOLD && self.last_eye_x >= GAZE_LOW_THRESHOLD {
            Some(DisplaySide::Right)
        } else {
            None
        }
    }
}
