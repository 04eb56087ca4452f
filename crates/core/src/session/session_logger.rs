use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::gesture::domain::gesture_command::GestureOutcome;

/// Cross-cutting logger for gaze session events.
///
/// Decouples the session loop from specific output mechanisms (log crate,
/// UI signals) so each caller can observe gesture behavior without changing
/// the loop.
pub trait SessionLogger: Send {
    /// Report that another frame was processed.
    fn frame(&mut self, frames_seen: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record the interpreter's decision for one sample.
    fn gesture(&mut self, at: Duration, outcome: GestureOutcome);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _frames_seen: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn gesture(&mut self, _at: Duration, _outcome: GestureOutcome) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that tracks stage timings and decision counts and reports a
/// summary when the session ends.
///
/// Frame progress is throttled to every `throttle_frames` frames, since a
/// camera delivers dozens per second.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    decisions: HashMap<&'static str, usize>,
    start_time: Instant,
    frames: usize,
    messages: Vec<String>,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            decisions: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.decisions.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Session summary ({} frames, {elapsed_s:.1}s wall time):",
            self.frames
        )];

        let mut kinds: Vec<_> = self.decisions.iter().collect();
        kinds.sort();
        for (kind, count) in kinds {
            lines.push(format!("  {kind:12}: {count}"));
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            let calls = durations.len();
            lines.push(format!("  {stage:12}: avg {avg_ms:6.2}ms over {calls} calls"));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Number of samples that ended in the given kind of decision.
    pub fn decisions_for(&self, kind: &str) -> usize {
        self.decisions.get(kind).copied().unwrap_or(0)
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(300)
    }
}

fn decision_kind(outcome: GestureOutcome) -> &'static str {
    match outcome {
        GestureOutcome::Idle => "idle",
        GestureOutcome::CoolingDown => "cooling_down",
        GestureOutcome::Absorbed(_) => "absorbed",
        GestureOutcome::Suppressed(_) => "suppressed",
        GestureOutcome::Fired(_) => "fired",
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, frames_seen: usize) {
        self.frames = frames_seen;
        if frames_seen % self.throttle_frames == 0 {
            log::info!("Processed {frames_seen} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn gesture(&mut self, at: Duration, outcome: GestureOutcome) {
        *self.decisions.entry(decision_kind(outcome)).or_insert(0) += 1;
        if let GestureOutcome::Absorbed(side) = outcome {
            log::debug!(
                "Crossing toward {side} absorbed by cooldown at {:.3}s",
                at.as_secs_f64()
            );
        }
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
