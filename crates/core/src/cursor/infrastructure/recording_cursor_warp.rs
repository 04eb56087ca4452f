use std::sync::{Arc, Mutex};

use crate::cursor::domain::cursor_relocator::CursorWarp;

/// In-memory cursor that records every position it was warped to.
///
/// Clones share the same log, so one clone can be handed to a session
/// while another reads the positions afterwards.
#[derive(Clone, Default)]
pub struct RecordingCursorWarp {
    positions: Arc<Mutex<Vec<(i32, i32)>>>,
}

impl RecordingCursorWarp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.positions
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<(i32, i32)> {
        self.positions().last().copied()
    }
}

impl CursorWarp for RecordingCursorWarp {
    fn warp_to(&mut self, x: i32, y: i32) -> Result<(), Box<dyn std::error::Error>> {
        self.positions
            .lock()
            .map_err(|_| "Cursor position log poisoned")?
            .push((x, y));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let warp = RecordingCursorWarp::new();
        assert!(warp.positions().is_empty());
        assert_eq!(warp.current(), None);
    }

    #[test]
    fn test_records_in_order() {
        let mut warp = RecordingCursorWarp::new();
        warp.warp_to(10, 20).unwrap();
        warp.warp_to(-5, 7).unwrap();
        assert_eq!(warp.positions(), vec![(10, 20), (-5, 7)]);
        assert_eq!(warp.current(), Some((-5, 7)));
    }

    #[test]
    fn test_clones_share_log() {
        let reader = RecordingCursorWarp::new();
        let mut writer = reader.clone();
        writer.warp_to(1, 2).unwrap();
        assert_eq!(reader.positions(), vec![(1, 2)]);
    }
}
