use crate::cursor::domain::cursor_relocator::{CursorRelocator, CursorWarp};
use crate::cursor::domain::display_layout::DisplayLayout;
use crate::gesture::domain::gesture_command::DisplaySide;

/// Moves the cursor to the center of the leftmost or rightmost display.
///
/// Never queries the current cursor position, so repeating a side always
/// lands on the same point.
pub struct LayoutCursorRelocator {
    layout: DisplayLayout,
    warp: Box<dyn CursorWarp>,
}

impl LayoutCursorRelocator {
    pub fn new(layout: DisplayLayout, warp: Box<dyn CursorWarp>) -> Self {
        Self { layout, warp }
    }
}

impl CursorRelocator for LayoutCursorRelocator {
    fn relocate_cursor_to_display(
        &mut self,
        side: DisplaySide,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let display = self.layout.display_for(side);
        let (x, y) = display.center();
        log::info!("Relocating cursor to {side} display #{} at ({x}, {y})", display.id);
        self.warp.warp_to(x, y)
    }
}
