use crate::gesture::domain::gesture_command::DisplaySide;

/// Domain interface for moving the OS cursor onto a display.
///
/// Relocating to the same side twice leaves the cursor where the first
/// call put it.
pub trait CursorRelocator: Send {
    fn relocate_cursor_to_display(
        &mut self,
        side: DisplaySide,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// The platform primitive that places the cursor at global coordinates.
pub trait CursorWarp: Send {
    fn warp_to(&mut self, x: i32, y: i32) -> Result<(), Box<dyn std::error::Error>>;
}
