pub mod layout_cursor_relocator;
pub mod recording_cursor_warp;
