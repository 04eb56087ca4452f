//! Converts a stream of webcam eye positions into discrete cursor moves
//! between displays.
//!
//! Landmark detection and the OS cursor are external collaborators; this
//! crate owns the gesture interpreter and the plumbing that feeds it.

pub mod shared {
    pub mod constants;
    pub mod gaze_sample;
}

pub mod detection {
    pub mod domain {
        pub mod face_landmarks;
    }
}

pub mod gesture {
    pub mod domain {
        pub mod gaze_gesture_interpreter;
        pub mod gaze_meter;
        pub mod gesture_command;
    }
}

pub mod cursor {
    pub mod domain {
        pub mod cursor_relocator;
        pub mod display_layout;
    }
    pub mod infrastructure;
}

pub mod session {
    pub mod drive_cursor_use_case;
    pub mod gaze_source;
    pub mod session_executor;
    pub mod session_logger;
    pub mod infrastructure;
}

pub mod trace {
    pub mod infrastructure;
}
