pub mod channel_gaze_source;
pub mod threaded_gaze_session;
