pub mod create_session;
pub mod get_session;
pub mod reset_session;
pub mod submit_session_image;
