pub mod analysis;
pub mod common;
pub mod image;
pub mod session;
