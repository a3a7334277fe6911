pub mod http;
pub mod logger;
pub mod session_middleware;
