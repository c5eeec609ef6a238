//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_lobby, get_stats, health_check};
pub use websocket::websocket_handler;
