mod event;
mod http;
mod websocket;

pub use http::{cleanup_lobby, get_lobby, health_check, join_lobby, leave_lobby, start_lobby};
pub use websocket::websocket_handler;
