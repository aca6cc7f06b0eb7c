//! Data Transfer Objects (DTOs) for the lobby server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (inbound and outbound)
//! - `http`: HTTP API request/response DTOs
//! - `field`: loosely typed payload fields shared by both

pub mod conversion;
pub mod field;
pub mod http;
pub mod websocket;
