//! Real-time quiz lobby coordinator.
//!
//! Tracks who has joined which quiz room, enforces single-admin start
//! authority, and fans out state-change events to every room member over
//! WebSocket connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
