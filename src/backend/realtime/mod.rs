//! Real-time Update System
//!
//! Fan-out of document writes to the other live sessions of the same
//! team. `channel` holds the per-team broadcast groups; `socket` drives
//! one WebSocket session from connect to disconnect.

pub mod channel;
pub mod socket;

pub use channel::{FieldUpdate, TeamChannels};
pub use socket::handle_socket_upgrade;
