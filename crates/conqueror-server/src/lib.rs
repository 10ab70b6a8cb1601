//! # Conqueror Server
//!
//! Authoritative server for Conqueror matches. One process owns one
//! [`Game`](conqueror_core::Game); thin display clients connect over TCP,
//! push clicks and poll the board, the pending selection and the status line.
//!
//! ## Architecture
//!
//! - **Config**: [`ServerConfig`] with defaults, JSON file loading and
//!   validation
//! - **Session**: the shared game handle plus the [`TickLoop`] that applies
//!   queued input every tick and holds full selections for the reveal delay
//! - **Protocol**: newline-delimited JSON messages
//! - **Transport**: tokio TCP listener, one task per connection
//! - **App**: wires the pieces together for the binary and tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod protocol;
pub mod session;
pub mod transport;

pub use app::{App, StartError};
pub use config::{ConfigError, ServerConfig};
pub use protocol::{
    decode_request, decode_response, encode_request, encode_response, ClientRequest,
    ProtocolError, ServerResponse,
};
pub use session::{InputEvent, Session, SessionError, SharedGame, TickLoop, INPUT_CAPACITY};
pub use transport::{handle_request, serve_connection, Server, TransportError, MAX_LINE_BYTES};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "conqueror_server=info,conqueror_core=info";
