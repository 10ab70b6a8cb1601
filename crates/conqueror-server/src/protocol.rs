//! Wire protocol: newline-delimited JSON.
//!
//! Every request and response is one JSON object on one line, tagged by a
//! `"type"` field. The request set mirrors what a thin display client needs:
//! push a click, then poll the board, the pending selection and the status.
//!
//! ```text
//! -> {"type":"event","mouse_pos":[75,10]}
//! <- {"type":"accepted"}
//! -> {"type":"data"}
//! <- {"type":"data","message":"...","turn":"Player2","has_attacked":{"Player1":true,"Player2":false}}
//! ```

use conqueror_core::{BoardSnapshot, GameSnapshot, StatusSnapshot, TileCoord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-to-server messages
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    /// A click at a pixel position.
    Event {
        /// `[x, y]` in pixels from the top-left corner.
        mouse_pos: [i64; 2],
    },
    /// A direct tile selection.
    Select {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
    },
    /// Request the board.
    Board,
    /// Request the pending selection.
    Queue,
    /// Request message, turn and first-attack flags.
    Data,
    /// Request everything at once.
    Snapshot,
}

/// Server-to-client messages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerResponse {
    /// Input was queued for the next tick.
    Accepted,
    /// Current board.
    Board(BoardSnapshot),
    /// Pending selection in selection order.
    Queue {
        /// Selected tiles.
        tiles: Vec<TileCoord>,
    },
    /// Message, turn and first-attack flags.
    Data(StatusSnapshot),
    /// Full match state.
    Snapshot(GameSnapshot),
    /// The request could not be handled.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Protocol error types
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The line was blank.
    #[error("empty message")]
    Empty,
    /// The line was not a valid message.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

fn decode<T: for<'de> Deserialize<'de>>(line: &str) -> Result<T, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

fn encode<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

/// Parses one request line.
///
/// # Errors
///
/// Returns [`ProtocolError`] for blank or malformed lines.
pub fn decode_request(line: &str) -> Result<ClientRequest, ProtocolError> {
    decode(line)
}

/// Serializes a request, newline included.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if serialization fails.
pub fn encode_request(request: &ClientRequest) -> Result<String, ProtocolError> {
    encode(request)
}

/// Parses one response line.
///
/// # Errors
///
/// Returns [`ProtocolError`] for blank or malformed lines.
pub fn decode_response(line: &str) -> Result<ServerResponse, ProtocolError> {
    decode(line)
}

/// Serializes a response, newline included.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] if serialization fails.
pub fn encode_response(response: &ServerResponse) -> Result<String, ProtocolError> {
    encode(response)
}
