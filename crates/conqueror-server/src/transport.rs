//! TCP transport: one task per connection, one JSON line per message.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use conqueror_core::TileCoord;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::protocol::{decode_request, encode_response, ClientRequest, ServerResponse};
use crate::session::{InputEvent, Session};

/// Longest request line accepted, newline excluded.
pub const MAX_LINE_BYTES: usize = 4096;

/// Transport error types
#[derive(Debug, Error)]
pub enum TransportError {
    /// The listener could not bind.
    #[error("failed to bind {0}: {1}")]
    BindFailed(SocketAddr, #[source] io::Error),
    /// The bound address could not be read back.
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] io::Error),
}

/// Accepts connections and serves requests against a [`Session`].
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    session: Session,
}

impl Server {
    /// Binds `addr`. Port 0 picks a free port; see [`Server::local_addr`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the socket cannot be bound.
    pub async fn bind(addr: SocketAddr, session: Session) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::BindFailed(addr, e))?;
        let local_addr = listener.local_addr().map_err(TransportError::LocalAddr)?;
        info!(%local_addr, "listening");
        Ok(Self {
            listener,
            local_addr,
            session,
        })
    }

    /// Address the server is listening on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until `shutdown` completes.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let session = self.session.clone();
                        tokio::spawn(async move {
                            info!(%peer, "client connected");
                            match serve_connection(stream, &session).await {
                                Ok(()) => info!(%peer, "client disconnected"),
                                Err(err) => warn!(%peer, %err, "connection dropped"),
                            }
                        });
                    }
                    Err(err) => error!(%err, "accept failed"),
                },
                () = &mut shutdown => break,
            }
        }
        info!("server stopped");
    }
}

/// Reads request lines from `stream` and writes one response line for each
/// until the peer closes.
///
/// Lines longer than [`MAX_LINE_BYTES`] are skipped and answered with an
/// error response.
///
/// # Errors
///
/// Returns the underlying I/O error if the socket fails.
pub async fn serve_connection(stream: TcpStream, session: &Session) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let limit = MAX_LINE_BYTES as u64 + 1;
        let read = (&mut reader).take(limit).read_line(&mut line).await?;
        if read == 0 {
            break;
        }
        let response = if read > MAX_LINE_BYTES && !line.ends_with('\n') {
            discard_line(&mut reader).await?;
            warn!(limit = MAX_LINE_BYTES, "oversized request skipped");
            ServerResponse::Error {
                message: format!("request line exceeds {MAX_LINE_BYTES} bytes"),
            }
        } else {
            let request = line.trim_end_matches(['\r', '\n']);
            if request.trim().is_empty() {
                continue;
            }
            match decode_request(request) {
                Ok(request) => handle_request(session, request).await,
                Err(err) => {
                    debug!(%err, "rejecting request");
                    ServerResponse::Error {
                        message: err.to_string(),
                    }
                }
            }
        };
        let payload = encode_response(&response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writer.write_all(payload.as_bytes()).await?;
    }
    Ok(())
}

/// Consumes input up to and including the next newline.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = buf.len();
        reader.consume(len);
    }
}

/// Answers one request.
pub async fn handle_request(session: &Session, request: ClientRequest) -> ServerResponse {
    let submitted = match request {
        ClientRequest::Event {
            mouse_pos: [x, y],
        } => session.submit(InputEvent::Click { x, y }),
        ClientRequest::Select { x, y } => {
            session.submit(InputEvent::Select(TileCoord::new(x, y)))
        }
        ClientRequest::Board => return ServerResponse::Board(session.board().await),
        ClientRequest::Queue => {
            return ServerResponse::Queue {
                tiles: session.queue().await,
            }
        }
        ClientRequest::Data => return ServerResponse::Data(session.status().await),
        ClientRequest::Snapshot => return ServerResponse::Snapshot(session.snapshot().await),
    };

    match submitted {
        Ok(()) => ServerResponse::Accepted,
        Err(err) => ServerResponse::Error {
            message: err.to_string(),
        },
    }
}
