use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::control::command::ControlCommand;
use crate::control::errors::ControlError;
use crate::coordinator::RefreshCoordinator;

/// Upper bound on the bytes read from one connection.
pub const MAX_COMMAND_BYTES: usize = 1024;

/// Sequential accept loop for the control socket.
pub struct CommandListener {
    listener: TcpListener,
    read_timeout: Duration,
}

impl CommandListener {
    pub async fn bind(addr: SocketAddr, read_timeout: Duration) -> Result<Self, ControlError> {
        let listener =
            TcpListener::bind(addr)
                .await
                .map_err(|source| ControlError::BindFailed {
                    addr: addr.to_string(),
                    source,
                })?;

        info!(
            event = "core.listener.bound",
            addr = %listener.local_addr().unwrap_or(addr)
        );

        Ok(Self {
            listener,
            read_timeout,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve connections one at a time until `exit`, shutdown, or a socket error.
    ///
    /// The socket is closed when this returns.
    pub async fn run(self, coordinator: Arc<RefreshCoordinator>) {
        let shutdown = coordinator.shutdown_token().clone();

        loop {
            let accepted = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(event = "core.listener.shutdown");
                    break;
                }
                accepted = self.listener.accept() => accepted,
            };

            let (mut stream, peer) = match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(event = "core.listener.accept_failed", error = %e);
                    break;
                }
            };

            let read = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(event = "core.listener.read_abandoned", peer = %peer);
                    break;
                }
                read = read_command(&mut stream, self.read_timeout) => read,
            };

            let raw = match read {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        event = "core.listener.read_failed",
                        peer = %peer,
                        error = %e
                    );
                    continue;
                }
            };
            drop(stream);

            match ControlCommand::parse(&String::from_utf8_lossy(&raw)) {
                None => {
                    debug!(event = "core.listener.empty_command", peer = %peer);
                }
                Some(ControlCommand::Exit) => {
                    info!(event = "core.listener.exit_received", peer = %peer);
                    coordinator.shutdown();
                    break;
                }
                Some(ControlCommand::SetTarget(target)) => {
                    info!(
                        event = "core.listener.command_received",
                        peer = %peer,
                        target = %target
                    );
                    tokio::select! {
                        _ = coordinator.set_target(target) => {}
                        _ = shutdown.cancelled() => break,
                    }
                }
            }
        }

        info!(event = "core.listener.stopped");
    }
}

/// Read one command: up to the first newline, end of stream, or
/// [`MAX_COMMAND_BYTES`]. Whatever arrived before `timeout` is kept.
async fn read_command<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(MAX_COMMAND_BYTES);

    let result = tokio::time::timeout(timeout, read_line_bounded(reader, &mut buf)).await;
    match result {
        Ok(Ok(())) => Ok(buf),
        Ok(Err(e)) => Err(e),
        Err(_) => {
            debug!(
                event = "core.listener.read_timed_out",
                bytes = buf.len()
            );
            Ok(buf)
        }
    }
}

async fn read_line_bounded<R: AsyncRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> std::io::Result<()> {
    let mut chunk = [0u8; 256];

    while buf.len() < MAX_COMMAND_BYTES {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        let take = n.min(MAX_COMMAND_BYTES - buf.len());
        buf.extend_from_slice(&chunk[..take]);
        if chunk[..take].contains(&b'\n') {
            break;
        }
    }

    Ok(())
}
