use super::config::TcpConfig;
use crate::common::{EchoServer, maybe_timeout};
use crate::{EchoError, Result};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::signal;
use tracing::{info, warn};

/// TCP echo server that serves exactly one connection
///
/// The server binds with a listen backlog of 1, accepts a single client,
/// and echoes every received buffer back unmodified until the peer closes
/// the connection (signalled by a zero-length read). Once that connection
/// ends, [`run`](EchoServer::run) returns; a second client is never
/// serviced within the same run. This mirrors the single-session lifecycle
/// of the original endpoints rather than a general-purpose server.
///
/// # Examples
///
/// Basic server setup and running:
///
/// ```no_run
/// use echopair::tcp::{TcpConfig, TcpEchoServer};
/// use echopair::common::EchoServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = TcpEchoServer::new(TcpConfig::default());
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct TcpEchoServer {
    config: TcpConfig,
    shutdown_signal: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl TcpEchoServer {
    /// Creates a new TCP echo server with the given configuration
    pub fn new(config: TcpConfig) -> Self {
        let (shutdown_signal, _) = tokio::sync::broadcast::channel(1);
        Self {
            config,
            shutdown_signal: Arc::new(shutdown_signal),
        }
    }

    /// Binds the listening socket with the configured backlog.
    ///
    /// Bind failures (typically "address already in use") are fatal; the
    /// server does not retry.
    fn listen(&self) -> Result<TcpListener> {
        let addr = self.config.bind_addr;
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(EchoError::Tcp)?;

        socket
            .bind(addr)
            .map_err(|source| EchoError::Bind { addr, source })?;
        socket
            .listen(self.config.backlog)
            .map_err(|source| EchoError::Bind { addr, source })
    }

    /// Echoes on an established connection until the peer closes it.
    ///
    /// The stream is owned by this function and dropped on every exit path,
    /// so the connection is released exactly once.
    async fn handle_connection(
        mut stream: TcpStream,
        addr: SocketAddr,
        config: TcpConfig,
    ) -> Result<()> {
        let mut buffer = vec![0; config.buffer_size];

        loop {
            let n = match maybe_timeout(config.read_timeout, "read", stream.read(&mut buffer)).await
            {
                Ok(read) => read?,
                Err(_) => {
                    warn!(%addr, "read timeout");
                    break;
                }
            };

            if n == 0 {
                // Zero-length read: the peer closed the connection. Normal
                // termination, not an error.
                info!(%addr, "client closed connection");
                break;
            }

            let preview = String::from_utf8_lossy(&buffer[..n]);
            info!(%addr, size = n, preview = %preview, "received data");

            match maybe_timeout(config.write_timeout, "write", stream.write_all(&buffer[..n]))
                .await
            {
                Ok(written) => {
                    written?;
                    stream.flush().await?;
                    info!(%addr, size = n, "echoed data");
                }
                Err(_) => {
                    warn!(%addr, "write timeout");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EchoServer for TcpEchoServer {
    /// Binds, accepts one connection, and echoes until the peer closes.
    async fn run(&self) -> Result<()> {
        let listener = self.listen()?;

        info!(address = %self.config.bind_addr, backlog = self.config.backlog, "TCP echo server listening");

        let mut shutdown_rx = self.shutdown_signal.subscribe();

        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, addr) = accept_result.map_err(EchoError::Tcp)?;
                info!(%addr, "accepted connection");
                Self::handle_connection(stream, addr, self.config.clone()).await?;
                info!(%addr, "connection closed");
            }
            _ = signal::ctrl_c() => {
                info!("received shutdown signal, stopping server");
            }
            _ = shutdown_rx.recv() => {
                info!("received internal shutdown signal, stopping server");
            }
        }

        info!("TCP echo server stopped");
        Ok(())
    }

    /// Returns a shutdown signal sender that stops the server while it is
    /// still waiting to accept
    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }
}
