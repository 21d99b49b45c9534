use super::SHUTDOWN_SENTINEL;
use super::config::UdpConfig;
use crate::common::{EchoServer, maybe_timeout};
use crate::{EchoError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::signal;
use tracing::{info, warn};

/// UDP echo server that echoes datagrams until the shutdown sentinel arrives
///
/// Every received datagram is echoed back to whichever address sent it; no
/// session state is kept between datagrams, so distinct senders can
/// interleave freely. A datagram that case-insensitively equals
/// [`SHUTDOWN_SENTINEL`] terminates the loop without a reply.
///
/// # Examples
///
/// Basic server setup and running:
///
/// ```no_run
/// use echopair::udp::{UdpConfig, UdpEchoServer};
/// use echopair::common::EchoServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = UdpEchoServer::new(UdpConfig::default());
///     server.run().await?;
///     Ok(())
/// }
/// ```
///
/// Server with graceful shutdown:
///
/// ```no_run
/// use echopair::udp::{UdpConfig, UdpEchoServer};
/// use echopair::common::EchoServer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = UdpEchoServer::new(UdpConfig::default());
///     let shutdown_signal = server.shutdown_signal();
///
///     let server_handle = tokio::spawn(async move { server.run().await });
///
///     // Do other work...
///
///     let _ = shutdown_signal.send(());
///     server_handle.await??;
///     Ok(())
/// }
/// ```
pub struct UdpEchoServer {
    config: UdpConfig,
    shutdown_signal: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl UdpEchoServer {
    /// Creates a new UDP echo server with the given configuration
    pub fn new(config: UdpConfig) -> Self {
        let (shutdown_signal, _) = tokio::sync::broadcast::channel(1);
        Self {
            config,
            shutdown_signal: Arc::new(shutdown_signal),
        }
    }
}

#[async_trait]
impl EchoServer for UdpEchoServer {
    /// Binds and echoes datagrams until the sentinel, a shutdown signal, or
    /// a transport error.
    async fn run(&self) -> Result<()> {
        let addr = self.config.bind_addr;
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| EchoError::Bind { addr, source })?;

        info!(address = %addr, "UDP echo server listening");

        let mut buffer = vec![0; self.config.buffer_size];
        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            tokio::select! {
                recv_result = maybe_timeout(self.config.read_timeout, "datagram", socket.recv_from(&mut buffer)) => {
                    let (n, peer) = match recv_result {
                        Ok(received) => received.map_err(EchoError::Udp)?,
                        Err(_) => {
                            warn!("receive timeout");
                            continue;
                        }
                    };

                    match std::str::from_utf8(&buffer[..n]) {
                        Ok(msg) if msg.eq_ignore_ascii_case(SHUTDOWN_SENTINEL) => {
                            // No reply for the sentinel.
                            info!(%peer, "shutdown sentinel received, stopping server");
                            break;
                        }
                        Ok(msg) => {
                            info!(%peer, size = n, message = %msg, "received datagram");
                        }
                        Err(e) => {
                            // Not valid text, so it cannot be the sentinel.
                            // Recoverable: echo the bytes and keep looping.
                            warn!(%peer, size = n, error = %e, "received non-text datagram");
                        }
                    }

                    maybe_timeout(self.config.write_timeout, "send", socket.send_to(&buffer[..n], peer))
                        .await?
                        .map_err(EchoError::Udp)?;
                    info!(%peer, size = n, "echoed datagram");
                }
                _ = signal::ctrl_c() => {
                    info!("received shutdown signal, stopping server");
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("received internal shutdown signal, stopping server");
                    break;
                }
            }
        }

        info!("UDP echo server stopped");
        Ok(())
    }

    /// Returns a shutdown signal sender that can be used to stop the server
    /// without sending the sentinel
    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }
}
