use crate::common::{EchoClient, maybe_timeout};
use crate::{EchoError, Result};
use async_trait::async_trait;
use bytes::BytesMut;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Configuration for the TCP echo client
///
/// All timeouts default to `None`, meaning every blocking call waits
/// indefinitely. Callers that cannot afford to hang on an unresponsive
/// peer opt in explicitly.
#[derive(Debug, Clone)]
pub struct TcpClientConfig {
    /// Connection timeout; `None` blocks indefinitely
    pub connect_timeout: Option<Duration>,
    /// Read timeout; `None` blocks indefinitely
    pub read_timeout: Option<Duration>,
    /// Write timeout; `None` blocks indefinitely
    pub write_timeout: Option<Duration>,
    /// Buffer size for reading data
    pub buffer_size: usize,
}

impl Default for TcpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            buffer_size: 1024,
        }
    }
}

/// TCP echo client for a single request/response exchange
///
/// The connection is owned by the client value and closed deterministically
/// when it is dropped, on success and error paths alike.
///
/// # Examples
///
/// ```no_run
/// use echopair::tcp::TcpEchoClient;
/// use echopair::common::EchoClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let addr = "127.0.0.1:65432".parse()?;
///     let mut client = TcpEchoClient::connect(addr).await?;
///     let response = client.echo_string("ping").await?;
///     println!("server echoed: {response}");
///     Ok(())
/// }
/// ```
pub struct TcpEchoClient {
    stream: TcpStream,
    config: TcpClientConfig,
}

impl TcpEchoClient {
    /// Connects to an echo server with custom configuration.
    ///
    /// No retry on failure: a refused or timed-out connection is returned
    /// as an error immediately.
    pub async fn connect_with_config(addr: SocketAddr, config: TcpClientConfig) -> Result<Self> {
        let stream = maybe_timeout(config.connect_timeout, "connect", TcpStream::connect(addr))
            .await?
            .map_err(EchoError::Tcp)?;

        Ok(Self { stream, config })
    }

    /// Connects with default configuration (no timeouts)
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        Self::connect_with_config(addr, TcpClientConfig::default()).await
    }
}

#[async_trait]
impl EchoClient for TcpEchoClient {
    /// Sends data and reads the echoed reply.
    ///
    /// A single TCP read may return a partial echo, so the client keeps
    /// reading until it has accumulated at least as many bytes as it sent
    /// or the server closes the connection. No framing is added beyond
    /// that: coalescing of separate writes is accepted behavior.
    async fn echo(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        maybe_timeout(
            self.config.write_timeout,
            "write",
            self.stream.write_all(data),
        )
        .await??;
        self.stream.flush().await?;

        let mut response = BytesMut::with_capacity(self.config.buffer_size);
        let mut buffer = vec![0u8; self.config.buffer_size];

        while response.len() < data.len() {
            let n = maybe_timeout(
                self.config.read_timeout,
                "read",
                self.stream.read(&mut buffer),
            )
            .await??;

            if n == 0 {
                // Server closed the connection; return whatever arrived.
                break;
            }
            response.extend_from_slice(&buffer[..n]);
        }

        Ok(response.to_vec())
    }
}
