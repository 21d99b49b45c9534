use crate::common::{EchoClient, maybe_timeout};
use crate::{EchoError, Result};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// Configuration for the UDP echo client
#[derive(Debug, Clone)]
pub struct UdpClientConfig {
    /// Receive timeout; `None` blocks indefinitely. With the default of
    /// `None`, an unreachable or silent server blocks the caller forever,
    /// matching the original client's behavior.
    pub read_timeout: Option<Duration>,
    /// Buffer size for receiving the reply datagram
    pub buffer_size: usize,
}

impl Default for UdpClientConfig {
    fn default() -> Self {
        Self {
            read_timeout: None,
            buffer_size: 1024,
        }
    }
}

/// UDP echo client
///
/// Binds an ephemeral local socket and exchanges datagrams with a fixed
/// server address. [`send`](UdpEchoClient::send) is fire-and-forget, used
/// for the shutdown sentinel where no reply will come;
/// [`echo`](EchoClient::echo) sends and then waits for the reply datagram.
///
/// # Examples
///
/// ```no_run
/// use echopair::udp::UdpEchoClient;
/// use echopair::common::EchoClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let addr = "127.0.0.1:65433".parse()?;
///     let mut client = UdpEchoClient::connect(addr).await?;
///
///     let response = client.echo_string("hello").await?;
///     println!("server echoed: {response}");
///
///     // Stop the server; no reply is expected for the sentinel.
///     client.send(echopair::SHUTDOWN_SENTINEL.as_bytes()).await?;
///     Ok(())
/// }
/// ```
pub struct UdpEchoClient {
    socket: UdpSocket,
    server_addr: SocketAddr,
    config: UdpClientConfig,
}

impl UdpEchoClient {
    /// Binds a client socket targeting the given server address, with
    /// custom configuration
    pub async fn connect_with_config(
        server_addr: SocketAddr,
        config: UdpClientConfig,
    ) -> Result<Self> {
        // Bind to any available port
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .map_err(EchoError::Udp)?;

        Ok(Self {
            socket,
            server_addr,
            config,
        })
    }

    /// Binds with default configuration (no receive timeout)
    pub async fn connect(server_addr: SocketAddr) -> Result<Self> {
        Self::connect_with_config(server_addr, UdpClientConfig::default()).await
    }

    /// Sends a datagram to the server without waiting for a reply.
    ///
    /// This is the sentinel path: the server never replies to the shutdown
    /// sentinel, so waiting would block forever.
    pub async fn send(&self, data: &[u8]) -> Result<()> {
        self.socket
            .send_to(data, self.server_addr)
            .await
            .map_err(EchoError::Udp)?;
        Ok(())
    }

    /// Waits for a single reply datagram.
    pub async fn recv(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0; self.config.buffer_size];
        let (n, _) = maybe_timeout(
            self.config.read_timeout,
            "reply datagram",
            self.socket.recv_from(&mut buffer),
        )
        .await?
        .map_err(EchoError::Udp)?;

        Ok(buffer[..n].to_vec())
    }
}

#[async_trait]
impl EchoClient for UdpEchoClient {
    /// Sends one datagram and waits for the echoed reply
    async fn echo(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.send(data).await?;
        self.recv().await
    }
}
