use crate::{EchoError, Result};
use async_trait::async_trait;

/// Common trait for echo servers
///
/// This trait defines the common interface that both echo servers
/// (TCP, UDP) implement.
#[async_trait]
pub trait EchoServer {
    /// Starts the echo server and runs it to completion.
    ///
    /// For TCP this means serving exactly one connection until the peer
    /// closes; for UDP it means echoing datagrams until the shutdown
    /// sentinel arrives.
    async fn run(&self) -> Result<()>;

    /// Returns a shutdown signal sender that can be used to stop the server
    /// while it is waiting for a connection or a datagram
    fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()>;
}

/// Common trait for echo clients
///
/// This trait defines the common interface that both echo clients
/// (TCP, UDP) implement.
#[async_trait]
pub trait EchoClient {
    /// Sends data to the echo server and returns the echoed response
    async fn echo(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Sends a string and returns the echoed string
    async fn echo_string(&mut self, data: &str) -> Result<String> {
        let response = self.echo(data.as_bytes()).await?;
        String::from_utf8(response).map_err(EchoError::Decode)
    }
}
