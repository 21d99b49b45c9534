use std::net::SocketAddr;
use thiserror::Error;

/// Error types for the echopair library
#[derive(Error, Debug)]
pub enum EchoError {
    /// Failed to bind a server socket (address already in use, permission
    /// denied, etc.). Always fatal: servers do not retry a failed bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// TCP-related errors (connect, read, write)
    #[error("TCP error: {0}")]
    Tcp(#[from] std::io::Error),

    /// UDP-related errors (send, receive)
    #[error("UDP error: {0}")]
    Udp(std::io::Error),

    /// Received bytes are not valid UTF-8 text
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// A caller-configured timeout elapsed. Never produced unless a timeout
    /// was explicitly set; the default is to block indefinitely.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the echopair library
pub type Result<T> = std::result::Result<T, EchoError>;

pub mod common;
pub mod tcp;
pub mod udp;

// Re-export main types for convenience
pub use common::{EchoClient, EchoServer};
pub use tcp::{TcpConfig, TcpEchoClient, TcpEchoServer};
pub use udp::{SHUTDOWN_SENTINEL, UdpConfig, UdpEchoClient, UdpEchoServer};
