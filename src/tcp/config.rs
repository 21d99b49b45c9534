use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the TCP echo server
///
/// # Examples
///
/// ```
/// use echopair::tcp::TcpConfig;
///
/// let config = TcpConfig {
///     bind_addr: "127.0.0.1:65432".parse().unwrap(),
///     backlog: 1,
///     buffer_size: 1024,
///     read_timeout: None,
///     write_timeout: None,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TcpConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Listen backlog: how many pending connections the OS may queue.
    /// The server only ever accepts one, so anything beyond the first
    /// queued connection is refused by the kernel.
    pub backlog: u32,
    /// Buffer size for reading data
    pub buffer_size: usize,
    /// Read timeout; `None` blocks indefinitely
    pub read_timeout: Option<Duration>,
    /// Write timeout; `None` blocks indefinitely
    pub write_timeout: Option<Duration>,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:65432".parse().unwrap(),
            backlog: 1,
            buffer_size: 1024,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
