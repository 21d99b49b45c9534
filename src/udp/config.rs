use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the UDP echo server
///
/// # Examples
///
/// ```
/// use echopair::udp::UdpConfig;
///
/// let config = UdpConfig {
///     bind_addr: "127.0.0.1:65433".parse().unwrap(),
///     buffer_size: 1024,
///     read_timeout: None,
///     write_timeout: None,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct UdpConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Buffer size for receiving datagrams
    pub buffer_size: usize,
    /// Receive timeout; `None` blocks indefinitely
    pub read_timeout: Option<Duration>,
    /// Send timeout; `None` blocks indefinitely
    pub write_timeout: Option<Duration>,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:65433".parse().unwrap(),
            buffer_size: 1024,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
