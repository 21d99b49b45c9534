pub mod client;
pub mod config;
pub mod server;

pub use client::{UdpClientConfig, UdpEchoClient};
pub use config::UdpConfig;
pub use server::UdpEchoServer;

/// Reserved payload that tells the UDP server to stop instead of echoing.
///
/// Matched case-insensitively against the whole datagram ("exit", "EXIT",
/// "ExIt" are all sentinels; "exit " is not). The server sends no reply for
/// it, and the client side stops without waiting for one. TCP has no
/// equivalent sentinel; the asymmetry is intentional.
pub const SHUTDOWN_SENTINEL: &str = "exit";
