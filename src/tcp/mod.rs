pub mod client;
pub mod config;
pub mod server;
pub mod tests;

pub use client::{TcpClientConfig, TcpEchoClient};
pub use config::TcpConfig;
pub use server::TcpEchoServer;
