use crate::common::EchoServer;
use crate::{EchoError, Result, TcpConfig, TcpEchoServer, UdpConfig, UdpEchoServer};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Spawns a TCP echo server on an ephemeral port for tests.
///
/// Probes a free port first, then starts the server on it; the server binds
/// inside `run()`, so the address has to be known up front. Returns the
/// server task handle and the address it is listening on.
pub async fn spawn_tcp_test_server() -> Result<(JoinHandle<Result<()>>, SocketAddr)> {
    let probe = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(EchoError::Tcp)?;
    let addr = probe.local_addr().map_err(EchoError::Tcp)?;
    drop(probe); // free the port so the server can bind it

    let config = TcpConfig {
        bind_addr: addr,
        ..TcpConfig::default()
    };
    let server = TcpEchoServer::new(config);

    let handle = tokio::spawn(async move { server.run().await });

    Ok((handle, addr))
}

/// Spawns a UDP echo server on an ephemeral port for tests.
///
/// Same port-probing scheme as [`spawn_tcp_test_server`]. The returned
/// server runs until it receives the shutdown sentinel.
pub async fn spawn_udp_test_server() -> Result<(JoinHandle<Result<()>>, SocketAddr)> {
    let probe = tokio::net::UdpSocket::bind("127.0.0.1:0")
        .await
        .map_err(EchoError::Udp)?;
    let addr = probe.local_addr().map_err(EchoError::Udp)?;
    drop(probe);

    let config = UdpConfig {
        bind_addr: addr,
        ..UdpConfig::default()
    };
    let server = UdpEchoServer::new(config);

    let handle = tokio::spawn(async move { server.run().await });

    Ok((handle, addr))
}
