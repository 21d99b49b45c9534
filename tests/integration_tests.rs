use color_eyre::eyre::Result;
use echopair::common::{EchoClient, spawn_tcp_test_server, spawn_udp_test_server};
use echopair::tcp::TcpEchoClient;
use echopair::udp::{UdpClientConfig, UdpEchoClient};
use echopair::{EchoError, SHUTDOWN_SENTINEL};
use std::time::Duration;

/// Scenario: start a TCP server, connect, send "ping", get "ping" back,
/// and observe the connection (and the server) close cleanly afterward.
#[tokio::test]
async fn tcp_ping_round_trip_closes_cleanly() -> Result<()> {
    let (server_handle, addr) = spawn_tcp_test_server().await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut client = TcpEchoClient::connect(addr).await?;
    let reply = client.echo_string("ping").await?;
    assert_eq!(reply, "ping");

    // The server serves exactly one connection; once the client closes,
    // its run() returns.
    drop(client);
    server_handle.await??;

    Ok(())
}

/// Scenario: UDP client sends "hello" and gets it echoed, then sends "EXIT";
/// the server terminates and no further datagrams are exchanged.
#[tokio::test]
async fn udp_hello_then_exit_stops_the_server() -> Result<()> {
    let (server_handle, addr) = spawn_udp_test_server().await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let config = UdpClientConfig {
        read_timeout: Some(Duration::from_millis(200)),
        ..UdpClientConfig::default()
    };
    let mut client = UdpEchoClient::connect_with_config(addr, config).await?;

    assert_eq!(client.echo_string("hello").await?, "hello");

    client.send(b"EXIT").await?;
    server_handle.await??;

    // No reply was sent for the sentinel.
    assert!(matches!(client.recv().await, Err(EchoError::Timeout(_))));

    // Datagrams sent after shutdown go nowhere.
    client.send(b"anyone there?").await?;
    assert!(matches!(client.recv().await, Err(EchoError::Timeout(_))));

    Ok(())
}

/// The UDP server keeps no per-sender state: replies go to whichever
/// address sent the datagram, and distinct senders can interleave.
#[tokio::test]
async fn udp_server_interleaves_distinct_senders() -> Result<()> {
    let (server_handle, addr) = spawn_udp_test_server().await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut first = UdpEchoClient::connect(addr).await?;
    let mut second = UdpEchoClient::connect(addr).await?;

    assert_eq!(first.echo_string("one").await?, "one");
    assert_eq!(second.echo_string("two").await?, "two");
    assert_eq!(first.echo_string("three").await?, "three");

    second.send(SHUTDOWN_SENTINEL.as_bytes()).await?;
    server_handle.await??;

    Ok(())
}

/// A full-buffer TCP payload (exactly 1024 bytes) survives the round trip.
#[tokio::test]
async fn tcp_full_buffer_payload_round_trip() -> Result<()> {
    let (server_handle, addr) = spawn_tcp_test_server().await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let data = vec![0xabu8; 1024];
    let mut client = TcpEchoClient::connect(addr).await?;
    let reply = client.echo(&data).await?;
    assert_eq!(reply, data);

    drop(client);
    server_handle.await??;

    Ok(())
}
