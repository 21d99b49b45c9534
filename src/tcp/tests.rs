#[cfg(test)]
mod tests {
    use crate::common::{EchoClient, EchoServer, spawn_tcp_test_server};
    use crate::tcp::{TcpClientConfig, TcpConfig, TcpEchoClient, TcpEchoServer};
    use crate::EchoError;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn config_defaults() {
        let config = TcpConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:65432".parse().unwrap());
        assert_eq!(config.backlog, 1);
        assert_eq!(config.buffer_size, 1024);
        // No timeouts by default: blocking calls wait indefinitely.
        assert!(config.read_timeout.is_none());
        assert!(config.write_timeout.is_none());
    }

    #[tokio::test]
    async fn server_new_has_no_subscribers() {
        let server = TcpEchoServer::new(TcpConfig::default());
        assert_eq!(server.shutdown_signal().receiver_count(), 0);
    }

    #[tokio::test]
    async fn bind_conflict_is_fatal() {
        // Occupy a port, then ask the server to bind it.
        let occupant = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupant.local_addr().unwrap();

        let server = TcpEchoServer::new(TcpConfig {
            bind_addr: addr,
            ..TcpConfig::default()
        });

        match server.run().await {
            Err(EchoError::Bind { .. }) => {}
            other => panic!("expected bind error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ping_round_trip_then_clean_close() {
        let (server_handle, addr) = spawn_tcp_test_server().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut client = TcpEchoClient::connect(addr).await.unwrap();
        let reply = client.echo_string("ping").await.unwrap();
        assert_eq!(reply, "ping");

        // Closing the connection ends the server's single session.
        drop(client);
        server_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn binary_payload_is_preserved() {
        let (server_handle, addr) = spawn_tcp_test_server().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let data = vec![0x00, 0x01, 0x7f, 0x80, 0xff];
        let mut client = TcpEchoClient::connect(addr).await.unwrap();
        let reply = client.echo(&data).await.unwrap();
        assert_eq!(reply, data);

        drop(client);
        server_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn multiple_exchanges_on_one_connection() {
        let (server_handle, addr) = spawn_tcp_test_server().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut client = TcpEchoClient::connect(addr).await.unwrap();
        for msg in ["first", "second", "third"] {
            assert_eq!(client.echo_string(msg).await.unwrap(), msg);
        }

        drop(client);
        server_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn second_client_is_never_serviced() {
        let (server_handle, addr) = spawn_tcp_test_server().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let mut first = TcpEchoClient::connect(addr).await.unwrap();
        assert_eq!(first.echo_string("one").await.unwrap(), "one");

        // A second connection may sit in the backlog or be refused, but it
        // never gets an echo while the first connection is open.
        let config = TcpClientConfig {
            connect_timeout: Some(Duration::from_secs(1)),
            read_timeout: Some(Duration::from_millis(200)),
            ..TcpClientConfig::default()
        };
        if let Ok(mut second) = TcpEchoClient::connect_with_config(addr, config).await {
            assert!(matches!(
                second.echo(b"two").await,
                Err(EchoError::Timeout(_))
            ));
        }

        drop(first);
        server_handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn shutdown_signal_stops_idle_server() {
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = probe.local_addr().unwrap();
        drop(probe);

        let server = TcpEchoServer::new(TcpConfig {
            bind_addr: addr,
            ..TcpConfig::default()
        });
        let shutdown = server.shutdown_signal();
        let handle = tokio::spawn(async move { server.run().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
