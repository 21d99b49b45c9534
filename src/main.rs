use color_eyre::eyre::{Result, WrapErr};
use echopair::common::{EchoClient, EchoServer};
use echopair::tcp::{TcpConfig, TcpEchoClient, TcpEchoServer};
use echopair::udp::{SHUTDOWN_SENTINEL, UdpConfig, UdpEchoClient, UdpEchoServer};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, BufReader};

use tracing::info;

/// The fixed payload the one-shot TCP client sends.
const TCP_CLIENT_PAYLOAD: &str = "message sent to the server";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("echopair=info")
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let role = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "tcp-server".to_string());

    // Optional port override; defaults come from the configs
    // (65432 for TCP, 65433 for UDP).
    let port = args.get(2).and_then(|p| p.parse::<u16>().ok());

    match role.as_str() {
        "tcp-server" => {
            let mut config = TcpConfig::default();
            if let Some(port) = port {
                config.bind_addr.set_port(port);
            }

            info!(address = %config.bind_addr, "starting TCP echo server");

            let server = TcpEchoServer::new(config);
            server.run().await.wrap_err("failed to run TCP echo server")?;
        }
        "tcp-client" => {
            let mut addr: SocketAddr = TcpConfig::default().bind_addr;
            if let Some(port) = port {
                addr.set_port(port);
            }

            let mut client = TcpEchoClient::connect(addr)
                .await
                .wrap_err_with(|| format!("failed to connect to {addr}"))?;

            println!("sending: {TCP_CLIENT_PAYLOAD}");
            let reply = client
                .echo_string(TCP_CLIENT_PAYLOAD)
                .await
                .wrap_err("echo exchange failed")?;
            println!("server replied: {reply}");
            // Client drops here, closing the connection deterministically.
        }
        "udp-server" => {
            let mut config = UdpConfig::default();
            if let Some(port) = port {
                config.bind_addr.set_port(port);
            }

            info!(address = %config.bind_addr, "starting UDP echo server");

            let server = UdpEchoServer::new(config);
            server.run().await.wrap_err("failed to run UDP echo server")?;
        }
        "udp-client" => {
            let mut addr: SocketAddr = UdpConfig::default().bind_addr;
            if let Some(port) = port {
                addr.set_port(port);
            }

            let client = UdpEchoClient::connect(addr)
                .await
                .wrap_err("failed to create UDP client socket")?;

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                println!("enter a message (or '{SHUTDOWN_SENTINEL}' to quit):");
                let Some(line) = lines.next_line().await? else {
                    break;
                };

                client.send(line.as_bytes()).await?;

                if line.eq_ignore_ascii_case(SHUTDOWN_SENTINEL) {
                    // The server does not reply to the sentinel, so the
                    // client stops without waiting for one.
                    println!("sent shutdown sentinel, closing client");
                    break;
                }

                let reply = client.recv().await?;
                println!("server replied: {}", String::from_utf8_lossy(&reply));
            }
        }
        _ => {
            eprintln!(
                "Usage: {} [tcp-server|tcp-client|udp-server|udp-client] [port]",
                args[0]
            );
            eprintln!("  tcp-server|tcp-client|udp-server|udp-client: Endpoint to run (default: tcp-server)");
            eprintln!("  port: Port to bind or connect to (default: 65432 for TCP, 65433 for UDP)");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} tcp-server            # Serve one TCP connection on port 65432", args[0]);
            eprintln!("  {} tcp-client            # Send one payload and print the echo", args[0]);
            eprintln!("  {} udp-server 9090       # Echo datagrams on port 9090 until 'exit'", args[0]);
            eprintln!("  {} udp-client            # Interactive datagram session", args[0]);
            std::process::exit(1);
        }
    }

    Ok(())
}
