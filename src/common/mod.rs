//! Common traits and helpers used across the echopair library
//!
//! This module contains the core traits that define the interface
//! for echo servers and clients, plus the optional-timeout helper
//! shared by both transports.

pub mod test_utils;
pub mod traits;

pub use test_utils::{spawn_tcp_test_server, spawn_udp_test_server};
pub use traits::{EchoClient, EchoServer};

use crate::{EchoError, Result};
use std::future::Future;
use std::time::Duration;

/// Awaits `fut`, bounded by `limit` when one is set.
///
/// A `None` limit blocks indefinitely, which is the default everywhere in
/// this crate: the original endpoints had no timeouts on any blocking call,
/// so timeouts are an explicit opt-in at the config boundary.
pub(crate) async fn maybe_timeout<F>(limit: Option<Duration>, what: &str, fut: F) -> Result<F::Output>
where
    F: Future,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| EchoError::Timeout(what.to_string())),
        None => Ok(fut.await),
    }
}
