//! Shared mock backends for integration tests.
//!
//! Minimal raw-TCP servers: read the request head, answer with a fixed or
//! programmable status. Bound to ephemeral ports so tests never collide.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a backend that answers every request with `status` after `delay`.
pub async fn spawn_backend(status: u16, delay: Duration) -> SocketAddr {
    spawn_programmable(move || async move { (status, delay) }).await
}

/// Start a backend whose status and response delay are decided per request.
pub async fn spawn_programmable<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, Duration)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let f = f.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;

                let (status, delay) = f().await;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    500 => "Internal Server Error",
                    503 => "Service Unavailable",
                    _ => "OK",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                    status, reason
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// An address nothing listens on (the listener is bound, then dropped), so
/// connections are refused immediately.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
