//! Listener binding and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use reelstore_core::Config;
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::time::Instant;

/// What stopped the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => write!(f, "SIGINT"),
            ShutdownReason::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Bind `0.0.0.0:{PORT}` and serve until SIGINT or SIGTERM.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    // Installed before accepting so an early SIGTERM is not lost.
    let shutdown = shutdown_signal()?;

    tracing::info!(
        addr = %listener.local_addr()?,
        max_upload_mb = config.max_upload_size_bytes / 1024 / 1024,
        storage_backend = %config.storage_backend(),
        database = %config.database.database,
        collection = %config.database.collection,
        ffprobe_path = %config.ffprobe_path,
        "Server ready and accepting connections"
    );

    serve_until(listener, app, shutdown).await?;
    Ok(())
}

/// Serve `app` until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<ShutdownReason>
where
    F: Future<Output = ShutdownReason> + Send + 'static,
{
    let (stopped_tx, stopped_rx) = tokio::sync::oneshot::channel();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let reason = shutdown.await;
            tracing::info!(signal = %reason, "Shutdown requested, draining connections");
            let _ = stopped_tx.send((reason, Instant::now()));
        })
        .await
        .context("Server error")?;

    let (reason, requested_at) = stopped_rx
        .await
        .context("Server stopped without a shutdown request")?;
    tracing::info!(
        signal = %reason,
        drain_ms = requested_at.elapsed().as_millis() as u64,
        "Server stopped"
    );
    Ok(reason)
}

#[cfg(unix)]
fn shutdown_signal() -> Result<impl Future<Output = ShutdownReason>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    Ok(async move {
        tokio::select! {
            _ = interrupt() => ShutdownReason::Interrupt,
            _ = terminate.recv() => ShutdownReason::Terminate,
        }
    })
}

#[cfg(not(unix))]
fn shutdown_signal() -> Result<impl Future<Output = ShutdownReason>> {
    Ok(async {
        interrupt().await;
        ShutdownReason::Interrupt
    })
}

/// Resolves on Ctrl+C. If the handler cannot be registered, only SIGTERM stops the server.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_requests_then_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/ping", get(|| async { "pong" }));

        let (trigger_tx, trigger_rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve_until(listener, app, async move {
            let _ = trigger_rx.await;
            ShutdownReason::Terminate
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("pong"));

        trigger_tx.send(()).unwrap();
        let reason = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
        assert_eq!(reason, ShutdownReason::Terminate);
    }

    #[test]
    fn test_shutdown_reason_names_signal() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownReason::Terminate.to_string(), "SIGTERM");
    }
}
