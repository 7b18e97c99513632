//! TCP accept loop.
//!
//! Each connection is served on its own task by hyper's HTTP/1 connection
//! builder, which enforces the read-header timeout. Handlers share nothing
//! mutable, so connections are fully independent. On shutdown the listener
//! closes and open connections are drained: in-flight requests finish, idle
//! keep-alive connections are closed.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::utils::shutdown_signal;

/// Pause after a failed accept, e.g. when out of file descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// How long shutdown waits for open connections before giving up on them.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn run(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServiceError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(
        service = %config.service_name,
        addr = %config.listen_addr,
        env = %config.environment,
        "{} starting on {} (env={})",
        config.service_name,
        config.listen_addr,
        config.environment
    );

    serve(
        listener,
        create_router(state),
        config.read_header_timeout(),
        shutdown_signal(),
    )
    .await
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain.
///
/// Returns once every accepted connection has closed or [`DRAIN_TIMEOUT`]
/// has passed.
#[instrument(skip_all, fields(addr = ?listener.local_addr().ok()))]
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    read_header_timeout: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .header_read_timeout(read_header_timeout);

    let graceful = GracefulShutdown::new();
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            },
            _ = &mut shutdown => {
                info!("stopped accepting connections");
                break;
            }
        };

        let io = TokioIo::new(stream);
        let service = TowerToHyperService::new(router.clone());
        let conn = graceful.watch(builder.serve_connection(io, service));

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(%peer, error = %e, "connection closed with error");
            }
        });
    }

    drop(listener);

    match tokio::time::timeout(DRAIN_TIMEOUT, graceful.shutdown()).await {
        Ok(()) => info!("all connections drained"),
        Err(_) => warn!(
            timeout_secs = DRAIN_TIMEOUT.as_secs(),
            "timed out draining connections"
        ),
    }

    Ok(())
}
