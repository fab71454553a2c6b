//! Signal handling and bounded draining.

use std::time::Duration;

use tokio::sync::oneshot;

/// How the serve loop ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Drain {
    /// Every connection finished.
    Completed,
    /// The grace period elapsed with requests still in flight.
    DeadlineExceeded,
}

/// Resolve once SIGINT (ctrl-c) or SIGTERM arrives.
pub async fn signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}

/// Drive `server` to completion, giving it at most `grace` once `signalled`
/// fires.
///
/// # Errors
///
/// Returns the server's own I/O error.
pub async fn serve_until_drained<S>(
    server: S,
    signalled: oneshot::Receiver<()>,
    grace: Duration,
) -> std::io::Result<Drain>
where
    S: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result.map(|()| Drain::Completed),
        _ = signalled => match tokio::time::timeout(grace, &mut server).await {
            Ok(result) => result.map(|()| Drain::Completed),
            Err(_) => {
                tracing::warn!(?grace, "requests still in flight at the shutdown deadline");
                Ok(Drain::DeadlineExceeded)
            }
        },
    }
}
