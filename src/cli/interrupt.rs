use tracing::warn;

/// Resolves once the user presses Ctrl-C. If signals can't be listened for this never resolves, so
/// the session simply runs to completion.
pub async fn detect_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Can't listen for interrupts {e}");
        std::future::pending::<()>().await;
    }
}
