use anyhow::Result;


/// The whole application runs on one thread. Blocking terminal work is done directly on it.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
