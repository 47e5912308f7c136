use anyhow::Result;
use tracing::error;
use daytally::{cli::run_cli, utils::runtime::single_thread_runtime};

fn main() -> Result<()> {
    let runtime = single_thread_runtime()?;
    let result = runtime.block_on(run_cli()).inspect_err(|e| {
        error!("Error running cli {e:?}");
    });
    // A pending read of stdin would otherwise keep the runtime alive after an interrupt.
    runtime.shutdown_background();
    result
}
