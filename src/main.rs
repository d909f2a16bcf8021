use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vultr_deploy::{DeployError, Pipeline, console};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Nothing left to report to if stderr itself fails.
            let _ = err.downcast_ref::<DeployError>().map_or_else(
                || console::report_failure(&mut std::io::stderr(), &format!("{err:#}")),
                |deploy_err| {
                    console::report_error(
                        &mut std::io::stdout(),
                        &mut std::io::stderr(),
                        deploy_err,
                    )
                },
            );
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(Pipeline::default().run())?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
