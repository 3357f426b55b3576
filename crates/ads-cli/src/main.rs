use ads_app::init_tracing;
use ads_cli::{build_cli, execute, Invocation};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let invocation = match Invocation::from_matches(&matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let config = match invocation.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config.log) {
        eprintln!("warning: tracing already initialised: {e}");
    }
    tracing::debug!(source = %config.source, "starting");

    let mut stdout = std::io::stdout();
    match execute(&invocation, &config, &mut stdout).await {
        Ok(status) => status.into(),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
