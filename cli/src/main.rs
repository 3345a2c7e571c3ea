mod args;
mod output;
mod service;

use common::Error;
use connectors::{CoinGeckoConnector, ConnectorConfig, PriceConnector};
use service::Outcome;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const PROGRAM_NAME: &str = "crypto-conv";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or(PROGRAM_NAME);

    match service::run(&argv, connect).await {
        Ok(Outcome::Converted(line)) => emit(&format!("{}\n", line), ExitCode::SUCCESS),
        Ok(Outcome::Help) => emit(&output::help_text(program), ExitCode::SUCCESS),
        Err(e) if e.is_usage() => {
            eprintln!("{}: {}", program, e);
            emit(&output::help_text(program), ExitCode::from(exit_code(&e)))
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Print `text` on stdout and exit with `code`, or 1 if stdout is unusable.
fn emit(text: &str, code: ExitCode) -> ExitCode {
    match output::write_to(std::io::stdout().lock(), text) {
        Ok(()) => code,
        Err(e) => {
            error!("Failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn connect() -> Result<Arc<dyn PriceConnector>, Error> {
    let config = ConnectorConfig::from_env()?;
    debug!("Using price provider at {}", config.base_url);

    Ok(Arc::new(CoinGeckoConnector::new(config)?))
}

/// 2 for bad input, 1 for everything else.
fn exit_code(error: &Error) -> u8 {
    if error.is_usage() {
        2
    } else {
        1
    }
}

/// Logs go to stderr so stdout only ever carries the result or the usage text.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
