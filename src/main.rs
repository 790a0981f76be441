use std::sync::Arc;

use color_eyre::Result;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use gastrolog::app::App;
use gastrolog::cli::{self, parse_args, run_cli_command, CliCommand};
use gastrolog::startup::{build_gateway, AppConfig, StartupParams};

/// Environment variable holding the log filter.
const ENV_LOG: &str = "GASTROLOG_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if let Some(text) = run_cli_command(&command) {
        println!("{}", text);
        return Ok(());
    }
    let CliCommand::Run { startup_url } = command else {
        return Ok(());
    };

    color_eyre::install()?;
    init_logging();

    let config = AppConfig::from_env();
    tracing::info!(
        "GastroLog {} against {}",
        cli::VERSION,
        config.api_base_url
    );
    let params = startup_url
        .as_deref()
        .map(StartupParams::from_url)
        .unwrap_or_default();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let gateway = build_gateway(&config)?;
        let mut app = App::new(Arc::new(gateway), &config).with_startup(params);

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        cli::run(&mut app, stdin, &mut stdout).await?;
        tracing::info!("Bye");
        Ok::<(), color_eyre::Report>(())
    })
}
