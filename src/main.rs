//! adbcast - Send Android broadcast intents from the terminal
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::process::ExitCode;

use adbcast::{run_command, Cli, Command};
use adbcast_app::config::{default_config_dir, init_settings, load_settings};
use adbcast_app::{AppController, ConsoleNotifier};
use adbcast_core::logging;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init()?;
    info!("adbcast {} starting", env!("CARGO_PKG_VERSION"));

    let config_dir = cli.config_dir.clone().unwrap_or_else(default_config_dir);

    if cli.command == Some(Command::InitConfig) {
        let path = init_settings(&config_dir, cli.adb_dir.clone())?;
        println!("{}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let settings = load_settings(&config_dir).with_adb_dir_override(cli.adb_dir.clone());

    match cli.command {
        None => {
            adbcast_tui::run(&settings, cli.message).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => {
            let mut controller =
                AppController::from_settings(&settings, ConsoleNotifier::new(cli.verbose));
            let mut stdout = std::io::stdout().lock();
            let status = run_command(&mut controller, command, &mut stdout, cli.json).await?;
            Ok(status.into())
        }
    }
}
