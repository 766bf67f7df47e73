//! ClipMiner CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clip_miner::cli::{
    app::{load_config, run_history, run_host_ping, run_host_record, EXIT_ERROR},
    args::{Cli, Commands, HostAction},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use clip_miner::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Host { action } => {
            let config = load_config(&presenter).await;
            match action {
                HostAction::Ping => run_host_ping(&config, &presenter).await,
                HostAction::Record {
                    duration,
                    mp3,
                    output,
                } => run_host_record(&duration, mp3, &output, &config, &mut presenter).await,
            }
        }
        Commands::History { action } => {
            let config = load_config(&presenter).await;
            run_history(action, &config, &presenter).await
        }
    }
}
