use schedmaker::commands::Cli;
use schedmaker::libs::messages::{macros::is_debug_mode, Message};
use schedmaker::msg_debug;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schedmaker=debug")))
            .init();
        msg_debug!(Message::DebugModeEnabled);
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Message errors already carry their ❌ prefix
            if is_debug_mode() {
                tracing::error!("{:#}", err);
            } else {
                eprintln!("{:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}
