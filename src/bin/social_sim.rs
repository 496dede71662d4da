use std::error::Error;

use clap::Parser;

use social_sim::{AppState, Config, LineConsole, menu, setup_logging};

/// Start the interactive console, loading any saved users first.
fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();

    if let Err(error) = setup_logging(&config.log_path, config.verbose) {
        eprintln!(
            "\x1b[31;1mCould not open log file {:#?}: {error}\x1b[0m",
            config.log_path
        );
    }

    tracing::info!("Starting with data file {:#?}", config.data_path);

    let mut state = AppState::new(config.data_path);
    let mut console = LineConsole::stdio();

    menu::load_users(&mut state, &mut console)?;
    menu::run(&mut state, &mut console)?;

    tracing::info!("Exiting");

    Ok(())
}
