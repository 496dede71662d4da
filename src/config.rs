//! Command line configuration for the console application.

use std::path::PathBuf;

use clap::Parser;

use crate::user_file::DEFAULT_DATA_PATH;

/// The default location of the debug log, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "social_sim.log";

/// A console simulation of a small social network's user accounts.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File path to the user data file.
    #[arg(long, env = "SOCIAL_SIM_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// File path to write the debug log to.
    #[arg(long, env = "SOCIAL_SIM_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    /// Also print warnings and errors to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
