//! Social Sim is a console application for managing a small roster of user accounts.
//!
//! Users can register, log in, view and edit their profile, and list everyone else. The roster
//! lives in memory and is saved to and loaded from a plain comma separated text file on request.
//!
//! The pieces fit together like this:
//! - [UserStore] holds the [User]s and reads and writes the data file.
//! - [AppState] owns the store and the current [Session] and implements every menu action.
//! - [menu::run] shows the menus on a [Console] and dispatches the choices to [AppState].

#![warn(missing_docs)]

mod app_state;
mod config;
mod console;
mod error;
mod logging;
pub mod menu;
mod session;
mod store;
mod user;
pub mod user_file;

pub use app_state::{AppState, LoadReport};
pub use config::{Config, DEFAULT_LOG_PATH};
pub use console::{Console, LineConsole};
pub use error::Error;
pub use logging::setup_logging;
pub use session::Session;
pub use store::{LoadSummary, UserStore};
pub use user::{User, UserID};
