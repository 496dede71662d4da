//! Defines the app level error type and the console messages shown for each error.

use std::path::Path;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email used to register is already in use. The user should try again with a
    /// different email address.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An action that needs a logged-in user was attempted without one.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// Every user ID has been handed out, so no more users can be registered.
    #[error("no user IDs are left")]
    IdsExhausted,

    /// No user matched the given details.
    #[error("no user found with the given details")]
    UserNotFound,

    /// The data file could not be opened for writing.
    ///
    /// Callers should pass in the file path and the original error as a string.
    #[error("could not open {0} for writing: {1}")]
    FileOpen(String, String),

    /// The data file was opened but writing the records failed part way.
    #[error("could not write to {0}: {1}")]
    FileWrite(String, String),

    /// The data file exists but could not be read.
    #[error("could not read {0}: {1}")]
    FileRead(String, String),

    /// There is no data file at the given path.
    ///
    /// This is expected on the first run and callers should treat it as "start with an empty
    /// roster" rather than a failure.
    #[error("no data file at {0}")]
    FileNotFound(String),

    /// A line in the data file could not be parsed into a user.
    ///
    /// The line is skipped during a load and the rest of the file is still read.
    #[error("line {line} is not a valid user record: {reason}")]
    MalformedRecord {
        /// The 1-based line number in the data file.
        line: u64,
        /// Why the line was rejected.
        reason: String,
    },
}

impl Error {
    /// Create a [Error::FileOpen] from a path and I/O error.
    pub(crate) fn file_open(path: &Path, error: impl ToString) -> Self {
        Error::FileOpen(path.display().to_string(), error.to_string())
    }

    /// Create a [Error::FileWrite] from a path and I/O error.
    pub(crate) fn file_write(path: &Path, error: impl ToString) -> Self {
        Error::FileWrite(path.display().to_string(), error.to_string())
    }

    /// Create a [Error::FileRead] from a path and I/O error.
    pub(crate) fn file_read(path: &Path, error: impl ToString) -> Self {
        Error::FileRead(path.display().to_string(), error.to_string())
    }

    /// The message shown to the user on the console for this error.
    pub fn console_message(&self) -> String {
        match self {
            Error::DuplicateEmail => {
                "Email already exists! Please use a different email.".to_owned()
            }
            Error::InvalidCredentials => "Invalid email or password!".to_owned(),
            Error::NotLoggedIn => "Please login first!".to_owned(),
            Error::IdsExhausted => "No more users can be registered.".to_owned(),
            Error::UserNotFound => "No user found with the given details.".to_owned(),
            Error::FileOpen(..) => "Error: Could not open file for saving!".to_owned(),
            Error::FileWrite(path, _) => format!("Error: Could not finish saving to {path}!"),
            Error::FileRead(path, _) => format!("Error: Could not read {path}!"),
            Error::FileNotFound(_) => "No existing user file found. Starting fresh.".to_owned(),
            Error::MalformedRecord { line, reason } => {
                format!("Warning: skipped line {line} ({reason}).")
            }
        }
    }
}
