//! Defines a user of the application and its ID type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from plain integers, e.g. line numbers and record counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user.
///
/// The field order matches the column order of the data file, see [crate::user_file].
/// The caller should ensure that `id` and `email` are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID, assigned by the [crate::UserStore].
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The email address the user logs in with.
    pub email: String,
    /// The user's password in cleartext.
    pub password: String,
}

impl User {
    /// Create a new user.
    ///
    /// The caller should ensure that `id` and `email` are unique.
    pub fn new(id: UserID, name: &str, email: &str, password: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    /// Check `email` and `password` against the user's credentials.
    ///
    /// Both must match exactly, including case.
    pub fn has_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
