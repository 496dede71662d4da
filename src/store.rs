//! Defines the in-memory user store and its persistence to the data file.

use std::path::Path;

use crate::{
    Error,
    user::{User, UserID},
    user_file::{read_users, write_users},
};

/// The outcome of loading the data file into a [UserStore].
#[derive(Debug, PartialEq)]
pub struct LoadSummary {
    /// The number of users now in the store.
    pub loaded: usize,
    /// One [Error::MalformedRecord] per line that was skipped.
    pub skipped: Vec<Error>,
}

/// Handles the creation, retrieval and persistence of [User]s.
///
/// Users are kept in registration order. IDs are allocated from a counter that only moves
/// forward, so an ID is never handed out twice by the same store.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStore {
    users: Vec<User>,
    next_id: i64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store. The first registered user gets the ID 1.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// The ID that the next registered user will get.
    pub fn next_id(&self) -> UserID {
        UserID::new(self.next_id)
    }

    /// All users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The number of users in the store.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store has no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_index(&self, predicate: impl Fn(&User) -> bool) -> Option<usize> {
        self.users.iter().position(predicate)
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<&User> {
        self.find_index(predicate).map(|index| &self.users[index])
    }

    /// Register a new user and return their ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if `email` is already in use, or [Error::IdsExhausted] if
    /// there are no IDs left to hand out. The store is not modified in either case.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<UserID, Error> {
        if self.get_by_email(email).is_some() {
            return Err(Error::DuplicateEmail);
        }

        let id = self.next_id();
        let next_id = self.next_id.checked_add(1).ok_or(Error::IdsExhausted)?;
        self.users.push(User::new(id, name, email, password));
        self.next_id = next_id;

        tracing::info!("Registered user {id}");

        Ok(id)
    }

    /// Get the ID of the first user whose email and password both match.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<UserID> {
        self.find(|user| user.has_credentials(email, password))
            .map(|user| user.id)
    }

    /// Get a user by their ID.
    pub fn get(&self, id: UserID) -> Option<&User> {
        self.find(|user| user.id == id)
    }

    /// Get a mutable reference to a user by their ID.
    pub fn get_mut(&mut self, id: UserID) -> Option<&mut User> {
        self.find_index(|user| user.id == id)
            .map(|index| &mut self.users[index])
    }

    /// Get a user by their email.
    pub fn get_by_email(&self, email: &str) -> Option<&User> {
        self.find(|user| user.email == email)
    }

    /// Change the name of the user with the ID `id`.
    ///
    /// Surrounding whitespace is trimmed from `new_name`. If nothing is left, or there is no user
    /// with the ID `id`, nothing changes.
    ///
    /// Returns whether the name was changed.
    pub fn rename_user(&mut self, id: UserID, new_name: &str) -> bool {
        let new_name = new_name.trim();

        if new_name.is_empty() {
            return false;
        }

        match self.get_mut(id) {
            Some(user) => {
                user.name = new_name.to_owned();
                tracing::info!("Renamed user {id}");
                true
            }
            None => false,
        }
    }

    /// Replace the password of the user with the ID `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UserNotFound] if there is no user with the ID `id`.
    pub fn set_password(&mut self, id: UserID, password: &str) -> Result<(), Error> {
        let user = self.get_mut(id).ok_or(Error::UserNotFound)?;
        user.password = password.to_owned();
        tracing::info!("Changed password for user {id}");

        Ok(())
    }

    /// Write every user to the data file at `path`, replacing its content.
    ///
    /// Returns the number of users saved.
    ///
    /// # Errors
    ///
    /// Returns [Error::FileOpen] if the file cannot be opened for writing, or
    /// [Error::FileWrite] if writing failed part way through.
    pub fn save(&self, path: &Path) -> Result<usize, Error> {
        let count = write_users(path, &self.users)?;
        tracing::info!("Saved {count} users to {}", path.display());

        Ok(count)
    }

    /// Replace the users in the store with the users in the data file at `path`.
    ///
    /// Malformed lines are skipped and logged. The next ID becomes one past the largest loaded
    /// ID unless the current next ID is already larger.
    ///
    /// # Errors
    ///
    /// Returns [Error::FileNotFound] if there is no file at `path` and [Error::FileRead] if it
    /// could not be read. In both cases the store is left unchanged.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary, Error> {
        let parsed = read_users(path)?;

        for error in &parsed.skipped {
            tracing::warn!("Skipping record in {}: {error}", path.display());
        }

        self.users = parsed.users;

        if let Some(max_id) = self.users.iter().map(|user| user.id.as_i64()).max() {
            self.next_id = self.next_id.max(max_id.saturating_add(1));
        }

        tracing::info!(
            "Loaded {} users from {}, next ID is {}",
            self.users.len(),
            path.display(),
            self.next_id
        );

        Ok(LoadSummary {
            loaded: self.users.len(),
            skipped: parsed.skipped,
        })
    }
}
