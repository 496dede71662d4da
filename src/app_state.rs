//! Implements a struct that holds the state of the console application.

use std::path::{Path, PathBuf};

use crate::{
    Error,
    session::Session,
    store::{LoadSummary, UserStore},
    user::{User, UserID},
};

/// The result of reloading the data file through [AppState::load].
#[derive(Debug, PartialEq)]
pub struct LoadReport {
    /// What the store loaded.
    pub summary: LoadSummary,
    /// The user that was logged out because they are not in the loaded data.
    pub ended_session: Option<UserID>,
}

/// The state of the console application.
///
/// Owns the user store, the current session and the location of the data file for the lifetime
/// of the process. Every menu action goes through one of the methods here.
#[derive(Debug)]
pub struct AppState {
    store: UserStore,
    session: Session,
    data_path: PathBuf,
}

impl AppState {
    /// Create a new [AppState] with an empty store and nobody logged in.
    ///
    /// Nothing is read from `data_path` until [AppState::load] is called.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            store: UserStore::new(),
            session: Session::Anonymous,
            data_path: data_path.into(),
        }
    }

    /// The current session.
    pub fn session(&self) -> Session {
        self.session
    }

    /// The user store.
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// The path the data file is saved to and loaded from.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Register a new user. Registering does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if `email` is already in use.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<UserID, Error> {
        self.store.register(name, email, password)
    }

    /// Log in as the user with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCredentials] if no user has both `email` and `password`. The
    /// session is left as it was.
    pub fn log_in(&mut self, email: &str, password: &str) -> Result<&User, Error> {
        let Some(id) = self.store.authenticate(email, password) else {
            tracing::warn!("Failed log-in attempt");
            return Err(Error::InvalidCredentials);
        };

        self.session = Session::Authenticated(id);
        tracing::info!("User {id} logged in");

        self.store.get(id).ok_or(Error::UserNotFound)
    }

    /// Log out the current user and return their ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] if nobody is logged in.
    pub fn log_out(&mut self) -> Result<UserID, Error> {
        let id = self.session.user_id().ok_or(Error::NotLoggedIn)?;
        self.session = Session::Anonymous;
        tracing::info!("User {id} logged out");

        Ok(id)
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] if nobody is logged in, or [Error::UserNotFound] if the
    /// session refers to a user that is not in the store.
    pub fn current_user(&self) -> Result<&User, Error> {
        let id = self.session.user_id().ok_or(Error::NotLoggedIn)?;

        self.store.get(id).ok_or(Error::UserNotFound)
    }

    /// Change the logged-in user's name. A blank `new_name` keeps the current name.
    ///
    /// Returns whether the name was changed.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotLoggedIn] if nobody is logged in. Nothing is changed.
    pub fn edit_profile(&mut self, new_name: &str) -> Result<bool, Error> {
        let id = self.current_user()?.id;

        Ok(self.store.rename_user(id, new_name))
    }

    /// All registered users in registration order.
    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    /// Save all users to the data file.
    ///
    /// # Errors
    ///
    /// Returns [Error::FileOpen] or [Error::FileWrite] if the file could not be written.
    pub fn save(&self) -> Result<usize, Error> {
        self.store.save(&self.data_path)
    }

    /// Replace the users in the store with the contents of the data file.
    ///
    /// If the logged-in user is not in the loaded data they are logged out, see
    /// [LoadReport::ended_session].
    ///
    /// # Errors
    ///
    /// Returns [Error::FileNotFound] if there is no data file and [Error::FileRead] if it could
    /// not be read. The store and session are unchanged in both cases.
    pub fn load(&mut self) -> Result<LoadReport, Error> {
        let summary = self.store.load(&self.data_path)?;

        let ended_session = match self.session.user_id() {
            Some(id) if self.store.get(id).is_none() => {
                tracing::warn!("User {id} is not in the loaded data, logging them out");
                self.session = Session::Anonymous;
                Some(id)
            }
            _ => None,
        };

        Ok(LoadReport {
            summary,
            ended_session,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::{Error, session::Session, user::UserID};

    use super::AppState;

    fn get_state(dir: &TempDir) -> AppState {
        AppState::new(dir.path().join("users.txt"))
    }

    #[test]
    fn register_does_not_log_in() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        let id = state.register("Alice", "a@x.com", "p1").unwrap();

        assert_eq!(id, UserID::new(1));
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn log_in_succeeds_with_valid_credentials() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();

        let user = state.log_in("a@x.com", "p1").unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(state.session(), Session::Authenticated(UserID::new(1)));
    }

    #[test]
    fn log_in_fails_with_wrong_password() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();

        let result = state.log_in("a@x.com", "wrong");

        assert_eq!(result, Err(Error::InvalidCredentials));
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn log_out_ends_session() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();
        state.log_in("a@x.com", "p1").unwrap();

        assert_eq!(state.log_out(), Ok(UserID::new(1)));
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn log_out_fails_when_anonymous() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        assert_eq!(state.log_out(), Err(Error::NotLoggedIn));
        assert_eq!(state.session(), Session::Anonymous);
    }

    #[test]
    fn profile_actions_require_log_in() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();

        assert_eq!(state.current_user(), Err(Error::NotLoggedIn));
        assert_eq!(state.edit_profile("Mallory"), Err(Error::NotLoggedIn));
        assert_eq!(state.users()[0].name, "Alice");
    }

    #[test]
    fn edit_profile_renames_current_user_only() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();
        state.register("Bob", "b@x.com", "p2").unwrap();
        state.log_in("b@x.com", "p2").unwrap();

        assert_eq!(state.edit_profile("Robert"), Ok(true));
        assert_eq!(state.edit_profile(""), Ok(false));

        assert_eq!(state.users()[0].name, "Alice");
        assert_eq!(state.users()[1].name, "Robert");
        assert_eq!(state.current_user().unwrap().email, "b@x.com");
    }

    #[test]
    fn load_missing_file_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();

        let result = state.load();

        assert!(matches!(result, Err(Error::FileNotFound(_))));
        assert_eq!(state.users().len(), 1);
    }

    #[test]
    fn load_keeps_session_when_user_still_exists() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();
        state.save().unwrap();
        state.log_in("a@x.com", "p1").unwrap();

        let report = state.load().unwrap();

        assert_eq!(report.ended_session, None);
        assert_eq!(state.session(), Session::Authenticated(UserID::new(1)));
    }

    #[test]
    fn load_logs_out_user_missing_from_file() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);
        state.register("Alice", "a@x.com", "p1").unwrap();
        state.register("Bob", "b@x.com", "p2").unwrap();
        fs::write(state.data_path(), "1,Alice,a@x.com,p1\n").unwrap();
        state.log_in("b@x.com", "p2").unwrap();

        let report = state.load().unwrap();

        assert_eq!(report.ended_session, Some(UserID::new(2)));
        assert_eq!(state.session(), Session::Anonymous);
        assert_eq!(state.current_user(), Err(Error::NotLoggedIn));
    }

    #[test]
    fn example_scenario() {
        let dir = TempDir::new().unwrap();
        let mut state = get_state(&dir);

        assert_eq!(state.register("Alice", "a@x.com", "pw1"), Ok(UserID::new(1)));
        assert_eq!(state.register("Bob", "b@x.com", "pw2"), Ok(UserID::new(2)));
        assert_eq!(
            state.register("Bob", "b@x.com", "pw2"),
            Err(Error::DuplicateEmail)
        );

        state.log_in("a@x.com", "pw1").unwrap();
        assert_eq!(state.session(), Session::Authenticated(UserID::new(1)));

        assert_eq!(state.edit_profile("Alicia"), Ok(true));
        assert_eq!(state.log_out(), Ok(UserID::new(1)));
        assert_eq!(state.save(), Ok(2));

        let mut reloaded = AppState::new(state.data_path());
        let report = reloaded.load().unwrap();

        assert_eq!(report.summary.loaded, 2);
        let users = reloaded.users();
        assert_eq!(
            (users[0].id, users[0].name.as_str(), users[0].email.as_str()),
            (UserID::new(1), "Alicia", "a@x.com")
        );
        assert_eq!(
            (users[1].id, users[1].name.as_str(), users[1].email.as_str()),
            (UserID::new(2), "Bob", "b@x.com")
        );
        assert_eq!(reloaded.store().next_id(), UserID::new(3));
    }
}
