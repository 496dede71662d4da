//! Tracks whether someone is logged in.

use crate::user::UserID;

/// The authentication state of the console session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Session {
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// The user with the given ID is logged in.
    Authenticated(UserID),
}

impl Session {
    /// The ID of the logged-in user, if any.
    pub fn user_id(&self) -> Option<UserID> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(id) => Some(*id),
        }
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

#[cfg(test)]
mod session_tests {
    use crate::user::UserID;

    use super::Session;

    #[test]
    fn new_session_is_anonymous() {
        let session = Session::default();

        assert_eq!(session, Session::Anonymous);
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn authenticated_session_has_user_id() {
        let session = Session::Authenticated(UserID::new(3));

        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some(UserID::new(3)));
    }
}
