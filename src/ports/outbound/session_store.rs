use crate::planning::domain::User;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Bearer token and the user it was issued for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// SessionStore port for keeping the authentication session
///
/// Plays the role browser storage plays for the web client: a persistent
/// store survives the process, a volatile one lives as long as it does.
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, `None` when nobody is logged in
    ///
    /// # Errors
    /// Returns an error if the backing storage exists but cannot be read
    fn load(&self) -> Result<Option<Session>>;

    fn save(&self, session: &Session) -> Result<()>;

    /// Removes the session; clearing an empty store is not an error
    fn clear(&self) -> Result<()>;

    /// Token of the stored session, if any
    fn token(&self) -> Option<String> {
        self.load().ok().flatten().map(|s| s.token)
    }
}
