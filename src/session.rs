//! Session identity stored by the authentication flow.
//!
//! Sign-in is out of scope for this crate: some other surface authenticates
//! and writes the `user` and `token` storage keys. This module only reads
//! them, so the orchestrator can stamp `user_id` onto order requests and
//! the API client can attach the bearer token.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::ids::TypedId,
    storage::{StorageBackend, StorageError},
};

/// Storage key holding the signed-in user's profile JSON.
pub const USER_KEY: &str = "user";

/// Storage key holding the bearer token string.
pub const TOKEN_KEY: &str = "token";

/// The signed-in user's identifier.
pub type UserId = TypedId<UserProfile>;

/// Role the backend assigned to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Orders food and manages their own cart.
    Customer,
    /// Manages a restaurant's menu and incoming orders.
    Restaurant,
    /// Accepts pending orders and delivers them.
    Delivery,
    /// Platform administration.
    Admin,
}

/// Profile stored under [`USER_KEY`] at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend identifier for the user.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Contact number, when the user provided one.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Assigned role.
    pub role: Role,
}

/// A loaded session: who is signed in and the token proving it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The signed-in user.
    pub user: UserProfile,
    /// Bearer token for backend calls.
    pub token: String,
}

/// Errors raised while loading the stored session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No stored session; the user has to sign in first.
    #[error("no stored session")]
    NotSignedIn,

    /// The stored profile is not valid JSON.
    #[error("stored session is corrupt")]
    Corrupt(#[from] serde_json::Error),

    /// Local storage could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Session {
    /// Load the session written by the sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] when either key is absent,
    /// [`SessionError::Corrupt`] when the stored profile does not parse,
    /// and [`SessionError::Storage`] when local storage fails.
    pub fn load(storage: &dyn StorageBackend) -> Result<Self, SessionError> {
        let token = storage.read(TOKEN_KEY)?.ok_or(SessionError::NotSignedIn)?;
        let raw_user = storage.read(USER_KEY)?.ok_or(SessionError::NotSignedIn)?;

        let user: UserProfile = serde_json::from_str(&raw_user)?;

        Ok(Self { user, token })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn store_profile(storage: &MemoryStorage) -> TestResult {
        storage.write(TOKEN_KEY, "tok_123")?;
        storage.write(
            USER_KEY,
            r#"{"id":"u1","username":"abebe","phoneNumber":"0911","role":"customer"}"#,
        )?;

        Ok(())
    }

    #[test]
    fn load_returns_profile_and_token() -> TestResult {
        let storage = MemoryStorage::new();
        store_profile(&storage)?;

        let session = Session::load(&storage)?;

        assert_eq!(session.token, "tok_123");
        assert_eq!(session.user.username, "abebe");
        assert_eq!(session.user.role, Role::Customer);

        Ok(())
    }

    #[test]
    fn missing_token_means_not_signed_in() -> TestResult {
        let storage = MemoryStorage::new();
        storage.write(USER_KEY, r#"{"id":"u1","username":"a","role":"delivery"}"#)?;

        let result = Session::load(&storage);

        assert!(
            matches!(result, Err(SessionError::NotSignedIn)),
            "expected NotSignedIn, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn corrupt_profile_is_reported() -> TestResult {
        let storage = MemoryStorage::new();
        storage.write(TOKEN_KEY, "tok")?;
        storage.write(USER_KEY, "{not json")?;

        let result = Session::load(&storage);

        assert!(
            matches!(result, Err(SessionError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn roles_deserialize_from_backend_strings() -> TestResult {
        let role: Role = serde_json::from_str("\"restaurant\"")?;

        assert_eq!(role, Role::Restaurant);

        Ok(())
    }
}
