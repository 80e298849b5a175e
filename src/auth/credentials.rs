use serde::{Deserialize, Serialize};

/// Credential snapshot held by a [`CredentialStore`](crate::auth::CredentialStore).
///
/// Created at sign-in or sign-up, the access token replaced on every
/// successful refresh, everything cleared on logout or unrecoverable
/// refresh failure. Request logic never touches ambient storage; it reads
/// and writes snapshots through the store.
///
/// # Example
/// ```
/// use taskline::auth::Credentials;
///
/// let creds = Credentials {
///     access_token: Some("access".to_string()),
///     refresh_token: Some("refresh".to_string()),
///     user: None,
/// };
/// assert!(creds.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Credentials {
    /// Whether an access token is present. Says nothing about validity;
    /// the server remains the authority.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Profile fields kept alongside the tokens: the subset of the account
/// that is safe to persist locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// ISO 8601; the server has served both date-only and full timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}
