//! Credential storage and session lifecycle.

pub mod credentials;
pub(crate) mod jwt;
pub mod session;
pub mod store;

pub use credentials::{Credentials, UserProfile};
pub use session::{LogoutEvent, LogoutNotifier, NoopLogout, SessionEvents};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
