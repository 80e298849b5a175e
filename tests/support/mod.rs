#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::json;
use taskline::auth::{
    CredentialStore, Credentials, LogoutNotifier, MemoryCredentialStore, UserProfile,
};
use taskline::TasklineClient;

/// Credential store that counts mutations on top of the in-memory store.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryCredentialStore,
    saves: AtomicUsize,
    clears: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(access: Option<&str>, refresh: Option<&str>) -> Self {
        let store = Self::default();
        store.inner.save(&Credentials {
            access_token: access.map(str::to_string),
            refresh_token: refresh.map(str::to_string),
            user: None,
        });
        store
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CredentialStore for RecordingStore {
    fn load(&self) -> Credentials {
        self.inner.load()
    }

    fn save(&self, credentials: &Credentials) {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(credentials);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear();
    }
}

/// Logout notifier that counts how many times it fired.
#[derive(Default)]
pub struct RecordingLogout {
    fired: AtomicUsize,
}

impl RecordingLogout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl LogoutNotifier for RecordingLogout {
    fn notify_logout(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fabricate an unsigned JWT whose payload carries the given `exp` claim.
pub fn jwt_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": "user-1", "exp": exp }).to_string());
    format!("{header}.{payload}.signature")
}

pub fn live_refresh_token() -> String {
    jwt_expiring_at(Utc::now().timestamp() + 3600)
}

pub fn expired_refresh_token() -> String {
    jwt_expiring_at(Utc::now().timestamp() - 3600)
}

pub fn sample_user() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        avatar: None,
        birthday: Some("1815-12-10".to_string()),
    }
}

pub fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "birthday": "1815-12-10"
    })
}

pub fn task_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "priority": "medium",
        "state": "pending",
        "userId": "u1",
        "created_at": "2026-02-01T09:30:00Z"
    })
}

pub fn client_with(
    base_url: &str,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn LogoutNotifier>,
) -> TasklineClient {
    TasklineClient::builder()
        .base_url(base_url)
        .credential_store(store)
        .logout_notifier(notifier)
        .build()
        .expect("client builds")
}
