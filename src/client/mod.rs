//! Taskline HTTP client with transparent access-token refresh.
//!
//! Every authenticated request runs the same state machine: attach the
//! bearer token, dispatch, and on the first `401 Unauthorized` refresh the
//! access token and retry the original request exactly once. Terminal
//! authentication failures clear the credential store and fire the logout
//! signal before surfacing to the caller; a second 401 is never absorbed.

pub mod auth;
pub mod files;
pub mod kpi;
pub mod tasks;
pub mod users;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::jwt::{self, ExpiryCheck};
use crate::auth::{
    CredentialStore, Credentials, LogoutNotifier, MemoryCredentialStore, NoopLogout,
};
use crate::config::TasklineConfig;
use crate::error::{Error, Result};
use crate::types::{RefreshResponse, UploadFileRequest};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_USER_AGENT: &str = concat!("taskline/", env!("CARGO_PKG_VERSION"));

/// Header carrying the refresh token: to the server on the refresh call,
/// and from the server as a rotation hint on any successful response.
const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
const REFRESH_PATH: &str = "/auth/refresh-token";

/// Client for the Taskline API.
///
/// Cheap to clone; clones share the credential store, the logout notifier
/// and the refresh gate, so concurrent requests across clones still
/// coalesce into a single token refresh.
///
/// # Example
/// ```no_run
/// use taskline::client::TasklineClient;
///
/// # async fn run() -> taskline::Result<()> {
/// let client = TasklineClient::new("http://localhost:3001")?;
/// let session = client.sign_in("ada@example.com", "hunter2").await?;
/// println!("signed in as {}", session.user.email);
/// let tasks = client.list_tasks().await?;
/// println!("{} open tasks", tasks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TasklineClient {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn LogoutNotifier>,
    refresh_gate: Arc<Mutex<()>>,
}

impl fmt::Debug for TasklineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TasklineClient")
            .field("base_url", &self.base_url)
            .field("store", &"..")
            .field("notifier", &"..")
            .finish()
    }
}

impl TasklineClient {
    /// Create a client with default configuration against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> TasklineClientBuilder {
        TasklineClientBuilder::default()
    }

    /// Build a client from the environment (see [`TasklineConfig`]):
    /// `TASKLINE_BASE_URL`, `TASKLINE_TIMEOUT_SECS` and, when
    /// `TASKLINE_CREDENTIALS_PATH` is set, a file-backed credential store
    /// hydrated from that path.
    pub fn from_env() -> Result<Self> {
        let config = TasklineConfig::from_env();
        let mut builder = Self::builder()
            .base_url(config.base_url)
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(path) = config.credentials_path {
            builder = builder.credential_store(Arc::new(
                crate::auth::FileCredentialStore::open(path)?,
            ));
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the stored credentials.
    pub fn credentials(&self) -> Credentials {
        self.store.load()
    }

    /// Dispatch a request through the refresh state machine and decode the
    /// JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: PendingRequest) -> Result<T> {
        let response = self.dispatch_with_refresh(request).await?;
        let bytes = response.bytes().await.map_err(Error::Transport)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`send`](Self::send) for endpoints whose body we discard.
    pub(crate) async fn send_unit(&self, request: PendingRequest) -> Result<()> {
        self.dispatch_with_refresh(request).await?;
        Ok(())
    }

    /// The per-request state machine. Returns the successful response with
    /// any rotation hint already captured; every failure has been mapped
    /// (and, for terminal auth kinds, the session torn down) by the time
    /// this returns.
    pub(crate) async fn dispatch_with_refresh(
        &self,
        mut request: PendingRequest,
    ) -> Result<reqwest::Response> {
        let mut bearer = self.store.load().access_token;

        loop {
            let response = self.dispatch(&request, bearer.as_deref()).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if request.retried {
                    warn!(path = %request.path, "still unauthorized after token refresh");
                    return Err(self.fail_terminal(Error::RetryExhausted));
                }
                request.retried = true;
                debug!(path = %request.path, "access token rejected, refreshing");
                // The retry always carries the post-refresh token.
                bearer = Some(self.refresh_access_token(bearer.as_deref()).await?);
                continue;
            }

            if status.is_success() {
                self.capture_refresh_hint(&response);
                return Ok(response);
            }

            return Err(error_from_response(response).await);
        }
    }

    /// Dispatch a request without bearer attachment or 401 recovery. Used
    /// by the unauthenticated bootstrap calls (sign-in, sign-up, password
    /// recovery), where a 401 means bad user credentials, not a stale
    /// token.
    pub(crate) async fn dispatch_public(
        &self,
        request: PendingRequest,
    ) -> Result<reqwest::Response> {
        let response = self.dispatch(&request, None).await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response)
    }

    async fn dispatch(
        &self,
        request: &PendingRequest,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), url);

        if let Some(token) = bearer {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(body),
            Payload::Upload(upload) => builder.multipart(build_upload_form(upload)),
        };

        builder.send().await.map_err(Error::Transport)
    }

    /// Refresh the access token, coalescing concurrent attempts.
    ///
    /// `stale_access` is the token the failed request went out with. After
    /// acquiring the gate the store is re-read: if the access token already
    /// differs, another request refreshed while this one waited and its
    /// token is reused without touching the network.
    async fn refresh_access_token(&self, stale_access: Option<&str>) -> Result<String> {
        let _flight = self.refresh_gate.lock().await;

        let current = self.store.load();
        if let Some(fresh) = current.access_token {
            if stale_access != Some(fresh.as_str()) {
                debug!("reusing access token refreshed by a concurrent request");
                return Ok(fresh);
            }
        }

        let refresh_token = match current.refresh_token {
            Some(token) => token,
            None => return Err(self.fail_terminal(Error::NoRefreshToken)),
        };

        // Skip the round trip only when the token is provably expired; an
        // undecodable token goes to the server, which stays the authority.
        match jwt::check_expiry(&refresh_token) {
            ExpiryCheck::Expired => {
                return Err(self.fail_terminal(Error::RefreshTokenExpired));
            }
            ExpiryCheck::Valid | ExpiryCheck::Unverifiable => {}
        }

        // The refresh token travels in its own header, never as a bearer.
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .client
            .post(&url)
            .header(REFRESH_TOKEN_HEADER, &refresh_token)
            .send()
            .await
            .map_err(|err| {
                self.fail_terminal(Error::refresh_failed(
                    "refresh request failed",
                    Some(Box::new(err)),
                ))
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(self.fail_terminal(Error::RefreshTokenRejected));
        }
        if !status.is_success() {
            return Err(self.fail_terminal(Error::refresh_failed(
                format!("refresh endpoint returned status {status}"),
                None,
            )));
        }

        let rotated_in_header = refresh_token_hint(&response);
        let payload = match response.bytes().await {
            Ok(bytes) => match serde_json::from_slice::<RefreshResponse>(&bytes) {
                Ok(payload) => payload,
                Err(err) => {
                    return Err(self.fail_terminal(Error::refresh_failed(
                        "undecodable refresh response",
                        Some(Box::new(err)),
                    )))
                }
            },
            Err(err) => {
                return Err(self.fail_terminal(Error::refresh_failed(
                    "failed to read refresh response",
                    Some(Box::new(err)),
                )))
            }
        };

        let mut next = self.store.load();
        next.access_token = Some(payload.access_token.clone());
        // Rotation is optional; a missing token means the stored one stays
        // valid.
        if let Some(rotated) = payload.refresh_token.or(rotated_in_header) {
            next.refresh_token = Some(rotated);
        }
        self.store.save(&next);
        debug!("access token refreshed");

        Ok(payload.access_token)
    }

    /// Store a rotated refresh token delivered out-of-band on a successful
    /// response. Hints never resurrect a session that was torn down while
    /// the response was in flight.
    fn capture_refresh_hint(&self, response: &reqwest::Response) {
        let Some(rotated) = refresh_token_hint(response) else {
            return;
        };
        let mut current = self.store.load();
        if current.is_empty() {
            debug!("dropping refresh token hint for a cleared session");
            return;
        }
        if current.refresh_token.as_deref() == Some(rotated.as_str()) {
            return;
        }
        debug!("refresh token rotated via response header");
        current.refresh_token = Some(rotated);
        self.store.save(&current);
    }

    /// Single exit point for terminal auth failures: clear the session,
    /// fire the logout signal once, hand the error back for propagation.
    fn fail_terminal(&self, error: Error) -> Error {
        warn!(error = %error, "terminal auth failure, ending session");
        self.store.clear();
        self.notifier.notify_logout();
        error
    }

    /// Clear stored credentials and fire the logout signal. Safe to call
    /// when already signed out.
    pub fn sign_out(&self) {
        self.store.clear();
        self.notifier.notify_logout();
    }
}

/// Description of an outbound request, retained in owned form so the
/// refresh path can re-dispatch it with a rebuilt Authorization header.
#[derive(Debug)]
pub(crate) struct PendingRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    payload: Payload,
    /// Flips to true at most once; a 401 after that is terminal.
    retried: bool,
}

#[derive(Debug)]
enum Payload {
    Empty,
    Json(Value),
    Upload(UploadFileRequest),
}

impl PendingRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            retried: false,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn json(mut self, body: &impl Serialize) -> Result<Self> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn upload(mut self, upload: UploadFileRequest) -> Self {
        self.payload = Payload::Upload(upload);
        self
    }
}

/// Builder for [`TasklineClient`].
#[derive(Default)]
pub struct TasklineClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn CredentialStore>>,
    notifier: Option<Arc<dyn LogoutNotifier>>,
}

impl TasklineClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Client-wide request timeout. Elapsing surfaces as a transport
    /// error and is never retried. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Inject the credential store. Defaults to a fresh in-memory store.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Inject the logout capability the client fires on terminal auth
    /// failure. Defaults to a no-op.
    pub fn logout_notifier(mut self, notifier: Arc<dyn LogoutNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<TasklineClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base_url is required".into()))?
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()))
            .build()
            .map_err(Error::Transport)?;

        Ok(TasklineClient {
            client,
            base_url,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(NoopLogout)),
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }
}

/// Rotated refresh token delivered via response header, if any.
pub(crate) fn refresh_token_hint(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn error_from_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = match response.bytes().await {
        Ok(bytes) => extract_error_message(&bytes)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Error::http(status.as_u16(), message)
}

/// Pull the `message` field out of an API error body. The server sends
/// either a string or, for validation failures, an array of strings.
fn extract_error_message(bytes: &[u8]) -> Option<String> {
    let body: Value = serde_json::from_slice(bytes).ok()?;
    match body.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

fn build_upload_form(upload: &UploadFileRequest) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone());
    let mut form = reqwest::multipart::Form::new().part("file", part);
    if let Some(folder) = &upload.folder {
        form = form.text("folder", folder.clone());
    }
    if let Some(old) = &upload.old_image_url {
        form = form.text("oldImageUrl", old.clone());
    }
    form
}
