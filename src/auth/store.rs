use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::credentials::Credentials;
use crate::error::{Error, Result};

const CREDENTIAL_FILE_VERSION: u32 = 1;

/// Storage abstraction for session credentials.
///
/// The store is the only owner of credential state; request logic reads and
/// writes snapshots through it and never touches ambient storage. Methods
/// are infallible: a request that already succeeded on the wire must not
/// fail because persistence hiccuped, so file-backed implementations
/// persist best-effort and log, while hydration happens at construction
/// where failure can still be surfaced.
pub trait CredentialStore: Send + Sync {
    /// Snapshot of the current credentials.
    fn load(&self) -> Credentials;
    /// Replace the stored credentials.
    fn save(&self, credentials: &Credentials);
    /// Drop all credentials. Idempotent.
    fn clear(&self);
}

/// In-process credential store.
///
/// The default for [`TasklineClient`](crate::client::TasklineClient) when no
/// store is injected; also what tests reach for.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out already holding the given credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Credentials {
        self.inner.read().unwrap().clone()
    }

    fn save(&self, credentials: &Credentials) {
        *self.inner.write().unwrap() = credentials.clone();
    }

    fn clear(&self) {
        *self.inner.write().unwrap() = Credentials::default();
    }
}

/// File-backed credential store using a versioned JSON file.
///
/// Hydrates from disk once at [`open`](Self::open); afterwards reads are
/// served from an in-memory copy and every mutation is written back
/// atomically (temp file + rename, `0600` on Unix). Write failures are
/// logged, not propagated.
///
/// # Example
/// ```no_run
/// use taskline::auth::{Credentials, CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::open_default()?;
/// if store.load().is_authenticated() {
///     println!("session restored");
/// }
/// # Ok::<(), taskline::Error>(())
/// ```
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cache: RwLock<Credentials>,
}

impl FileCredentialStore {
    /// Open a store at `path`, hydrating any persisted session. A missing
    /// file is an empty session, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let credentials = match fs::read_to_string(&path) {
            Ok(raw) => {
                let file: CredentialFile = serde_json::from_str(&raw)?;
                if file.version != CREDENTIAL_FILE_VERSION {
                    return Err(Error::Configuration(format!(
                        "Unsupported credentials file version {} at {}",
                        file.version,
                        path.display()
                    )));
                }
                file.credentials
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Credentials::default(),
            Err(err) => return Err(Error::Io(err)),
        };
        Ok(Self {
            path,
            cache: RwLock::new(credentials),
        })
    }

    /// Open the store at the default path (`~/.taskline/credentials.json`).
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// Default credential file path.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".taskline"))
            .unwrap_or_else(|| PathBuf::from(".taskline"))
            .join("credentials.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, credentials: &Credentials) {
        let file = CredentialFile {
            version: CREDENTIAL_FILE_VERSION,
            credentials: credentials.clone(),
            saved_at: Utc::now(),
        };
        let serialized = match serde_json::to_vec_pretty(&file) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to serialize credentials");
                return;
            }
        };
        if let Err(err) = atomic_write(&self.path, &serialized) {
            warn!(path = %self.path.display(), error = %err, "failed to persist credentials");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Credentials {
        self.cache.read().unwrap().clone()
    }

    fn save(&self, credentials: &Credentials) {
        *self.cache.write().unwrap() = credentials.clone();
        self.persist(credentials);
    }

    fn clear(&self) {
        *self.cache.write().unwrap() = Credentials::default();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to remove credentials file");
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    credentials: Credentials,
    saved_at: DateTime<Utc>,
}

fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_name = format!(
        ".{}.tmp-{}",
        file_name.to_string_lossy(),
        std::process::id()
    );
    let temp_path = path.with_file_name(temp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
