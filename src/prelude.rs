//! Convenience re-exports for common use.

pub use crate::auth::{
    CredentialStore, Credentials, FileCredentialStore, LogoutEvent, LogoutNotifier,
    MemoryCredentialStore, SessionEvents, UserProfile,
};
pub use crate::client::{TasklineClient, TasklineClientBuilder};
pub use crate::config::TasklineConfig;
pub use crate::error::{Error, Result};
pub use crate::types::{
    CreateTaskRequest, SessionInfo, Task, TaskPriority, TaskState, UpdateTaskRequest,
};
