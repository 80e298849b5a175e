//! Taskline — async Rust client for the Taskline task-management API.
//!
//! The client owns the authentication lifecycle: it attaches the bearer
//! token to every request, transparently refreshes it on the first 401 and
//! retries the original request once, and tears the session down (clearing
//! the credential store and firing a logout signal) when refresh can no
//! longer help. Credentials live behind the [`auth::CredentialStore`]
//! trait, in memory or on disk.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskline::prelude::*;
//!
//! # async fn example() -> taskline::error::Result<()> {
//! let client = TasklineClient::new("http://localhost:3001")?;
//! client.sign_in("ada@example.com", "hunter2").await?;
//!
//! for task in client.list_tasks().await? {
//!     println!("{} [{}]", task.title, task.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::TasklineClient;
pub use error::{Error, Result};
