//! CLI entry point for Taskline.

pub mod auth;
pub mod tasks;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::auth::{CredentialStore, FileCredentialStore};
use crate::client::TasklineClient;
use crate::config::TasklineConfig;
use crate::types::TaskPriority;

/// Taskline CLI
#[derive(Parser, Debug)]
#[command(name = "taskline", version, about = "Taskline — task management from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthArgs),
    /// Work with tasks
    Tasks(TaskArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Show session status
    Status,
    /// Clear the stored session
    Logout,
}

/// Arguments for `taskline auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Arguments for the `tasks` subcommand group.
#[derive(Parser, Debug)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List your tasks
    List,
    /// Create a task
    Add(AddTaskArgs),
    /// Mark a task completed
    Done(TaskIdArgs),
    /// Delete a task
    Rm(TaskIdArgs),
}

/// Arguments for `taskline tasks add`.
#[derive(Parser, Debug)]
pub struct AddTaskArgs {
    /// Task title
    pub title: String,

    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Priority (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub priority: TaskPriority,
}

/// Arguments for task subcommands addressing one task.
#[derive(Parser, Debug)]
pub struct TaskIdArgs {
    /// Task id
    pub id: String,
}

/// Build a client wired to a file-backed store so sessions survive
/// between invocations.
pub(crate) fn build_client() -> Result<TasklineClient, Box<dyn std::error::Error>> {
    let config = TasklineConfig::from_env();
    let store: Arc<dyn CredentialStore> = match &config.credentials_path {
        Some(path) => Arc::new(FileCredentialStore::open(path.clone())?),
        None => Arc::new(FileCredentialStore::open_default()?),
    };
    let client = TasklineClient::builder()
        .base_url(config.base_url)
        .timeout(Duration::from_secs(config.timeout_secs))
        .credential_store(store)
        .build()?;
    Ok(client)
}
