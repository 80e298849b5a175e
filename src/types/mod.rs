//! Wire types for the Taskline API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::auth::UserProfile;

// ---------- auth ----------

/// Body for `POST /auth/signin`.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /auth/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// ISO 8601.
    pub birthday: String,
}

/// Body for `POST /auth/send-recover-email`.
#[derive(Debug, Clone, Serialize)]
pub struct SendRecoverEmailRequest {
    pub email: String,
}

/// Body for `POST /auth/recover-password`. The one-time token from the
/// recovery email goes in the `token` query parameter, not here.
#[derive(Debug, Clone, Serialize)]
pub struct RecoverPasswordRequest {
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Successful sign-in/sign-up payload. Refresh tokens never travel in this
/// body; when the server issues one it arrives via the `x-refresh-token`
/// response header like on any other response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub access_token: String,
    pub user: UserProfile,
}

/// Canonical shape of the refresh endpoint's response.
///
/// The wire has drifted over time (`access_Token`, `refresh_Token`); the
/// aliases absorb that here so nothing downstream ever sees the variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    #[serde(rename = "accessToken", alias = "access_Token", alias = "access_token")]
    pub access_token: String,
    #[serde(
        rename = "refreshToken",
        alias = "refresh_Token",
        alias = "refresh_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<String>,
}

// ---------- tasks ----------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TaskState {
    Pending,
    InProgress,
    Completed,
}

/// A task as the server returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub state: TaskState,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body for `POST /tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub state: TaskState,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Body for `PATCH /tasks/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
}

/// Body for `PATCH /tasks/{id}/state`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateTaskStateRequest {
    pub state: TaskState,
}

// ---------- users ----------

/// Body for `PATCH /users`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// ---------- kpi ----------

/// Row of `GET /kpi/tasks-by-priority`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityCount {
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    pub count: u64,
}

/// Row of `GET /kpi/avg-completion-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityAvgTime {
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(rename = "avgCompletionTimeMinutes")]
    pub avg_completion_time_minutes: f64,
}

/// Row of the task-distribution payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCount {
    pub state: TaskState,
    pub count: u64,
}

/// Payload of `GET /kpi/task-distribution`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDistribution {
    pub distribution: Vec<StateCount>,
}

/// Row of `GET /kpi/completed-for-days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCount {
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub count: u64,
}

// ---------- files ----------

/// Multipart payload for `POST /files/upload`. Holds owned bytes so the
/// form can be rebuilt if the request is retried after a token refresh.
#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub folder: Option<String>,
    /// Previous image to replace; the server deletes it after a successful
    /// upload.
    pub old_image_url: Option<String>,
}

/// Body for `POST /files/upload-from-url`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFromUrlRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// Payload returned by the upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileResponse {
    #[serde(alias = "publicId")]
    pub public_id: String,
    pub url: String,
}

/// Payload of `GET /files/optimized/{public_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedUrlResponse {
    pub url: String,
}

/// Payload of `GET /files/transformed/{public_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedUrlResponse {
    pub url: String,
}

/// Payload of `DELETE /files/{public_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn refresh_response_accepts_canonical_fields() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn refresh_response_accepts_drifted_fields() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"access_Token":"a","refresh_Token":"r"}"#).unwrap();
        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.refresh_token.as_deref(), Some("r"));

        let snake: RefreshResponse = serde_json::from_str(r#"{"access_token":"a2"}"#).unwrap();
        assert_eq!(snake.access_token, "a2");
        assert_eq!(snake.refresh_token, None);
    }

    #[test]
    fn task_state_round_trips_snake_case() {
        let json = serde_json::to_string(&TaskState::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
        let back: TaskState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskState::InProgress);
        assert_eq!(TaskState::InProgress.to_string(), "in_progress");
        assert_eq!(
            "in_progress".parse::<TaskState>().unwrap(),
            TaskState::InProgress
        );
    }

    #[test]
    fn task_tolerates_missing_optional_timestamps() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "t1",
                "title": "Write report",
                "priority": "high",
                "state": "pending",
                "userId": "u1",
                "created_at": "2026-02-01T09:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(task.user_id, "u1");
        assert_eq!(task.completed_at, None);
        assert_eq!(task.updated_at, None);
    }

    #[test]
    fn update_task_skips_unset_fields() {
        let body = serde_json::to_value(UpdateTaskRequest {
            title: Some("New title".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"title": "New title"}));
    }

    #[test]
    fn kpi_rows_tolerate_null_priority() {
        let row: PriorityCount = serde_json::from_str(r#"{"priority":null,"count":3}"#).unwrap();
        assert_eq!(row.priority, None);
        assert_eq!(row.count, 3);
    }
}
