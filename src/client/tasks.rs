//! Task endpoints.

use super::{PendingRequest, TasklineClient};
use crate::error::Result;
use crate::types::{
    CreateTaskRequest, Task, TaskState, UpdateTaskRequest, UpdateTaskStateRequest,
};

impl TasklineClient {
    /// List the signed-in user's tasks.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.send(PendingRequest::get("/tasks")).await
    }

    /// Create a task.
    pub async fn create_task(&self, body: CreateTaskRequest) -> Result<Task> {
        self.send(PendingRequest::post("/tasks").json(&body)?).await
    }

    /// Update a task's fields.
    pub async fn update_task(&self, id: &str, body: UpdateTaskRequest) -> Result<Task> {
        self.send(PendingRequest::patch(format!("/tasks/{id}")).json(&body)?)
            .await
    }

    /// Move a task to another state.
    pub async fn update_task_state(&self, id: &str, state: TaskState) -> Result<Task> {
        let body = UpdateTaskStateRequest { state };
        self.send(PendingRequest::patch(format!("/tasks/{id}/state")).json(&body)?)
            .await
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.send_unit(PendingRequest::delete(format!("/tasks/{id}")))
            .await
    }
}
