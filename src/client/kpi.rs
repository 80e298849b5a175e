//! Dashboard KPI endpoints.

use super::{PendingRequest, TasklineClient};
use crate::error::Result;
use crate::types::{DayCount, PriorityAvgTime, PriorityCount, TaskDistribution};

impl TasklineClient {
    /// Open task counts grouped by priority.
    pub async fn tasks_by_priority(&self) -> Result<Vec<PriorityCount>> {
        self.send(PendingRequest::get("/kpi/tasks-by-priority")).await
    }

    /// Average completion time in minutes, grouped by priority.
    pub async fn avg_completion_time(&self) -> Result<Vec<PriorityAvgTime>> {
        self.send(PendingRequest::get("/kpi/avg-completion-time"))
            .await
    }

    /// Task counts grouped by state.
    pub async fn task_distribution(&self) -> Result<TaskDistribution> {
        self.send(PendingRequest::get("/kpi/task-distribution")).await
    }

    /// Tasks completed per day over the trailing `days` days, or the
    /// server's default window when `None`.
    pub async fn completed_for_days(&self, days: Option<u32>) -> Result<Vec<DayCount>> {
        let mut request = PendingRequest::get("/kpi/completed-for-days");
        if let Some(days) = days {
            request = request.query("days", days);
        }
        self.send(request).await
    }
}
