//! CLI task command handlers.

use super::build_client;
use crate::types::{CreateTaskRequest, Task, TaskPriority, TaskState};

/// Handle `taskline tasks list`.
pub async fn handle_list() -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    let tasks = client.list_tasks().await?;

    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }

    for task in &tasks {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

/// Handle `taskline tasks add`.
pub async fn handle_add(
    title: &str,
    description: Option<&str>,
    priority: TaskPriority,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;

    let Some(user) = client.credentials().user else {
        eprintln!("❌ Not signed in. Run: taskline auth login <email> <password>");
        std::process::exit(1);
    };

    let task = client
        .create_task(CreateTaskRequest {
            title: title.to_string(),
            description: description.map(str::to_string),
            priority,
            state: TaskState::Pending,
            user_id: user.id,
        })
        .await?;
    println!("✅ Created task {} ({})", task.title, task.id);
    Ok(())
}

/// Handle `taskline tasks done <id>`.
pub async fn handle_done(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    let task = client.update_task_state(id, TaskState::Completed).await?;
    println!("✅ Completed {}", task.title);
    Ok(())
}

/// Handle `taskline tasks rm <id>`.
pub async fn handle_rm(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    client.delete_task(id).await?;
    println!("🗑️  Deleted task {id}");
    Ok(())
}

fn format_task_line(task: &Task) -> String {
    let mark = match task.state {
        TaskState::Pending => "⬜",
        TaskState::InProgress => "⏳",
        TaskState::Completed => "✅",
    };
    format!("{mark} {} [{}] ({})", task.title, task.priority, task.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_task(state: TaskState) -> Task {
        Task {
            id: "t1".to_string(),
            title: "Write report".to_string(),
            description: None,
            priority: TaskPriority::High,
            state,
            user_id: "u1".to_string(),
            created_at: Utc::now(),
            updated_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn format_task_line_shows_state_and_priority() {
        let line = format_task_line(&sample_task(TaskState::Pending));
        assert_eq!(line, "⬜ Write report [high] (t1)");

        let line = format_task_line(&sample_task(TaskState::Completed));
        assert!(line.starts_with("✅"));
    }
}
