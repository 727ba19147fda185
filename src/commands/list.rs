use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::models::{parse_backend_datetime, Task};

pub async fn run(api: &ApiClient, status: &str) -> Result<()> {
    match status {
        "pending" => {
            let tasks = api.pending_tasks().await?;
            print_section("Pending", &tasks);
        }
        "completed" => {
            let tasks = api.completed_tasks().await?;
            print_section("Completed", &tasks);
        }
        "all" => {
            let pending = api.pending_tasks().await?;
            let completed = api.completed_tasks().await?;
            print_section("Pending", &pending);
            println!();
            print_section("Completed", &completed);
            println!();
            println!("{} task(s) total", pending.len() + completed.len());
        }
        other => bail!("Invalid status '{}'. Must be one of: pending, completed, all", other),
    }
    Ok(())
}

fn print_section(label: &str, tasks: &[Task]) {
    println!("{} ({})", label, tasks.len());
    if tasks.is_empty() {
        println!("  No tasks.");
        return;
    }

    for task in tasks {
        println!(
            "#{:<5} {:<40} {:8} due {}",
            task.id,
            truncate(&task.title, 40),
            task.priority.to_string(),
            format_due(task)
        );
    }
}

fn format_due(task: &Task) -> String {
    match task.due_date.as_deref() {
        None => "-".to_string(),
        Some(raw) => parse_backend_datetime(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
