use anyhow::Result;

use crate::api::ApiClient;
use crate::models::parse_backend_datetime;

pub async fn run(api: &ApiClient, id: i64) -> Result<()> {
    let task = api.get_task(id).await?;

    println!("Task #{}: {}", task.id, task.title);
    println!("Status: {}", task.status);
    println!("Priority: {}", task.priority);
    if let Some(due) = task.due_date.as_deref() {
        println!("Due: {}", render_timestamp(due));
    }
    if let Some(created) = task.created_at.as_deref() {
        println!("Created: {}", render_timestamp(created));
    }
    if let Some(updated) = task.updated_at.as_deref() {
        println!("Updated: {}", render_timestamp(updated));
    }
    if task.reminder_sent {
        println!("Reminder: email sent");
    }

    if !task.description.is_empty() {
        println!("\nDescription:");
        for line in task.description.lines() {
            println!("  {}", line);
        }
    }

    if let Some(roadmap) = task.ai_roadmap.as_deref() {
        if !roadmap.is_empty() {
            println!("\nRoadmap:");
            for line in roadmap.lines() {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

fn render_timestamp(raw: &str) -> String {
    parse_backend_datetime(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}
