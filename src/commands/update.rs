use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::commands::create::parse_due_arg;
use crate::models::{Priority, TaskRequest};

/// The backend's `PUT` expects the full task payload, so unchanged
/// fields are carried over from the current server copy.
pub async fn run(
    api: &ApiClient,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
    priority: Option<&str>,
    due: Option<&str>,
) -> Result<()> {
    if title.is_none() && description.is_none() && priority.is_none() && due.is_none() {
        bail!("Nothing to update. Use --title, --description, --priority, or --due");
    }

    let priority: Option<Priority> = match priority {
        Some(p) => match p.parse() {
            Ok(p) => Some(p),
            Err(e) => bail!("{}", e),
        },
        None => None,
    };
    let due_date = due.map(parse_due_arg).transpose()?;

    let current = api.get_task(id).await?;
    let request = TaskRequest {
        title: title.map(|t| t.to_string()).unwrap_or(current.title),
        description: description
            .map(|d| d.to_string())
            .unwrap_or(current.description),
        priority: priority.unwrap_or(current.priority),
        due_date: due_date.or(current.due_date),
        ai_roadmap: current.ai_roadmap,
    };

    let updated = api.update_task(id, &request).await?;
    println!("Updated task #{}", updated.id);
    Ok(())
}
