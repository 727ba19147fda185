use anyhow::Result;

use crate::api::ApiClient;

pub async fn complete(api: &ApiClient, id: i64) -> Result<()> {
    let task = api.mark_completed(id).await?;
    println!("Completed task #{}: {}", task.id, task.title);
    Ok(())
}

pub async fn reopen(api: &ApiClient, id: i64) -> Result<()> {
    let task = api.mark_pending(id).await?;
    println!("Reopened task #{}: {}", task.id, task.title);
    Ok(())
}
