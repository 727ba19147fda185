use std::io::{self, Write};

use anyhow::Result;

use crate::api::ApiClient;

pub async fn run(api: &ApiClient, id: i64, force: bool) -> Result<()> {
    // Fetch first so the confirmation can show the title.
    let task = api.get_task(id).await?;

    if !force {
        print!("Delete task #{} \"{}\"? [y/N] ", task.id, task.title);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    api.delete_task(id).await?;
    println!("Deleted task #{}", id);
    Ok(())
}
