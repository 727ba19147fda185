use anyhow::Result;

use crate::api::ApiClient;
use crate::models::{RoadmapRequest, RoadmapResponse};

pub async fn run(api: &ApiClient, title: &str, description: &str, due: Option<&str>) -> Result<()> {
    let response = api
        .generate_roadmap(&RoadmapRequest {
            title: title.to_string(),
            description: description.to_string(),
            time_period: due.map(|d| format!("Due: {}", d)),
        })
        .await?;

    print(&response);
    Ok(())
}

/// Print a generated roadmap the way the backend returned it.
pub fn print(response: &RoadmapResponse) {
    println!("Roadmap:");
    for line in response.roadmap.lines() {
        println!("  {}", line);
    }

    if !response.steps.is_empty() {
        println!("\nSteps:");
        for (i, step) in response.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }

    if let Some(duration) = response.estimated_duration.as_deref() {
        println!("\nEstimated duration: {}", duration);
    }
}
