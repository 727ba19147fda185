use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::api::ApiClient;
use crate::models::{Priority, RoadmapRequest, TaskRequest};

/// Parse a `--due` argument. Accepts `YYYY-MM-DDTHH:MM`,
/// `YYYY-MM-DD HH:MM`, or a bare `YYYY-MM-DD` (taken as midnight).
/// Returns the backend wire form.
pub fn parse_due_arg(raw: &str) -> Result<String> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)));

    let naive = match naive {
        Ok(dt) => dt,
        Err(_) => bail!(
            "Invalid due date '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM",
            raw
        ),
    };

    if naive.and_utc() <= Utc::now() {
        bail!("Due date '{}' is in the past", raw);
    }

    Ok(naive.format("%Y-%m-%dT%H:%M:%S").to_string())
}

pub async fn run(
    api: &ApiClient,
    title: &str,
    description: Option<&str>,
    priority: &str,
    due: Option<&str>,
    with_roadmap: bool,
) -> Result<()> {
    let priority: Priority = match priority.parse() {
        Ok(p) => p,
        Err(e) => bail!("{}", e),
    };
    let description = description.unwrap_or_default().to_string();
    let due_date = due.map(parse_due_arg).transpose()?;

    let ai_roadmap = if with_roadmap {
        if description.is_empty() {
            bail!("A description is required to generate a roadmap");
        }
        let response = api
            .generate_roadmap(&RoadmapRequest {
                title: title.to_string(),
                description: description.clone(),
                time_period: due.map(|d| format!("Due: {}", d)),
            })
            .await?;
        super::roadmap::print(&response);
        Some(response.roadmap)
    } else {
        None
    };

    let task = api
        .create_task(&TaskRequest {
            title: title.to_string(),
            description,
            priority,
            due_date,
            ai_roadmap,
        })
        .await?;

    println!("Created task #{}: {}", task.id, task.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_forms() {
        assert_eq!(parse_due_arg("2099-05-01T09:30").unwrap(), "2099-05-01T09:30:00");
        assert_eq!(parse_due_arg("2099-05-01 09:30").unwrap(), "2099-05-01T09:30:00");
        assert_eq!(parse_due_arg("2099-05-01").unwrap(), "2099-05-01T00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_due_arg("soonish").unwrap_err();
        assert!(err.to_string().contains("Invalid due date"));
    }

    #[test]
    fn rejects_past_dates() {
        let err = parse_due_arg("2001-01-01T00:00").unwrap_err();
        assert!(err.to_string().contains("in the past"));
    }
}
