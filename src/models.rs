use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel token the backend returns from `register` when the account
/// still needs its emailed verification code confirmed.
pub const VERIFICATION_REQUIRED: &str = "VERIFICATION_REQUIRED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const VALID: [&'static str; 3] = ["high", "medium", "low"];
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!(
                "invalid priority '{}', must be one of: {}",
                other,
                Priority::VALID.join(", ")
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Completed => "COMPLETED",
        };
        write!(f, "{}", s)
    }
}

/// A task as the backend reports it.
///
/// Timestamps stay as raw strings: the Java backend renders
/// `LocalDateTime` without a zone offset, so eager chrono deserialization
/// would reject otherwise valid payloads. Parse lazily with
/// [`parse_backend_datetime`] where a real instant is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub ai_roadmap: Option<String>,
}

/// Create/update payload for `POST /api/tasks` and `PUT /api/tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_roadmap: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    pub verification_code: String,
}

/// Auth endpoints all answer with this shape; absent fields are omitted
/// by the backend depending on the path taken.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Whether registration requires the email verification step.
    pub fn needs_verification(&self) -> bool {
        self.token.as_deref() == Some(VERIFICATION_REQUIRED)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResponse {
    pub roadmap: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub estimated_duration: Option<String>,
}

/// Payload for `POST /api/tasks/send-reminder`. The due date is the
/// human-readable form that ends up in the email body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub task_id: i64,
    pub task_title: String,
    pub task_description: String,
    pub due_date: String,
    pub hours_until_due: i64,
}

impl ReminderRequest {
    pub fn for_task(task: &Task, hours_until_due: i64) -> Self {
        let raw = task.due_date.as_deref().unwrap_or_default();
        let due_date = parse_backend_datetime(raw)
            .map(format_reminder_datetime)
            .unwrap_or_else(|| raw.to_string());

        ReminderRequest {
            task_id: task.id,
            task_title: task.title.clone(),
            task_description: task.description.clone(),
            due_date,
            hours_until_due,
        }
    }
}

/// Parse a backend timestamp into a UTC instant.
///
/// Accepts RFC 3339, a zoneless `LocalDateTime` rendering
/// (`2024-05-01T09:30:00`, optional fractional seconds), and a bare date.
/// Zoneless values are taken as UTC. Returns `None` for anything else.
pub fn parse_backend_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Format an instant the way reminder emails display it,
/// e.g. `May 1, 2024, 09:30 AM`.
pub fn format_reminder_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn task_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "title": "Write report",
            "description": "Quarterly numbers",
            "priority": "HIGH",
            "status": "PENDING",
            "dueDate": "2024-05-01T09:30:00",
            "createdAt": "2024-04-28T08:00:00",
            "updatedAt": "2024-04-28T08:00:00",
            "userId": 3,
            "reminderSent": false,
            "aiRoadmap": "1. Gather data"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.due_date.as_deref(), Some("2024-05-01T09:30:00"));
        assert!(!task.reminder_sent);
        assert_eq!(task.ai_roadmap.as_deref(), Some("1. Gather data"));
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 1,
            "title": "Bare task",
            "priority": "LOW",
            "status": "COMPLETED"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.due_date.is_none());
        assert!(!task.reminder_sent);
        assert!(task.description.is_empty());
    }

    #[test]
    fn task_tolerates_garbage_due_date() {
        let json = r#"{
            "id": 2,
            "title": "Odd date",
            "priority": "MEDIUM",
            "status": "PENDING",
            "dueDate": "not-a-date"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_date.as_deref(), Some("not-a-date"));
        assert!(parse_backend_datetime(task.due_date.as_deref().unwrap()).is_none());
    }

    #[test]
    fn task_request_skips_absent_options() {
        let req = TaskRequest {
            title: "T".into(),
            description: "D".into(),
            priority: Priority::Medium,
            due_date: None,
            ai_roadmap: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("dueDate").is_none());
        assert!(value.get("aiRoadmap").is_none());
        assert_eq!(value["priority"], "MEDIUM");
    }

    #[test]
    fn reminder_request_serializes_camel_case() {
        let req = ReminderRequest {
            task_id: 4,
            task_title: "T".into(),
            task_description: "D".into(),
            due_date: "May 1, 2024, 09:30 AM".into(),
            hours_until_due: 3,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["taskId"], 4);
        assert_eq!(value["hoursUntilDue"], 3);
        assert_eq!(value["dueDate"], "May 1, 2024, 09:30 AM");
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn parse_rfc3339() {
        let dt = parse_backend_datetime("2024-05-01T09:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn parse_zoneless_local_datetime() {
        let dt = parse_backend_datetime("2024-05-01T09:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());

        let with_fraction = parse_backend_datetime("2024-05-01T09:30:00.125").unwrap();
        assert_eq!(with_fraction.timestamp_millis().rem_euclid(1000), 125);
    }

    #[test]
    fn parse_bare_date_is_midnight() {
        let dt = parse_backend_datetime("2024-05-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_garbage_is_none() {
        assert!(parse_backend_datetime("").is_none());
        assert!(parse_backend_datetime("tomorrow").is_none());
        assert!(parse_backend_datetime("2024-13-99T00:00:00").is_none());
    }

    #[test]
    fn reminder_datetime_format_matches_email_style() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 15, 4, 0).unwrap();
        assert_eq!(format_reminder_datetime(dt), "May 1, 2024, 03:04 PM");
    }

    #[test]
    fn verification_required_sentinel_detected() {
        let resp = AuthResponse {
            token: Some(VERIFICATION_REQUIRED.to_string()),
            id: None,
            username: None,
            email: None,
            message: None,
        };
        assert!(resp.needs_verification());
    }
}
