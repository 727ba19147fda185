//! Due-date reminder poller.
//!
//! On a fixed interval, fetches the pending-task list and, for every task
//! due within the next 24 hours that the server has not already reminded,
//! prints a terminal notification and asks the backend to send the
//! reminder email. Poll and send failures are logged and the loop keeps
//! going; Ctrl-C stops it.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiResult};
use crate::models::{parse_backend_datetime, ReminderRequest, Task};

/// Reminder window: due within the next 24 hours.
const WINDOW_MS: i64 = 24 * 60 * 60 * 1000;
const HOUR_MS: i64 = 60 * 60 * 1000;

/// Whole hours until the deadline, rounded up and never below 1.
pub fn hours_until_due(time_difference_ms: i64) -> i64 {
    ((time_difference_ms + HOUR_MS - 1) / HOUR_MS).max(1)
}

/// Hours until due when `task` should be reminded at `now`, else `None`.
///
/// A task qualifies only when the server has not flagged it as reminded,
/// its due date parses, and the deadline lies strictly in `(now, now+24h]`.
/// Overdue tasks never qualify. An unparseable due date logs a warning and
/// skips the task.
pub fn due_within_window(task: &Task, now: DateTime<Utc>) -> Option<i64> {
    let raw = task.due_date.as_deref()?;
    if task.reminder_sent {
        return None;
    }

    let Some(due) = parse_backend_datetime(raw) else {
        warn!(task_id = task.id, title = %task.title, due_date = raw, "invalid due date on task");
        return None;
    };

    let diff = due.signed_duration_since(now).num_milliseconds();
    if diff > 0 && diff <= WINDOW_MS {
        Some(hours_until_due(diff))
    } else {
        None
    }
}

pub struct ReminderPoller {
    client: ApiClient,
    interval: Duration,
    /// Task ids already notified this session. Weaker than the server's
    /// `reminderSent` flag, which stays authoritative across sessions.
    sent: HashSet<i64>,
}

impl ReminderPoller {
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        ReminderPoller {
            client,
            interval,
            sent: HashSet::new(),
        }
    }

    /// One poll cycle: fetch pending tasks and fire any due reminders.
    /// Returns how many reminders fired.
    pub async fn tick(&mut self) -> ApiResult<usize> {
        let tasks = self.client.pending_tasks().await?;
        Ok(self.remind_due(tasks, Utc::now()).await)
    }

    async fn remind_due(&mut self, tasks: Vec<Task>, now: DateTime<Utc>) -> usize {
        let mut fired = 0;

        for task in tasks {
            if self.sent.contains(&task.id) {
                continue;
            }
            let Some(hours) = due_within_window(&task, now) else {
                continue;
            };

            println!(
                "Task Due Soon!  \"{}\" is due in {} hour(s)",
                task.title, hours
            );
            self.sent.insert(task.id);
            fired += 1;

            let request = ReminderRequest::for_task(&task, hours);
            match self.client.send_reminder(&request).await {
                Ok(()) => info!(task_id = task.id, title = %task.title, "email reminder sent"),
                Err(e) => error!(task_id = task.id, error = %e, "failed to send email reminder"),
            }
        }

        fired
    }

    /// Poll until Ctrl-C. Errors are logged; the interval keeps running.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.tick().await {
                        error!(error = %e, "reminder poll failed");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("Stopped watching.");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskStatus};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn task(id: i64, due_date: Option<&str>, reminder_sent: bool) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: String::new(),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            due_date: due_date.map(|s| s.to_string()),
            created_at: None,
            updated_at: None,
            user_id: None,
            reminder_sent,
            ai_roadmap: None,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    // ==================== Unit Tests ====================

    #[test]
    fn due_in_two_hours_reminds() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-01T12:00:00"), false);
        assert_eq!(due_within_window(&t, now), Some(2));
    }

    #[test]
    fn due_exactly_24h_out_reminds() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-02T10:00:00"), false);
        assert_eq!(due_within_window(&t, now), Some(24));
    }

    #[test]
    fn due_just_past_24h_does_not_remind() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-02T10:00:01"), false);
        assert_eq!(due_within_window(&t, now), None);
    }

    #[test]
    fn due_now_does_not_remind() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-01T10:00:00"), false);
        assert_eq!(due_within_window(&t, now), None);
    }

    #[test]
    fn overdue_never_reminds() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-01T08:00:00"), false);
        assert_eq!(due_within_window(&t, now), None);
    }

    #[test]
    fn server_reminded_task_is_skipped() {
        let now = at(10, 0);
        let t = task(1, Some("2024-05-01T12:00:00"), true);
        assert_eq!(due_within_window(&t, now), None);
    }

    #[test]
    fn missing_due_date_is_skipped() {
        let t = task(1, None, false);
        assert_eq!(due_within_window(&t, at(10, 0)), None);
    }

    #[test]
    fn unparseable_due_date_is_skipped_without_panic() {
        let t = task(1, Some("next thursday"), false);
        assert_eq!(due_within_window(&t, at(10, 0)), None);
    }

    #[test]
    fn partial_hour_rounds_up() {
        let now = at(10, 0);
        // 90 minutes out -> 2 hours.
        let t = task(1, Some("2024-05-01T11:30:00"), false);
        assert_eq!(due_within_window(&t, now), Some(2));
    }

    #[test]
    fn hours_until_due_clamps_to_one() {
        assert_eq!(hours_until_due(1), 1);
        assert_eq!(hours_until_due(30_000), 1);
        assert_eq!(hours_until_due(HOUR_MS), 1);
        assert_eq!(hours_until_due(HOUR_MS + 1), 2);
    }

    // ==================== Property-Based Tests ====================

    proptest! {
        #[test]
        fn prop_hours_matches_ceiling(ms in 1i64..=WINDOW_MS) {
            let hours = hours_until_due(ms);
            prop_assert!(hours >= 1);
            prop_assert!(hours <= 24);
            // ceil(ms / 1h), clamped below at 1.
            let expected = ((ms as f64) / (HOUR_MS as f64)).ceil().max(1.0) as i64;
            prop_assert_eq!(hours, expected);
        }

        #[test]
        fn prop_window_boundaries(offset_secs in -100_000i64..200_000) {
            let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
            let due = now + chrono::Duration::seconds(offset_secs);
            let t = task(1, Some(&due.format("%Y-%m-%dT%H:%M:%S").to_string()), false);

            let in_window = offset_secs > 0 && offset_secs <= 24 * 3600;
            prop_assert_eq!(due_within_window(&t, now).is_some(), in_window);
        }

        #[test]
        fn prop_server_flag_always_wins(offset_secs in 1i64..(24 * 3600)) {
            let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
            let due = now + chrono::Duration::seconds(offset_secs);
            let t = task(1, Some(&due.format("%Y-%m-%dT%H:%M:%S").to_string()), true);
            prop_assert_eq!(due_within_window(&t, now), None);
        }
    }
}
