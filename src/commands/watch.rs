use std::time::Duration;

use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::reminder::ReminderPoller;

pub async fn run(api: ApiClient, interval_secs: u64) -> Result<()> {
    if !api.has_token() {
        bail!("Not logged in. Run 'taskpro login' first.");
    }
    if interval_secs == 0 {
        bail!("Interval must be at least 1 second");
    }

    println!(
        "Watching for tasks due within 24 hours (checking every {}s). Ctrl-C to stop.",
        interval_secs
    );

    ReminderPoller::new(api, Duration::from_secs(interval_secs))
        .run()
        .await
}
