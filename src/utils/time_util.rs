use std::time::Duration;

use chrono::Local;

const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub struct TimeUtil {}

impl TimeUtil {
    #[inline(always)]
    pub async fn sleep_millis(millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    /// Timestamp used to suffix per-run artifacts (error log, region file).
    #[inline(always)]
    pub fn now_timestamp_str() -> String {
        Local::now().format(RUN_TIMESTAMP_FORMAT).to_string()
    }
}
