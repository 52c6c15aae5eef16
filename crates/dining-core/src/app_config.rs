use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.dineoncampus.com/";
pub const DEFAULT_SITE_ID: &str = "5751fd3790975b60e04893f2";
pub const DEFAULT_TENANT: &str = "utdallasdining";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub site_id: String,
    pub tenant: String,
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl AppConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Public "hours of operation" page for the configured tenant.
    #[must_use]
    pub fn hours_page_url(&self) -> String {
        format!("https://dineoncampus.com/{}/hours-of-operation", self.tenant)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_id: DEFAULT_SITE_ID.to_string(),
            tenant: DEFAULT_TENANT.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_secs: 30,
            user_agent: "dining/0.1 (campus-status)".to_string(),
            log_level: "warn".to_string(),
        }
    }
}
