//! Runtime configuration resolved once at startup.

/// Which customer screen the session lands on. The hosted deployment opens
/// on the marketing home page; the internal build drops straight into the
/// quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Landing {
    #[default]
    Home,
    Quiz,
}

/// Feature switches that used to distinguish the two app variants. A
/// disabled capability hides its control and makes the corresponding events
/// no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    /// Show the churn-risk column on the admin dashboard.
    pub risk_label: bool,
    /// Offer the CSV export control on the admin dashboard.
    pub export: bool,
    /// Offer welcome-email generation on the result screen.
    pub email_assistant: bool,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash.
    pub api_base: String,
    pub landing: Landing,
    pub capabilities: Capabilities,
}

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

impl AppConfig {
    pub fn new(api_base: impl Into<String>, landing: Landing, capabilities: Capabilities) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self {
            api_base,
            landing,
            capabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes_from_base_url() {
        let config = AppConfig::new(
            "http://localhost:8000//",
            Landing::Home,
            Capabilities::default(),
        );
        assert_eq!(config.api_base, "http://localhost:8000");
    }
}
