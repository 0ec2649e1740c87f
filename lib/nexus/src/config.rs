//! Client configuration.
//!
//! Values come from the process environment when there is one, then from the
//! same variables captured at build time (the only option in the browser),
//! then from defaults.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST backend base address (default: "http://localhost:8080/api")
    pub api_url: String,
    /// Per-request timeout (default: 10s)
    pub timeout: Duration,
    /// Display name of the application (default: "Nexus")
    pub app_name: String,
    /// Application version (default: the crate version)
    pub app_version: String,
    /// Deployment environment label (default: "development")
    pub environment: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: read_var("NEXUS_API_URL", option_env!("NEXUS_API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
            app_name: read_var("NEXUS_APP_NAME", option_env!("NEXUS_APP_NAME"))
                .unwrap_or_else(|| "Nexus".to_string()),
            app_version: read_var("NEXUS_APP_VERSION", option_env!("NEXUS_APP_VERSION"))
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            environment: read_var("NEXUS_ENVIRONMENT", option_env!("NEXUS_ENVIRONMENT"))
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            app_name: "Nexus".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// First non-blank value of the runtime variable, then the build-time one.
fn read_var(name: &str, compiled: Option<&'static str>) -> Option<String> {
    let present = |v: &String| !v.trim().is_empty();
    std::env::var(name)
        .ok()
        .filter(present)
        .or_else(|| compiled.map(str::to_string).filter(present))
}
