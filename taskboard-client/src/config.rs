/// Client configuration
///
/// Settings are layered, later sources winning:
///
/// 1. Built-in defaults
/// 2. Optional `taskboard.toml` in the working directory
/// 3. Environment variables prefixed with `TASKBOARD__` (a `.env` file is
///    loaded first if present)
///
/// # Environment Variables
///
/// - `TASKBOARD__API__BASE_URL`: Root URL of the task board API
///   (default: `http://localhost:4000`)
/// - `TASKBOARD__API__USER_AGENT`: User agent sent with every request
///   (default: `taskboard-client/<version>`)
/// - `RUST_LOG`: Log filter (default: `taskboard_client=debug`)
///
/// # Example
///
/// ```no_run
/// use taskboard_client::config::ClientConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = ClientConfig::from_env()?;
/// println!("Syncing with {}", config.api.base_url);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};

/// Default API root
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote API configuration
    pub api: ApiConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL; resource paths are appended to it
    pub base_url: String,

    /// User agent header value
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("taskboard-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ApiConfig {
    /// Creates an API configuration with the default user agent
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            user_agent: default_user_agent(),
        }
    }

    /// Joins a resource path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl ClientConfig {
    /// Loads configuration from defaults, `taskboard.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong
    /// type, or the base URL is not http(s).
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.user_agent", default_user_agent())?
            .add_source(config::File::with_name("taskboard").required(false))
            .add_source(
                config::Environment::with_prefix("TASKBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Checks values that deserialization cannot
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api.base_url must start with http:// or https://, got `{}`", url);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let api = ApiConfig::new("http://127.0.0.1:4000/");
        assert_eq!(api.endpoint("boards"), "http://127.0.0.1:4000/boards");
        assert_eq!(api.endpoint("/tasks/t1"), "http://127.0.0.1:4000/tasks/t1");
    }

    #[test]
    fn test_default_user_agent() {
        let api = ApiConfig::new(DEFAULT_BASE_URL);
        assert!(api.user_agent.starts_with("taskboard-client/"));
    }

    #[test]
    fn test_validate_rejects_non_http_urls() {
        let config = ClientConfig {
            api: ApiConfig::new("ftp://example.com"),
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            api: ApiConfig::new("https://boards.example.com/api"),
        };
        assert!(config.validate().is_ok());
    }
}
