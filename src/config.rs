use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.dmcloud.net/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ENV_API_KEY: &str = "DMCLOUD_API_KEY";
const ENV_BASE_URL: &str = "DMCLOUD_BASE_URL";
const ENV_AUTO_CALL: &str = "DMCLOUD_AUTO_CALL";

/// Settings injected into a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// RPC endpoint every call is posted to.
    pub base_url: String,
    /// Sent as a bearer token when set.
    pub api_key: Option<String>,
    /// Applied to every request, including download link resolution.
    pub timeout: Duration,
    /// Whether [`Client::dispatch`](crate::Client::dispatch) sends calls
    /// immediately or hands the descriptor back.
    pub auto_call: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            auto_call: true,
        }
    }
}

impl Config {
    /// Defaults overlaid with `DMCLOUD_API_KEY`, `DMCLOUD_BASE_URL` and
    /// `DMCLOUD_AUTO_CALL` (`true`/`1` or `false`/`0`) when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            config.api_key = Some(key);
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(auto_call) = std::env::var(ENV_AUTO_CALL).ok().and_then(|v| parse_bool(&v)) {
            config.auto_call = auto_call;
        }
        config
    }

    pub(crate) fn api_key_from_env() -> Option<String> {
        std::env::var(ENV_API_KEY).ok()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
