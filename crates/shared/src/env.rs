use std::env;
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub struct AppEnv {
  /// Fallback key for requests that do not carry their own.
  pub huggingface_api_key: Option<String>,
  pub huggingface_base_url: String,
  pub huggingface_timeout: Duration,
  pub bind_addr: String,
}

fn non_empty(key: &str) -> Option<String> {
  env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppEnv {
  fn new() -> Self {
    let timeout_secs = match non_empty("HUGGINGFACE_TIMEOUT_SECS") {
      Some(raw) => raw.parse().unwrap_or_else(|_| {
        tracing::warn!(value = %raw, "invalid HUGGINGFACE_TIMEOUT_SECS, using default");
        DEFAULT_TIMEOUT_SECS
      }),
      None => DEFAULT_TIMEOUT_SECS,
    };

    Self {
      huggingface_api_key: non_empty("HUGGINGFACE_API_KEY"),
      huggingface_base_url: non_empty("HUGGINGFACE_BASE_URL")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
      huggingface_timeout: Duration::from_secs(timeout_secs),
      bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
    }
  }
}

/// Read once on first access, so `.env` must be loaded before that.
pub static APP_ENV: LazyLock<AppEnv> = LazyLock::new(AppEnv::new);
