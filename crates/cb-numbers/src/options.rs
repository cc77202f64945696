//! Numbers connector options: service endpoints and request limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_PIN_URL: &str = "https://eoqctv92ahgrcif.m.pipedream.net";
pub const DEFAULT_COMMIT_URL: &str = "https://eo883tj75azolos.m.pipedream.net";
pub const DEFAULT_IDENTITY_URL: &str = "https://api.numbersprotocol.io/api/v3/auth/users/me";
pub const DEFAULT_ASSET_PROFILE_HOST: &str = "nftsearch.site";
pub const DEFAULT_GENERATED_THROUGH: &str = "https://console.instill.tech";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fixed at connector construction; not changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NumbersOptions {
    /// Asset upload endpoint.
    pub pin_url: String,
    /// Provenance commit endpoint.
    pub commit_url: String,
    /// Authenticated identity endpoint used by health probes.
    pub identity_url: String,
    /// Host of the public asset viewer.
    pub asset_profile_host: String,
    /// Attribution written to `custom.generatedThrough`.
    pub generated_through: String,
    /// Applies to each outbound request separately.
    pub request_timeout_secs: u64,
}

impl Default for NumbersOptions {
    fn default() -> Self {
        Self {
            pin_url: DEFAULT_PIN_URL.into(),
            commit_url: DEFAULT_COMMIT_URL.into(),
            identity_url: DEFAULT_IDENTITY_URL.into(),
            asset_profile_host: DEFAULT_ASSET_PROFILE_HOST.into(),
            generated_through: DEFAULT_GENERATED_THROUGH.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl NumbersOptions {
    /// Defaults overridden by `CB_NUMBERS_*` / `CB_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, settings file...).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("CB_NUMBERS_PIN_URL") {
            self.pin_url = url;
        }
        if let Some(url) = lookup("CB_NUMBERS_COMMIT_URL") {
            self.commit_url = url;
        }
        if let Some(url) = lookup("CB_NUMBERS_IDENTITY_URL") {
            self.identity_url = url;
        }
        if let Some(host) = lookup("CB_NUMBERS_ASSET_PROFILE_HOST") {
            self.asset_profile_host = host;
        }
        if let Some(raw) = lookup("CB_REQUEST_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout_secs = secs,
                _ => tracing::warn!(
                    "Ignoring CB_REQUEST_TIMEOUT_SECS='{raw}', keeping {}s",
                    self.request_timeout_secs
                ),
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
