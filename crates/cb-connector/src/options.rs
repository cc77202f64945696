//! Options for every vendor connector, fixed at context initialization.

use cb_core::ConnectorError;
use cb_numbers::NumbersOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectorOptions {
    pub numbers: NumbersOptions,
}

impl ConnectorOptions {
    pub fn from_env() -> Self {
        Self {
            numbers: NumbersOptions::from_env(),
        }
    }

    /// Read options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConnectorError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConnectorError::Initialization(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ConnectorError::Initialization(format!("invalid options in {}: {e}", path.display()))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        self.numbers.request_timeout()
    }
}
