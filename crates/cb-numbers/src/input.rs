//! Typed views of the records flowing through the Numbers connection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Connection configuration
// ---------------------------------------------------------------------------

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub capture_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_creator: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Copy the record's `texts` into the commit's custom block.
    #[serde(default)]
    pub metadata_texts: bool,
    /// Copy the record's `structured_data` into the commit's custom block.
    #[serde(default)]
    pub metadata_structured_data: bool,
    /// Copy the record's `metadata` into the commit's custom block.
    #[serde(default)]
    pub metadata_metadata: bool,
    #[serde(default)]
    pub testnet: bool,
}

impl ConnectionConfig {
    /// An explicit non-empty record token wins over the configured one.
    pub fn token_for<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .filter(|token| !token.is_empty())
            .unwrap_or(&self.capture_token)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("capture_token", &"<redacted>")
            .field("asset_creator", &self.asset_creator)
            .field("abstract_text", &self.abstract_text)
            .field("metadata_texts", &self.metadata_texts)
            .field("metadata_structured_data", &self.metadata_structured_data)
            .field("metadata_metadata", &self.metadata_metadata)
            .field("testnet", &self.testnet)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Input / output records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvenanceInput {
    pub images: Vec<String>,
    #[serde(default)]
    pub capture_token: Option<String>,
    #[serde(default)]
    pub asset_creator: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub custom: CustomInput,
    #[serde(default)]
    pub texts: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub structured_data: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomInput {
    #[serde(default)]
    pub digital_source_type: Option<String>,
    #[serde(default)]
    pub mining_preference: Option<String>,
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub creator_wallet: Option<String>,
    #[serde(default)]
    pub license: LicenseInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
}

/// One output record per input record, one entry per image, in image order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceOutput {
    pub asset_urls: Vec<String>,
    pub asset_cids: Vec<String>,
}
