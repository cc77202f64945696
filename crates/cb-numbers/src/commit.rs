//! Commit request body sent to the provenance commit endpoint.

use crate::input::{ConnectionConfig, CustomInput, ProvenanceInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DIGITAL_SOURCE_TYPE: &str = "trainedAlgorithmicMedia";
pub const DEFAULT_MINING_PREFERENCE: &str = "notAllowed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub capture_token: String,
    pub asset_cid: String,
    pub asset_sha256: String,
    pub encoding_format: String,
    /// Unix seconds at processing time.
    pub asset_timestamp_created: i64,
    pub asset_creator: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub custom: CommitCustom,
    pub testnet: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitCustom {
    pub generated_through: String,
    pub generated_by: String,
    pub creator_wallet: String,
    pub digital_source_type: String,
    pub mining_preference: String,
    pub license: CommitLicense,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitLicense {
    pub name: String,
    pub document: String,
}

impl CommitCustom {
    /// Custom block for one record. Optional record fields are copied only
    /// when the matching `metadata_*` flag is set on the connection.
    pub fn from_input(
        input: &ProvenanceInput,
        config: &ConnectionConfig,
        generated_through: &str,
    ) -> Self {
        let CustomInput {
            digital_source_type,
            mining_preference,
            generated_by,
            creator_wallet,
            license,
        } = &input.custom;

        Self {
            generated_through: generated_through.to_string(),
            generated_by: generated_by.clone().unwrap_or_default(),
            creator_wallet: creator_wallet.clone().unwrap_or_default(),
            digital_source_type: digital_source_type
                .clone()
                .unwrap_or_else(|| DEFAULT_DIGITAL_SOURCE_TYPE.to_string()),
            mining_preference: mining_preference
                .clone()
                .unwrap_or_else(|| DEFAULT_MINING_PREFERENCE.to_string()),
            license: CommitLicense {
                name: license.name.clone().unwrap_or_default(),
                document: license.document.clone().unwrap_or_default(),
            },
            texts: input.texts.clone().filter(|_| config.metadata_texts),
            metadata: input.metadata.clone().filter(|_| config.metadata_metadata),
            structured_data: input
                .structured_data
                .clone()
                .filter(|_| config.metadata_structured_data),
        }
    }
}
