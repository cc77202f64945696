//! Connector definition descriptors as they appear in a seed document.

use crate::ConnectorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// DefinitionUid
// ---------------------------------------------------------------------------

/// Stable, opaque identifier of a registered definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionUid(pub Uuid);

impl FromStr for DefinitionUid {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ConnectorError::SchemaLoad(format!("invalid definition uid '{s}': {e}")))
    }
}

impl fmt::Display for DefinitionUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Connector type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorType {
    #[default]
    Unspecified,
    Blockchain,
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::Blockchain => "blockchain",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// DefinitionSpec
// ---------------------------------------------------------------------------

/// Raw definition record. Schemas are carried as JSON Schema documents;
/// compilation happens in the schema loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub uid: DefinitionUid,

    /// Human-readable slug, e.g. "blockchain-numbers".
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Filled in by the loader from the vendor it was asked to load.
    #[serde(default)]
    pub vendor: String,

    #[serde(default)]
    pub connector_type: ConnectorType,

    #[serde(default)]
    pub documentation_url: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    pub spec: SchemaSet,

    /// Connection-config fields that hold secrets.
    #[serde(default)]
    pub credential_fields: Vec<String>,
}

/// The three contracts of a definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSet {
    /// Shape of the per-connection configuration object.
    pub connection_specification: serde_json::Value,
    /// Shape of one input record.
    pub input: serde_json::Value,
    /// Shape of one output record.
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_parses_and_displays() {
        let uid: DefinitionUid = "70d8664a-d512-4517-a5e8-5d4da81756a7".parse().unwrap();
        assert_eq!(uid.to_string(), "70d8664a-d512-4517-a5e8-5d4da81756a7");
    }

    #[test]
    fn bad_uid_is_a_load_error() {
        let err = "not-a-uuid".parse::<DefinitionUid>().unwrap_err();
        assert!(matches!(err, ConnectorError::SchemaLoad(_)));
    }

    #[test]
    fn spec_defaults_optional_fields() {
        let json = serde_json::json!({
            "uid": "70d8664a-d512-4517-a5e8-5d4da81756a7",
            "id": "blockchain-numbers",
            "title": "Numbers Protocol",
            "spec": {
                "connection_specification": {"type": "object"},
                "input": {"type": "object"},
                "output": {"type": "object"}
            }
        });
        let spec: DefinitionSpec = serde_json::from_value(json).unwrap();
        assert_eq!(spec.connector_type, ConnectorType::Unspecified);
        assert!(spec.credential_fields.is_empty());
    }
}
