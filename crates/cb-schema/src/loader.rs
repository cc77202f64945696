//! Seed loader: turns a vendor's definitions document into validated
//! `Definition`s.
//!
//! A seed is a JSON array of `DefinitionSpec` objects. The loader stamps the
//! vendor and connector type, derives credential fields from the connection
//! schema, and compiles every schema. Any failure rejects the whole seed.

use crate::definition::Definition;
use cb_core::definition::{ConnectorType, DefinitionSpec};
use cb_core::ConnectorError;
use std::collections::HashSet;

/// Schema keyword marking a connection property as a secret.
pub const CREDENTIAL_FIELD_KEYWORD: &str = "credential_field";

/// Load and validate all definitions of `vendor` from `seed`.
pub fn load_definitions(
    vendor: &str,
    connector_type: ConnectorType,
    seed: &str,
) -> Result<Vec<Definition>, ConnectorError> {
    let specs: Vec<DefinitionSpec> = serde_json::from_str(seed).map_err(|e| {
        ConnectorError::SchemaLoad(format!("failed to parse {vendor} definitions: {e}"))
    })?;

    if specs.is_empty() {
        return Err(ConnectorError::SchemaLoad(format!(
            "{vendor} seed declares no definitions"
        )));
    }

    let mut seen = HashSet::new();
    let mut definitions = Vec::with_capacity(specs.len());

    for mut spec in specs {
        if !seen.insert(spec.uid) {
            return Err(ConnectorError::SchemaLoad(format!(
                "{vendor} seed repeats uid {}",
                spec.uid
            )));
        }

        spec.vendor = vendor.to_string();
        spec.connector_type = connector_type;
        if spec.credential_fields.is_empty() {
            spec.credential_fields = credential_fields_of(&spec.spec.connection_specification);
        }

        tracing::debug!("[Loader] vendor='{}' id='{}' uid={}", vendor, spec.id, spec.uid);
        definitions.push(Definition::from_spec(spec)?);
    }

    Ok(definitions)
}

/// Names of top-level properties flagged with `"credential_field": true`.
fn credential_fields_of(schema: &serde_json::Value) -> Vec<String> {
    schema
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|props| {
            props
                .iter()
                .filter(|(_, prop)| {
                    prop.get(CREDENTIAL_FIELD_KEYWORD).and_then(|v| v.as_bool()) == Some(true)
                })
                .map(|(name, _)| name.clone())
                .collect()
        })
        .unwrap_or_default()
}
