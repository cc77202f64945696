//! Compiled JSON Schema wrapper.

use cb_core::ConnectorError;
use jsonschema::JSONSchema;
use std::fmt;
use std::sync::Arc;

/// A named, compiled JSON Schema. Cheap to clone.
#[derive(Clone)]
pub struct SchemaValidator {
    name: String,
    compiled: Arc<JSONSchema>,
}

impl SchemaValidator {
    /// Compile `document`. `name` is used to prefix validation messages.
    pub fn compile(
        name: impl Into<String>,
        document: &serde_json::Value,
    ) -> Result<Self, ConnectorError> {
        let name = name.into();
        let compiled = JSONSchema::compile(document)
            .map_err(|e| ConnectorError::SchemaLoad(format!("{name}: invalid schema: {e}")))?;
        Ok(Self {
            name,
            compiled: Arc::new(compiled),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All violations of `instance`, one message per error. Empty when valid.
    pub fn errors(&self, instance: &serde_json::Value) -> Vec<String> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{path}: {e}")
                    }
                })
                .collect(),
        }
    }

    pub fn validate(&self, instance: &serde_json::Value) -> Result<(), ConnectorError> {
        let errors = self.errors(instance);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConnectorError::SchemaValidation(format!(
                "{}: {}",
                self.name,
                errors.join("; ")
            )))
        }
    }
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
