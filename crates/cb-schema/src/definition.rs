//! Validated definition: a `DefinitionSpec` with its schemas compiled.

use crate::validator::SchemaValidator;
use cb_core::definition::{ConnectorType, DefinitionSpec, DefinitionUid};
use cb_core::record::Record;
use cb_core::ConnectorError;

/// An immutable, schema-checked connector definition.
#[derive(Debug, Clone)]
pub struct Definition {
    spec: DefinitionSpec,
    connection: SchemaValidator,
    input: SchemaValidator,
    output: SchemaValidator,
}

impl Definition {
    /// Compile every schema the definition declares. Fails if any does not compile.
    pub fn from_spec(spec: DefinitionSpec) -> Result<Self, ConnectorError> {
        let label = spec.id.clone();
        let connection = SchemaValidator::compile(
            format!("{label}.connection"),
            &spec.spec.connection_specification,
        )?;
        let input = SchemaValidator::compile(format!("{label}.input"), &spec.spec.input)?;
        let output = SchemaValidator::compile(format!("{label}.output"), &spec.spec.output)?;
        Ok(Self {
            spec,
            connection,
            input,
            output,
        })
    }

    pub fn uid(&self) -> DefinitionUid {
        self.spec.uid
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn vendor(&self) -> &str {
        &self.spec.vendor
    }

    pub fn connector_type(&self) -> ConnectorType {
        self.spec.connector_type
    }

    pub fn credential_fields(&self) -> &[String] {
        &self.spec.credential_fields
    }

    /// The serializable descriptor, e.g. for listing to a host.
    pub fn spec(&self) -> &DefinitionSpec {
        &self.spec
    }

    pub fn validate_connection(&self, config: &Record) -> Result<(), ConnectorError> {
        self.connection
            .validate(&serde_json::Value::Object(config.clone()))
    }

    /// Validate a whole input batch. Reports the first offending record.
    pub fn validate_inputs(&self, inputs: &[Record]) -> Result<(), ConnectorError> {
        validate_batch(&self.input, inputs)
    }

    pub fn validate_outputs(&self, outputs: &[Record]) -> Result<(), ConnectorError> {
        validate_batch(&self.output, outputs)
    }
}

fn validate_batch(validator: &SchemaValidator, records: &[Record]) -> Result<(), ConnectorError> {
    for (index, record) in records.iter().enumerate() {
        let errors = validator.errors(&serde_json::Value::Object(record.clone()));
        if !errors.is_empty() {
            return Err(ConnectorError::SchemaValidation(format!(
                "{}[{index}]: {}",
                validator.name(),
                errors.join("; ")
            )));
        }
    }
    Ok(())
}
