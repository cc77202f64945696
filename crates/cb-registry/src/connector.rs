//! Connector and Connection capability traits.
//!
//! A `Connector` owns a registry and builds connections for the uids it
//! knows. A `Connection` binds one definition to one validated config and
//! runs batches through the definition's input/output contracts.

use crate::registry::DefinitionRegistry;
use async_trait::async_trait;
use cb_core::definition::DefinitionUid;
use cb_core::record::Record;
use cb_core::state::{ConnectionState, Task};
use cb_core::ConnectorError;
use cb_schema::Definition;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Connection: Send + Sync {
    /// The definition this connection was created from.
    fn definition(&self) -> &Arc<Definition>;

    /// Connector-specific work on an already validated batch.
    /// Must return exactly one record per input record.
    async fn process(&self, inputs: Vec<Record>) -> Result<Vec<Record>, ConnectorError>;

    /// Health probe. Never fails; every failure mode maps to `Error`.
    async fn test(&self) -> ConnectionState;

    fn task(&self) -> Task {
        Task::Unspecified
    }

    /// Validate the batch, process it, then validate what came back.
    /// Nothing reaches the network when the input batch is invalid.
    async fn execute(&self, inputs: Vec<Record>) -> Result<Vec<Record>, ConnectorError> {
        let definition = self.definition().clone();
        definition.validate_inputs(&inputs)?;

        let expected = inputs.len();
        let outputs = self.process(inputs).await?;
        if outputs.len() != expected {
            return Err(ConnectorError::SchemaValidation(format!(
                "{}: produced {} output records for {expected} inputs",
                definition.id(),
                outputs.len()
            )));
        }

        definition.validate_outputs(&outputs)?;
        Ok(outputs)
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// A connection prepared for one task invocation.
pub struct Execution {
    connection: Box<dyn Connection>,
}

impl Execution {
    pub fn new(connection: Box<dyn Connection>) -> Self {
        Self { connection }
    }

    pub fn definition_uid(&self) -> DefinitionUid {
        self.connection.definition().uid()
    }

    pub fn task(&self) -> Task {
        self.connection.task()
    }

    pub async fn execute(&self, inputs: Vec<Record>) -> Result<Vec<Record>, ConnectorError> {
        self.connection.execute(inputs).await
    }
}

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Connector: Send + Sync {
    fn registry(&self) -> &DefinitionRegistry;

    /// Build a connection for `uid`. Fails with `UnknownUid` before anything
    /// is constructed when no definition matches; the config is validated
    /// against the definition's connection schema.
    fn create_connection(
        &self,
        uid: DefinitionUid,
        config: &Record,
    ) -> Result<Box<dyn Connection>, ConnectorError>;

    fn create_execution(
        &self,
        uid: DefinitionUid,
        config: &Record,
    ) -> Result<Execution, ConnectorError> {
        self.create_connection(uid, config).map(Execution::new)
    }

    /// Probe the connection `uid` + `config` would make. Never fails.
    async fn test(&self, uid: DefinitionUid, config: &Record) -> ConnectionState {
        match self.create_connection(uid, config) {
            Ok(connection) => connection.test().await,
            Err(e) => {
                tracing::warn!("[Connector] test uid={uid} rejected: {e}");
                ConnectionState::Error
            }
        }
    }

    fn has_uid(&self, uid: DefinitionUid) -> bool {
        self.registry().has_uid(uid)
    }

    fn get_definition_by_uid(
        &self,
        uid: DefinitionUid,
    ) -> Result<Arc<Definition>, ConnectorError> {
        self.registry().get_definition_by_uid(uid)
    }

    fn get_definition_by_id(&self, id: &str) -> Result<Arc<Definition>, ConnectorError> {
        self.registry().get_definition_by_id(id)
    }

    fn list_definition_uids(&self) -> Vec<DefinitionUid> {
        self.registry().list_definition_uids()
    }

    fn list_definitions(&self) -> Vec<Arc<Definition>> {
        self.registry().list_definitions()
    }

    fn list_credential_fields(&self, id: &str) -> Result<Vec<String>, ConnectorError> {
        self.registry().list_credential_fields(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::definition::{ConnectorType, DefinitionSpec, SchemaSet};
    use cb_core::record::into_record;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const UID: &str = "70d8664a-d512-4517-a5e8-5d4da81756a7";

    fn echo_definition() -> Arc<Definition> {
        let spec = DefinitionSpec {
            uid: UID.parse().unwrap(),
            id: "echo".into(),
            title: "Echo".into(),
            description: String::new(),
            vendor: "test".into(),
            connector_type: ConnectorType::Blockchain,
            documentation_url: None,
            icon: None,
            spec: SchemaSet {
                connection_specification: json!({
                    "type": "object",
                    "required": ["healthy"],
                    "properties": {"healthy": {"type": "boolean"}}
                }),
                input: json!({
                    "type": "object",
                    "required": ["text"],
                    "properties": {"text": {"type": "string"}}
                }),
                output: json!({
                    "type": "object",
                    "required": ["echo"],
                    "properties": {"echo": {"type": "string"}}
                }),
            },
            credential_fields: vec![],
        };
        Arc::new(Definition::from_spec(spec).unwrap())
    }

    /// Echoes `text`; `drop_last` simulates a buggy connector.
    struct EchoConnection {
        definition: Arc<Definition>,
        healthy: bool,
        drop_last: bool,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Connection for EchoConnection {
        fn definition(&self) -> &Arc<Definition> {
            &self.definition
        }

        async fn process(&self, inputs: Vec<Record>) -> Result<Vec<Record>, ConnectorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out: Vec<Record> = inputs
                .into_iter()
                .map(|r| into_record(json!({ "echo": r["text"] })).unwrap())
                .collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }

        async fn test(&self) -> ConnectionState {
            if self.healthy {
                ConnectionState::Connected
            } else {
                ConnectionState::Error
            }
        }
    }

    struct EchoConnector {
        registry: DefinitionRegistry,
        calls: Arc<AtomicUsize>,
    }

    impl EchoConnector {
        fn new() -> Self {
            let mut registry = DefinitionRegistry::new();
            let def = echo_definition();
            registry.add_definition(def.uid(), def.id(), def.clone()).unwrap();
            Self {
                registry,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Connector for EchoConnector {
        fn registry(&self) -> &DefinitionRegistry {
            &self.registry
        }

        fn create_connection(
            &self,
            uid: DefinitionUid,
            config: &Record,
        ) -> Result<Box<dyn Connection>, ConnectorError> {
            let definition = self
                .registry
                .get_definition_by_uid(uid)
                .map_err(|_| ConnectorError::UnknownUid(uid))?;
            definition.validate_connection(config)?;
            Ok(Box::new(EchoConnection {
                definition,
                healthy: config["healthy"].as_bool().unwrap_or(false),
                drop_last: false,
                calls: self.calls.clone(),
            }))
        }
    }

    fn config(healthy: bool) -> Record {
        into_record(json!({ "healthy": healthy })).unwrap()
    }

    #[tokio::test]
    async fn invalid_batch_never_reaches_process() {
        let connector = EchoConnector::new();
        let conn = connector.create_connection(UID.parse().unwrap(), &config(true)).unwrap();
        let inputs = vec![
            into_record(json!({"text": "a"})).unwrap(),
            into_record(json!({"text": 3})).unwrap(),
        ];
        let err = conn.execute(inputs).await.unwrap_err();
        assert!(matches!(err, ConnectorError::SchemaValidation(_)));
        assert_eq!(connector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn short_output_batch_is_rejected() {
        let conn = EchoConnection {
            definition: echo_definition(),
            healthy: true,
            drop_last: true,
            calls: Arc::new(AtomicUsize::new(0)),
        };
        let inputs = vec![into_record(json!({"text": "a"})).unwrap()];
        let err = conn.execute(inputs).await.unwrap_err();
        assert!(err.to_string().contains("produced 0 output records for 1 inputs"));
    }

    #[tokio::test]
    async fn execution_runs_connection() {
        let connector = EchoConnector::new();
        let execution = connector
            .create_execution(UID.parse().unwrap(), &config(true))
            .unwrap();
        assert_eq!(execution.task(), Task::Unspecified);
        assert_eq!(execution.definition_uid().to_string(), UID);
        let out = execution
            .execute(vec![into_record(json!({"text": "hi"})).unwrap()])
            .await
            .unwrap();
        assert_eq!(out[0]["echo"], "hi");
    }

    #[tokio::test]
    async fn test_degrades_to_error_state() {
        let connector = EchoConnector::new();
        let uid: DefinitionUid = UID.parse().unwrap();
        assert_eq!(connector.test(uid, &config(true)).await, ConnectionState::Connected);
        assert_eq!(connector.test(uid, &config(false)).await, ConnectionState::Error);
        // Invalid config and unknown uid both surface as a state, not an error.
        assert_eq!(connector.test(uid, &Record::new()).await, ConnectionState::Error);
        let unknown: DefinitionUid = "0a3d6b8c-1f3e-4d55-9d7b-2a8f0c4e6b11".parse().unwrap();
        assert_eq!(connector.test(unknown, &config(true)).await, ConnectionState::Error);
    }
}
