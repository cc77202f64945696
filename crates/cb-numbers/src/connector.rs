//! Numbers connector: owns the Numbers definitions and builds connections.

use crate::client::ProvenanceClient;
use crate::connection::NumbersConnection;
use crate::input::ConnectionConfig;
use crate::options::NumbersOptions;
use async_trait::async_trait;
use cb_core::definition::{ConnectorType, DefinitionUid};
use cb_core::record::Record;
use cb_core::ConnectorError;
use cb_registry::{Connection, Connector, DefinitionRegistry};
use cb_schema::{load_definitions, to_struct};
use std::sync::Arc;

pub const VENDOR_NAME: &str = "numbers";

const DEFINITIONS_JSON: &str = include_str!("../config/seed/definitions.json");

pub struct NumbersConnector {
    registry: DefinitionRegistry,
    client: Arc<ProvenanceClient>,
}

impl NumbersConnector {
    /// Load the embedded definitions and build the shared HTTP client.
    pub fn new(options: NumbersOptions) -> Result<Self, ConnectorError> {
        let definitions =
            load_definitions(VENDOR_NAME, ConnectorType::Blockchain, DEFINITIONS_JSON)
                .map_err(|e| ConnectorError::Initialization(format!("{VENDOR_NAME}: {e}")))?;

        let mut registry = DefinitionRegistry::new();
        for definition in definitions {
            let definition = Arc::new(definition);
            registry
                .add_definition(definition.uid(), definition.id(), definition.clone())
                .map_err(|e| ConnectorError::Initialization(format!("{VENDOR_NAME}: {e}")))?;
        }

        let client = Arc::new(ProvenanceClient::new(options)?);
        tracing::info!(
            "[Numbers] Loaded {} definition(s) from embedded seed",
            registry.len()
        );
        Ok(Self { registry, client })
    }
}

#[async_trait]
impl Connector for NumbersConnector {
    fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    fn create_connection(
        &self,
        uid: DefinitionUid,
        config: &Record,
    ) -> Result<Box<dyn Connection>, ConnectorError> {
        if !self.registry.has_uid(uid) {
            return Err(ConnectorError::UnknownUid(uid));
        }
        let definition = self.registry.get_definition_by_uid(uid)?;
        definition.validate_connection(config)?;
        let config: ConnectionConfig = to_struct(config)?;

        Ok(Box::new(NumbersConnection::new(
            definition,
            config,
            self.client.clone(),
        )))
    }
}
