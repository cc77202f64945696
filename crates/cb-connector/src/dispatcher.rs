//! Top-level blockchain connector. Merges the definitions of every vendor
//! connector and routes each request to the connector that owns the uid.

use crate::options::ConnectorOptions;
use async_trait::async_trait;
use cb_core::definition::DefinitionUid;
use cb_core::record::Record;
use cb_core::state::ConnectionState;
use cb_core::ConnectorError;
use cb_numbers::NumbersConnector;
use cb_registry::{Connection, Connector, DefinitionRegistry};

pub struct BlockchainConnector {
    registry: DefinitionRegistry,
    connectors: Vec<Box<dyn Connector>>,
}

impl BlockchainConnector {
    /// Build every vendor connector this workspace ships.
    pub fn new(options: &ConnectorOptions) -> Result<Self, ConnectorError> {
        let numbers = NumbersConnector::new(options.numbers.clone())?;
        Ok(Self::from_connectors(vec![Box::new(numbers)]))
    }

    /// Merge the registries of `connectors`. A uid already claimed by an
    /// earlier connector is skipped with a warning and stays routed there.
    pub fn from_connectors(connectors: Vec<Box<dyn Connector>>) -> Self {
        let mut registry = DefinitionRegistry::new();
        for connector in &connectors {
            for definition in connector.list_definitions() {
                let uid = definition.uid();
                let id = definition.id().to_string();
                if let Err(e) = registry.add_definition(uid, &id, definition) {
                    tracing::warn!("[Connector] skipping definition '{id}': {e}");
                }
            }
        }
        tracing::info!(
            "[Connector] {} definition(s) from {} vendor connector(s)",
            registry.len(),
            connectors.len()
        );
        Self {
            registry,
            connectors,
        }
    }

    fn route(&self, uid: DefinitionUid) -> Option<&dyn Connector> {
        self.connectors
            .iter()
            .find(|connector| connector.has_uid(uid))
            .map(|connector| connector.as_ref())
    }
}

#[async_trait]
impl Connector for BlockchainConnector {
    fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    fn create_connection(
        &self,
        uid: DefinitionUid,
        config: &Record,
    ) -> Result<Box<dyn Connection>, ConnectorError> {
        match self.route(uid) {
            Some(connector) => connector.create_connection(uid, config),
            None => Err(ConnectorError::UnknownUid(uid)),
        }
    }

    async fn test(&self, uid: DefinitionUid, config: &Record) -> ConnectionState {
        match self.route(uid) {
            Some(connector) => connector.test(uid, config).await,
            None => {
                tracing::warn!("[Connector] test for unknown uid {uid}");
                ConnectionState::Error
            }
        }
    }
}
