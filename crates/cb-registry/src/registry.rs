//! Definition Registry: stores and looks up validated connector definitions.
//!
//! Populated once while its owning connector is built, then only read.
//! Lookups take `&self`, so a registry shared behind an `Arc` needs no lock.

use cb_core::definition::DefinitionUid;
use cb_core::ConnectorError;
use cb_schema::Definition;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory definition registry, ordered by insertion.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    by_uid: IndexMap<DefinitionUid, Arc<Definition>>,
    uid_by_id: HashMap<String, DefinitionUid>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Rejects a uid that is already present.
    pub fn add_definition(
        &mut self,
        uid: DefinitionUid,
        id: &str,
        definition: Arc<Definition>,
    ) -> Result<(), ConnectorError> {
        if self.by_uid.contains_key(&uid) {
            return Err(ConnectorError::DuplicateUid(uid));
        }
        self.by_uid.insert(uid, definition);
        self.uid_by_id.insert(id.to_string(), uid);
        Ok(())
    }

    pub fn has_uid(&self, uid: DefinitionUid) -> bool {
        self.by_uid.contains_key(&uid)
    }

    pub fn get_definition_by_uid(
        &self,
        uid: DefinitionUid,
    ) -> Result<Arc<Definition>, ConnectorError> {
        self.by_uid
            .get(&uid)
            .cloned()
            .ok_or_else(|| ConnectorError::DefinitionNotFound(uid.to_string()))
    }

    /// Look up a definition by its human-readable id.
    pub fn get_definition_by_id(&self, id: &str) -> Result<Arc<Definition>, ConnectorError> {
        self.uid_by_id
            .get(id)
            .and_then(|uid| self.by_uid.get(uid))
            .cloned()
            .ok_or_else(|| ConnectorError::DefinitionNotFound(id.to_string()))
    }

    /// Uids in insertion order.
    pub fn list_definition_uids(&self) -> Vec<DefinitionUid> {
        self.by_uid.keys().copied().collect()
    }

    pub fn list_definitions(&self) -> Vec<Arc<Definition>> {
        self.by_uid.values().cloned().collect()
    }

    pub fn list_credential_fields(&self, id: &str) -> Result<Vec<String>, ConnectorError> {
        self.get_definition_by_id(id)
            .map(|def| def.credential_fields().to_vec())
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }
}
