//! cb-core: Shared types for the blockchain connector workspace.
//!
//! This crate has zero internal crate dependencies and defines the
//! identifiers, state enums, record representation and error taxonomy
//! used across all other cb-* crates.

pub mod definition;
pub mod record;
pub mod state;

use definition::DefinitionUid;
use thiserror::Error;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::definition::{ConnectorType, DefinitionSpec, DefinitionUid, SchemaSet};
    pub use crate::record::Record;
    pub use crate::state::{ConnectionState, Task};
    pub use crate::ConnectorError;
}

/// Every failure the registry and execution pipeline can surface to a host.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error("definition uid already registered: {0}")]
    DuplicateUid(DefinitionUid),
    #[error("no connector definition for uid: {0}")]
    UnknownUid(DefinitionUid),
    #[error("definition not found: {0}")]
    DefinitionNotFound(String),
    #[error("schema load failed: {0}")]
    SchemaLoad(String),
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
    #[error("conversion failed: {0}")]
    Conversion(String),
    /// Upstream answered 200 but the body lacks an expected field.
    #[error("{operation} response is missing field `{field}`")]
    Protocol { operation: String, field: String },
    /// Non-200 upstream answer. The message is the raw response body.
    #[error("{0}")]
    Upstream(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("timeout after {0}ms")]
    Timeout(u64),
}

impl ConnectorError {
    pub fn missing_field(operation: &str, field: &str) -> Self {
        Self::Protocol {
            operation: operation.into(),
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_raw_body() {
        let err = ConnectorError::Upstream("rate limited".into());
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn protocol_error_names_field() {
        let err = ConnectorError::missing_field("pin", "cid");
        assert_eq!(err.to_string(), "pin response is missing field `cid`");
    }
}
