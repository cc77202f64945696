//! cb-connector: Entry point hosts use to reach every blockchain connector.
//!
//! A host builds one `ConnectorContext`, initializes it once and shares the
//! resulting handle. Requests are routed to the vendor connector that owns
//! the definition uid.

pub mod context;
pub mod dispatcher;
pub mod logging;
pub mod options;

pub use context::{ConnectorContext, ConnectorHandle};
pub use dispatcher::BlockchainConnector;
pub use options::ConnectorOptions;

pub use cb_core::prelude::*;
pub use cb_registry::{Connection, Connector, Execution};
pub use cb_schema::Definition;
