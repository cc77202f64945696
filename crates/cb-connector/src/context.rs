//! Connector context: owns the one-time initialization of the top-level
//! connector.
//!
//! Concurrent first callers block until the build finishes and all receive
//! the same handle. A failed build leaves the context empty, so a later call
//! may retry.

use crate::dispatcher::BlockchainConnector;
use crate::options::ConnectorOptions;
use cb_core::ConnectorError;
use once_cell::sync::OnceCell;
use std::sync::Arc;

pub type ConnectorHandle = Arc<BlockchainConnector>;

#[derive(Default)]
pub struct ConnectorContext {
    connector: OnceCell<ConnectorHandle>,
}

impl ConnectorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize on first call; later calls return the existing handle and
    /// ignore `options`.
    pub fn try_init(&self, options: &ConnectorOptions) -> Result<ConnectorHandle, ConnectorError> {
        self.try_init_with(|| BlockchainConnector::new(options))
    }

    /// Like `try_init` with a caller-supplied build step.
    pub fn try_init_with<F>(&self, build: F) -> Result<ConnectorHandle, ConnectorError>
    where
        F: FnOnce() -> Result<BlockchainConnector, ConnectorError>,
    {
        self.connector
            .get_or_try_init(|| {
                build().map(Arc::new).map_err(|e| match e {
                    ConnectorError::Initialization(_) => e,
                    other => ConnectorError::Initialization(other.to_string()),
                })
            })
            .cloned()
    }

    /// Initialize or abort. For hosts where a connector that cannot load its
    /// definitions is a startup failure.
    pub fn init(&self, options: &ConnectorOptions) -> ConnectorHandle {
        match self.try_init(options) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("[Connector] initialization failed: {e}");
                panic!("connector initialization failed: {e}");
            }
        }
    }
}
