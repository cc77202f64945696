//! cb-registry: Definition registry and the capability traits every
//! connector variant implements.

pub mod connector;
pub mod registry;

pub use connector::{Connection, Connector, Execution};
pub use registry::DefinitionRegistry;
