//! cb-schema: Loads connector definitions from seed documents and validates
//! records against the JSON Schemas they declare.

pub mod convert;
pub mod definition;
pub mod loader;
pub mod validator;

pub use convert::{from_struct, to_struct};
pub use definition::Definition;
pub use loader::load_definitions;
pub use validator::SchemaValidator;
