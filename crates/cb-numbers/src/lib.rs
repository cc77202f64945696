//! cb-numbers: Numbers Protocol provenance connector.
//!
//! Each input image is pinned to the asset service, then a provenance
//! commit is registered for it. The output record carries one public
//! asset URL and one asset cid per image.

pub mod client;
pub mod commit;
pub mod connection;
pub mod connector;
pub mod input;
pub mod media;
pub mod options;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{CommitReceipt, PinnedAsset, ProvenanceClient};
pub use connection::NumbersConnection;
pub use connector::{NumbersConnector, VENDOR_NAME};
pub use input::{ConnectionConfig, ProvenanceInput, ProvenanceOutput};
pub use options::NumbersOptions;
