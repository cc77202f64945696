//! Numbers connection: pin each image, then commit its provenance.

use crate::client::{PinnedAsset, ProvenanceClient};
use crate::commit::{Commit, CommitCustom};
use crate::input::{ConnectionConfig, ProvenanceInput, ProvenanceOutput};
use crate::media::{decode_image, detect_encoding_format};
use async_trait::async_trait;
use cb_core::record::Record;
use cb_core::state::ConnectionState;
use cb_core::ConnectorError;
use cb_registry::Connection;
use cb_schema::{from_struct, to_struct, Definition};
use std::sync::Arc;

pub struct NumbersConnection {
    definition: Arc<Definition>,
    config: ConnectionConfig,
    client: Arc<ProvenanceClient>,
}

/// A record whose images are already decoded.
struct PreparedRecord {
    input: ProvenanceInput,
    images: Vec<Vec<u8>>,
}

impl NumbersConnection {
    pub fn new(
        definition: Arc<Definition>,
        config: ConnectionConfig,
        client: Arc<ProvenanceClient>,
    ) -> Self {
        Self {
            definition,
            config,
            client,
        }
    }

    /// Decode every image of every record up front so a malformed payload
    /// fails the batch before anything is uploaded.
    fn prepare(inputs: &[Record]) -> Result<Vec<PreparedRecord>, ConnectorError> {
        inputs
            .iter()
            .map(|record| {
                let input: ProvenanceInput = to_struct(record)?;
                let images = input
                    .images
                    .iter()
                    .map(|encoded| decode_image(encoded))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PreparedRecord { input, images })
            })
            .collect()
    }

    /// Pin then commit each image in order. Stops at the first failure.
    async fn register(&self, record: &PreparedRecord) -> Result<ProvenanceOutput, ConnectorError> {
        let token = self.config.token_for(record.input.capture_token.as_deref());
        let mut output = ProvenanceOutput::default();

        for data in &record.images {
            let pinned = self.client.pin(data, token).await?;
            let commit = self.commit_for(&record.input, &pinned, detect_encoding_format(data), token);
            let receipt = self.client.commit(&commit, token).await?;

            output.asset_urls.push(self.client.asset_url(&receipt.asset_cid));
            output.asset_cids.push(receipt.asset_cid);
        }
        Ok(output)
    }

    fn commit_for(
        &self,
        input: &ProvenanceInput,
        pinned: &PinnedAsset,
        encoding_format: String,
        token: &str,
    ) -> Commit {
        let asset_creator = input
            .asset_creator
            .as_ref()
            .or(self.config.asset_creator.as_ref())
            .cloned()
            .unwrap_or_default();
        let abstract_text = input
            .abstract_text
            .as_ref()
            .or(self.config.abstract_text.as_ref())
            .cloned()
            .unwrap_or_default();

        Commit {
            capture_token: token.to_string(),
            asset_cid: pinned.cid.clone(),
            asset_sha256: pinned.sha256.clone(),
            encoding_format,
            asset_timestamp_created: chrono::Utc::now().timestamp(),
            asset_creator,
            abstract_text,
            custom: CommitCustom::from_input(
                input,
                &self.config,
                &self.client.options().generated_through,
            ),
            testnet: self.config.testnet,
        }
    }
}

#[async_trait]
impl Connection for NumbersConnection {
    fn definition(&self) -> &Arc<Definition> {
        &self.definition
    }

    async fn process(&self, inputs: Vec<Record>) -> Result<Vec<Record>, ConnectorError> {
        let prepared = Self::prepare(&inputs)?;
        let mut outputs = Vec::with_capacity(prepared.len());

        for (index, record) in prepared.iter().enumerate() {
            let output = self.register(record).await.map_err(|e| {
                tracing::warn!("[Numbers] record {index} failed: {e}");
                e
            })?;
            tracing::info!(
                "[Numbers] record {index}: registered {} asset(s)",
                output.asset_cids.len()
            );
            outputs.push(from_struct(&output)?);
        }
        Ok(outputs)
    }

    async fn test(&self) -> ConnectionState {
        self.client.probe_identity(&self.config.capture_token).await
    }
}
