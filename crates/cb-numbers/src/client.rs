//! HTTP client for the provenance service: pin, commit and identity probe.

use crate::commit::Commit;
use crate::media::sha256_hex;
use crate::options::NumbersOptions;
use cb_core::state::ConnectionState;
use cb_core::ConnectorError;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

/// Multipart field carrying the asset bytes.
pub const PIN_FIELD_NAME: &str = "file";
/// The service ignores the name; it only needs one.
pub const PIN_FILE_NAME: &str = "file.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedAsset {
    pub cid: String,
    /// SHA-256 of the uploaded bytes, computed locally.
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub asset_cid: String,
    pub asset_tree_cid: String,
}

#[derive(Debug, Clone)]
pub struct ProvenanceClient {
    http: reqwest::Client,
    options: NumbersOptions,
    asset_profile_url: Url,
}

impl ProvenanceClient {
    pub fn new(options: NumbersOptions) -> Result<Self, ConnectorError> {
        if options.request_timeout_secs == 0 {
            return Err(ConnectorError::Initialization(
                "request_timeout_secs must be > 0".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(options.request_timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ConnectorError::Initialization(format!("HTTP client: {e}")))?;

        let asset_profile_url =
            Url::parse(&format!("https://{}/asset-profile", options.asset_profile_host))
                .map_err(|e| {
                    ConnectorError::Initialization(format!(
                        "invalid asset profile host '{}': {e}",
                        options.asset_profile_host
                    ))
                })?;

        Ok(Self {
            http,
            options,
            asset_profile_url,
        })
    }

    pub fn options(&self) -> &NumbersOptions {
        &self.options
    }

    /// Upload raw asset bytes and return the content id the service assigned.
    pub async fn pin(&self, data: &[u8], token: &str) -> Result<PinnedAsset, ConnectorError> {
        let sha256 = sha256_hex(data);
        let form = Form::new().part(
            PIN_FIELD_NAME,
            Part::bytes(data.to_vec()).file_name(PIN_FILE_NAME),
        );

        let response = self
            .http
            .post(&self.options.pin_url)
            .header(AUTHORIZATION, authorization(token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error("pin", e))?;

        let body = self.success_body("pin", response).await?;
        let cid = required_str(&body, "pin", "cid")?;
        tracing::debug!("[Numbers] pinned {} bytes as {cid}", data.len());
        Ok(PinnedAsset { cid, sha256 })
    }

    /// Register provenance for a pinned asset.
    pub async fn commit(
        &self,
        commit: &Commit,
        token: &str,
    ) -> Result<CommitReceipt, ConnectorError> {
        let response = self
            .http
            .post(&self.options.commit_url)
            .header(AUTHORIZATION, authorization(token))
            .json(commit)
            .send()
            .await
            .map_err(|e| self.transport_error("commit", e))?;

        let body = self.success_body("commit", response).await?;
        let receipt = CommitReceipt {
            asset_cid: required_str(&body, "commit", "assetCid")?,
            asset_tree_cid: required_str(&body, "commit", "assetTreeCid")?,
        };
        tracing::debug!(
            "[Numbers] committed {} (tree {})",
            receipt.asset_cid,
            receipt.asset_tree_cid
        );
        Ok(receipt)
    }

    /// `Connected` only when the identity endpoint accepts the token.
    pub async fn probe_identity(&self, token: &str) -> ConnectionState {
        let result = self
            .http
            .get(&self.options.identity_url)
            .header(AUTHORIZATION, authorization(token))
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::OK => ConnectionState::Connected,
            Ok(response) => {
                tracing::warn!("[Numbers] identity probe returned {}", response.status());
                ConnectionState::Error
            }
            Err(e) => {
                tracing::warn!("[Numbers] identity probe failed: {e}");
                ConnectionState::Error
            }
        }
    }

    /// Public viewer link for a committed asset.
    pub fn asset_url(&self, asset_cid: &str) -> String {
        let mut url = self.asset_profile_url.clone();
        url.query_pairs_mut().clear().append_pair("cid", asset_cid);
        url.to_string()
    }

    /// Body of a 200 answer as JSON (`Null` when unparseable). Any other
    /// status becomes `Upstream` carrying the raw body.
    async fn success_body(
        &self,
        operation: &str,
        response: Response,
    ) -> Result<Value, ConnectorError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(operation, e))?;

        if status != StatusCode::OK {
            tracing::warn!("[Numbers] {operation} returned {status}");
            return Err(ConnectorError::Upstream(text));
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    fn transport_error(&self, operation: &str, e: reqwest::Error) -> ConnectorError {
        if e.is_timeout() {
            ConnectorError::Timeout(self.options.request_timeout_secs.saturating_mul(1000))
        } else {
            ConnectorError::Transport(format!("{operation} request failed: {e}"))
        }
    }
}

fn authorization(token: &str) -> String {
    format!("token {token}")
}

/// Empty strings count as missing.
fn required_str(body: &Value, operation: &str, field: &str) -> Result<String, ConnectorError> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConnectorError::missing_field(operation, field))
}
