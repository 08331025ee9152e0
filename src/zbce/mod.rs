#[cfg(test)]
mod tests;

use std::{fmt, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

// The upstream expects plain UTC datetimes, not RFC 3339.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors returned by the ZBCE telemetry client.
#[derive(Debug, Error)]
pub enum ZbceError {
    /// The request could not be sent or the connection failed.
    #[error("ZBCE request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status code.
    #[error("ZBCE API returned HTTP {0}")]
    Status(StatusCode),
    /// The response body did not match the expected shape.
    #[error("malformed ZBCE response: {0}")]
    MalformedResponse(String),
    /// The client could not be constructed.
    #[error("failed to build ZBCE HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

type Result<T> = std::result::Result<T, ZbceError>;

/// Opaque identifier of a physical sensor-bearing bin.
///
/// The upstream does not document the id type, so both numeric and string
/// ids are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(untagged)]
pub enum BinId {
    /// Numeric identifier.
    Int(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinId::Int(id) => write!(f, "{id}"),
            BinId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// One fullness reading for a bin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FullnessReading {
    /// The bin the reading belongs to.
    pub bin_id: BinId,
    /// How full the bin is, comparable across bins.
    pub fullness: f64,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

#[derive(Deserialize)]
struct BinInfo {
    id: BinId,
}

/// Client for the ZBCE telemetry API.
#[automock]
#[async_trait]
pub trait ZbceClient: Send + Sync {
    /// Lists the identifiers of all known bins.
    ///
    /// The upstream intermittently returns an empty list even when bins
    /// exist; callers are expected to retry.
    async fn list_bins(&self) -> Result<Vec<BinId>>;

    /// Fetches fullness readings for one bin within a UTC time window,
    /// in chronological order.
    async fn fullness_between(
        &self,
        bin_id: &BinId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FullnessReading>>;
}

/// Default [`ZbceClient`] backed by `reqwest`.
pub struct DefaultZbceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DefaultZbceClient {
    /// Creates a new client against the given base URL.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(ZbceError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn get_data<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self.client.get(&url).query(&[("key", &self.api_key)]).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ZbceError::Status(status));
        }

        resp.json::<Envelope<T>>()
            .await
            .map(|envelope| envelope.data)
            .map_err(|e| ZbceError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl ZbceClient for DefaultZbceClient {
    async fn list_bins(&self) -> Result<Vec<BinId>> {
        let bins: Vec<BinInfo> = self.get_data("bin-info-all", &[]).await?;
        Ok(bins.into_iter().map(|bin| bin.id).collect())
    }

    async fn fullness_between(
        &self,
        bin_id: &BinId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<FullnessReading>> {
        let query = [
            ("start_timestamp", start.format(TIMESTAMP_FORMAT).to_string()),
            ("end_timestamp", end.format(TIMESTAMP_FORMAT).to_string()),
            ("bin_id", bin_id.to_string()),
        ];

        self.get_data("fullness", &query).await
    }
}
