//! Helius indexer client.
//!
//! Both endpoints take a batch and answer with a JSON array; the checker only
//! ever sends a singleton batch and consumes the first element. No retries.

use crate::types::{MetadataRequest, ParsedTransaction, TokenMetadata, TransactionsRequest};
use crate::{Config, Error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::debug;

const TRANSACTIONS_PATH: &str = "v0/transactions";
const METADATA_PATH: &str = "v0/tokens/metadata";

/// The two indexer lookups the royalty check depends on.
pub trait IndexerApi {
    /// Fetch the parsed transaction for `signature`.
    fn parse_transaction(
        &self,
        signature: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<ParsedTransaction, Error>> + Send;

    /// Fetch token metadata for `mint`.
    fn token_metadata(
        &self,
        mint: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<TokenMetadata, Error>> + Send;
}

/// reqwest-backed Helius client.
#[derive(Debug, Clone)]
pub struct HeliusClient {
    http: reqwest::Client,
    base_url: String,
}

impl HeliusClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(&config.api_base_url)
    }

    /// POST a singleton batch and return the first record of the response.
    async fn post_batch<B, T>(&self, path: &str, api_key: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(path, "Calling indexer");

        let response = self
            .http
            .post(&url)
            .query(&[("api-key", api_key)])
            .json(body)
            .send()
            .await
            // Strip the URL so the api-key query parameter never reaches logs.
            .map_err(|e| Error::Api(format!("{path} request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!("{path} HTTP error: {status}")));
        }

        let records: Vec<T> = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("{path} parse error: {}", e.without_url())))?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| Error::UnexpectedResponse(format!("{path} returned an empty array")))
    }
}

impl IndexerApi for HeliusClient {
    async fn parse_transaction(
        &self,
        signature: &str,
        api_key: &str,
    ) -> Result<ParsedTransaction, Error> {
        let body = TransactionsRequest {
            transactions: [signature],
        };
        self.post_batch(TRANSACTIONS_PATH, api_key, &body).await
    }

    async fn token_metadata(&self, mint: &str, api_key: &str) -> Result<TokenMetadata, Error> {
        let body = MetadataRequest {
            mint_accounts: [mint],
        };
        self.post_batch(METADATA_PATH, api_key, &body).await
    }
}
