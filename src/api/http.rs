//! HTTP implementation of [`Catalog`] against a SysRef server.

use super::backend::{Catalog, SearchQuery};
use super::models::{into_entries, EntryRecord};
use crate::domain::{Entry, EntryId, Result, SysrefError};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking HTTP client for the SysRef REST API.
///
/// Each worker thread shares one instance; `reqwest::blocking::Client` pools
/// connections internally.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Server root, e.g. `http://localhost:8000`. A trailing
    ///   slash is ignored.
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`SysrefError::Config`] if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SysrefError::Config(format!("Failed to create HTTP client: {e}")))?;

        tracing::info!(base_url, timeout_ms = timeout.as_millis() as u64, "HTTP catalog ready");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the server root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(SysrefError::Status(status.as_u16()));
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Catalog for HttpCatalog {
    fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>> {
        let limit = query.limit.to_string();
        let mut params = vec![("q", query.text.as_str()), ("limit", limit.as_str())];
        if let Some(category) = query.category.as_deref() {
            params.push(("category", category));
        }

        let response = self.client.get(self.url("/search")).query(&params).send()?;
        let records: Vec<EntryRecord> = Self::decode(response)?;
        into_entries(records)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Entry>> {
        let response = self
            .client
            .get(self.url("/entries"))
            .query(&[("limit", limit)])
            .send()?;
        let records: Vec<EntryRecord> = Self::decode(response)?;
        into_entries(records)
    }

    fn categories(&self) -> Result<Vec<String>> {
        let response = self.client.get(self.url("/categories")).send()?;
        Self::decode(response)
    }

    fn fetch(&self, id: EntryId) -> Result<Entry> {
        let response = self.client.get(self.url(&format!("/entries/{id}"))).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SysrefError::NotFound(id.0));
        }
        let record: EntryRecord = Self::decode(response)?;
        Entry::try_from(record)
    }

    fn delete(&self, id: EntryId) -> Result<()> {
        let response = self.client.delete(self.url(&format!("/entries/{id}"))).send()?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            // A 404 means someone else already removed it.
            Ok(())
        } else {
            Err(SysrefError::Status(status.as_u16()))
        }
    }
}
