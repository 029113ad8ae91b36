//! HTTP client for a running time server.

use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone)]
pub struct TimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl TimeClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn time_url(&self) -> String {
        format!("{}/time", self.base_url)
    }

    /// Fetch the stored timestamp.
    pub async fn get(&self) -> Result<Timestamp> {
        let response = self.http.get(self.time_url()).send().await?;
        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus(response.status()));
        }

        let body = response.text().await?;
        Ok(body.parse()?)
    }

    /// Overwrite the stored timestamp.
    pub async fn set(&self, timestamp: Timestamp) -> Result<()> {
        let response = self
            .http
            .post(self.time_url())
            .header(CONTENT_TYPE, "text/plain")
            .body(timestamp.to_string())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::UnexpectedStatus(response.status()));
        }

        Ok(())
    }
}
