//! HTTP client for the peer services.
//!
//! The vote service resolves voter and poll references by fetching the
//! complete list from each peer and scanning it; this module only does the
//! fetching. No caching, no retries beyond reqwest defaults.

use models::{Poll, Voter};

use crate::CoreError;

#[derive(Clone, Debug)]
pub struct PeerClient {
    http: reqwest::Client,
    voter_base: String,
    poll_base: String,
}

impl PeerClient {
    pub fn new(voter_base: impl Into<String>, poll_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            voter_base: trim_base(voter_base.into()),
            poll_base: trim_base(poll_base.into()),
        }
    }

    /// Fetch the full voter list from the voter service.
    pub async fn fetch_voters(&self) -> Result<Vec<Voter>, CoreError> {
        let url = format!("{}/voters", self.voter_base);
        fetch_list(&self.http, &url).await
    }

    /// Fetch the full poll list from the poll service.
    pub async fn fetch_polls(&self) -> Result<Vec<Poll>, CoreError> {
        let url = format!("{}/polls", self.poll_base);
        fetch_list(&self.http, &url).await
    }
}

async fn fetch_list<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
) -> Result<Vec<T>, CoreError> {
    let resp = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| CoreError::Network(e.to_string()))?;
    resp.json::<Vec<T>>()
        .await
        .map_err(|e| CoreError::Parse(e.to_string()))
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}
