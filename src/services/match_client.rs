use crate::models::cricket::Match;

pub const MATCHES_PATH: &str = "/api/matches";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, DNS, TLS and the like.
    #[error("http request failed for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode matches from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Reads the match collection from the dashboard API. One request per call,
/// no retries.
pub struct MatchClient {
    http: reqwest::Client,
    base_url: String,
}

impl MatchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: client,
            base_url,
        }
    }

    pub fn matches_url(&self) -> String {
        format!("{}{}", self.base_url, MATCHES_PATH)
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_matches(&self) -> Result<Vec<Match>, ClientError> {
        let url = self.matches_url();

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus { url, status });
        }

        let matches: Vec<Match> = response
            .json()
            .await
            .map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?;

        tracing::debug!("Fetched {} matches from {}", matches.len(), url);
        Ok(matches)
    }
}
