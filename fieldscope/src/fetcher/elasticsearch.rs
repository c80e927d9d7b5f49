use super::traits::MappingFetcher;
use crate::error::Result;
use crate::response::MappingResponse;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `GET {base_url}/{indices}/_mapping` over HTTP
pub struct ElasticsearchFetcher {
    client: reqwest::Client,
    pub base_url: url::Url,
    pub indices: Vec<String>,
}

impl ElasticsearchFetcher {
    pub fn new(base_url: url::Url, indices: Vec<String>) -> Result<Self> {
        Self::with_timeout(base_url, indices, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: url::Url,
        indices: Vec<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            indices,
        })
    }

    /// `_mapping` URL for the configured indices (all indices when none are set).
    pub fn mapping_url(&self) -> Result<url::Url> {
        let target = if self.indices.is_empty() {
            "_all".to_string()
        } else {
            self.indices.join(",")
        };

        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(&format!("{}/_mapping", target))?)
    }
}

#[async_trait]
impl MappingFetcher for ElasticsearchFetcher {
    async fn get_index_mapping(&self) -> Result<MappingResponse> {
        let url = self.mapping_url()?;
        tracing::debug!(%url, "Fetching index mapping");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(body) if status.is_success() => MappingResponse::from_value(body),
            // ES error bodies carry an "error" object; anything else is forwarded whole.
            Ok(body) => match MappingResponse::from_value(body.clone()) {
                Ok(error @ MappingResponse::Error(_)) => Ok(error),
                _ => Ok(MappingResponse::Error(body)),
            },
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => {
                let message = if text.trim().is_empty() {
                    status.to_string()
                } else {
                    text
                };
                Ok(MappingResponse::Error(Value::String(message)))
            }
        }
    }

    fn source_name(&self) -> &str {
        "elasticsearch"
    }
}
