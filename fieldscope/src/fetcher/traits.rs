use crate::response::MappingResponse;
use crate::Result;
use async_trait::async_trait;

/// Source of raw index mappings (Elasticsearch, a saved response, a test double...)
#[async_trait]
pub trait MappingFetcher: Send + Sync {
    /// Fetch the mapping document for the configured indices.
    ///
    /// An error *reported by* the backend is `Ok(MappingResponse::Error(_))`;
    /// `Err` is reserved for failing to talk to the backend at all.
    async fn get_index_mapping(&self) -> Result<MappingResponse>;

    /// Human-readable source name
    fn source_name(&self) -> &str;
}

/// A response captured earlier, e.g. read from a file
#[async_trait]
impl MappingFetcher for MappingResponse {
    async fn get_index_mapping(&self) -> Result<MappingResponse> {
        Ok(self.clone())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}
