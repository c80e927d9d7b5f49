//! Fields query: one fetch, one extraction, one table per request

use crate::error::{FieldsError, Result};
use crate::fetcher::MappingFetcher;
use crate::mapping::MappingLayout;
use crate::response::{ErrorResult, QueryResponse, QueryResult};
use crate::transform::transform_with_layout;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model property holding the optional type alias
pub const FIELD_TYPE_FILTER: &str = "fieldTypeFilter";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub ref_id: String,
    #[serde(default)]
    pub model: Value,
}

impl Query {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            model: Value::Object(Default::default()),
        }
    }

    pub fn with_field_type_filter(mut self, filter: impl Into<String>) -> Self {
        let mut model = match self.model {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        model.insert(FIELD_TYPE_FILTER.to_string(), Value::String(filter.into()));
        self.model = Value::Object(model);
        self
    }

    /// The `fieldTypeFilter` model property; absent or non-string means no filter.
    pub fn field_type_filter(&self) -> &str {
        self.model
            .get(FIELD_TYPE_FILTER)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub queries: Vec<Query>,
}

impl QueryRequest {
    pub fn single(query: Query) -> Self {
        Self {
            queries: vec![query],
        }
    }
}

pub struct FieldsQuery<F> {
    fetcher: F,
    request: QueryRequest,
    layout: MappingLayout,
}

impl<F: MappingFetcher> FieldsQuery<F> {
    pub fn new(fetcher: F, request: QueryRequest) -> Self {
        Self {
            fetcher,
            request,
            layout: MappingLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: MappingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Run the first query of the request.
    ///
    /// Failing to reach the backend is reported as an error result for the
    /// query's refID. Only a malformed mapping document is returned as `Err`.
    pub async fn execute(&self) -> Result<QueryResponse> {
        tracing::info!(source = self.fetcher.source_name(), "Executing fields query");

        let query = self
            .request
            .queries
            .first()
            .ok_or_else(|| FieldsError::InvalidQuery("request contains no queries".to_string()))?;

        let mapping = match self.fetcher.get_index_mapping().await {
            Ok(mapping) => mapping,
            Err(e) if e.is_malformed() => return Err(e),
            Err(e) => {
                tracing::warn!(ref_id = %query.ref_id, "Failed to fetch index mapping: {}", e);
                let error = ErrorResult::from_payload(&query.ref_id, Value::String(e.to_string()));
                return Ok(QueryResponse::single(QueryResult::Error(error)));
            }
        };

        transform_with_layout(
            &mapping,
            query.field_type_filter(),
            &query.ref_id,
            self.layout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::MappingResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        response: MappingResponse,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MappingFetcher for CountingFetcher {
        async fn get_index_mapping(&self) -> Result<MappingResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        fn source_name(&self) -> &str {
            "counting"
        }
    }

    struct UnreachableFetcher;

    #[async_trait]
    impl MappingFetcher for UnreachableFetcher {
        async fn get_index_mapping(&self) -> Result<MappingResponse> {
            Err(FieldsError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }

        fn source_name(&self) -> &str {
            "unreachable"
        }
    }

    struct MalformedFetcher;

    #[async_trait]
    impl MappingFetcher for MalformedFetcher {
        async fn get_index_mapping(&self) -> Result<MappingResponse> {
            MappingResponse::from_value(json!({ "logs": { "settings": {} } }))
        }

        fn source_name(&self) -> &str {
            "malformed"
        }
    }

    fn mapping() -> MappingResponse {
        MappingResponse::from_value(json!({
            "logs": { "mappings": { "properties": {
                "@timestamp": { "type": "date" },
                "bytes": { "type": "long" }
            } } }
        }))
        .unwrap()
    }

    #[test]
    fn test_field_type_filter_from_model() {
        assert_eq!(Query::new("A").field_type_filter(), "");
        assert_eq!(
            Query::new("A").with_field_type_filter("number").field_type_filter(),
            "number"
        );

        let query: Query =
            serde_json::from_value(json!({ "refId": "A", "model": { "fieldTypeFilter": 3 } }))
                .unwrap();
        assert_eq!(query.field_type_filter(), "");

        let query: Query = serde_json::from_value(json!({ "refId": "B" })).unwrap();
        assert_eq!(query.ref_id, "B");
        assert_eq!(query.field_type_filter(), "");
    }

    #[tokio::test]
    async fn test_execute_fetches_once() {
        let fetcher = CountingFetcher {
            response: mapping(),
            calls: AtomicUsize::new(0),
        };
        let query = FieldsQuery::new(
            fetcher,
            QueryRequest::single(Query::new("A").with_field_type_filter("date")),
        );

        let response = query.execute().await.unwrap();
        assert_eq!(query.fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            response.table("A").unwrap().rows,
            vec![("@timestamp".to_string(), "date".to_string())]
        );
    }

    #[tokio::test]
    async fn test_execute_uses_first_query_only() {
        let request = QueryRequest {
            queries: vec![Query::new("A"), Query::new("B")],
        };
        let response = FieldsQuery::new(mapping(), request).execute().await.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.table("A").unwrap().rows.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_error_result() {
        let response = FieldsQuery::new(UnreachableFetcher, QueryRequest::single(Query::new("C")))
            .execute()
            .await
            .unwrap();

        let error = response.error("C").unwrap();
        assert_eq!(error.message, "IO error: connection refused");
        assert!(response.table("C").is_none());
    }

    #[tokio::test]
    async fn test_malformed_fetch_is_an_error() {
        let err = FieldsQuery::new(MalformedFetcher, QueryRequest::single(Query::new("A")))
            .execute()
            .await
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_empty_request_is_invalid() {
        let err = FieldsQuery::new(mapping(), QueryRequest::default())
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, FieldsError::InvalidQuery(_)));
    }
}
