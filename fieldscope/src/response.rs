//! Mapping responses in, table/error results out

use crate::error::{FieldsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Column headers of every fields table
pub const TABLE_COLUMNS: [&str; 2] = ["name", "type"];

const UNKNOWN_ERROR: &str = "Unknown elasticsearch error response";

/// Index name → that index's raw `mappings` sub-document, in index-name order
pub type IndexMappings = BTreeMap<String, Value>;

/// What the Mapping Fetcher hands back: mappings or an upstream error payload
#[derive(Debug, Clone, PartialEq)]
pub enum MappingResponse {
    Mappings(IndexMappings),
    Error(Value),
}

impl MappingResponse {
    /// Classify a raw `GET /<index>/_mapping` body.
    ///
    /// A top-level `"error"` key marks an error body. Otherwise every
    /// top-level key is an index name and only its `"mappings"` is kept.
    pub fn from_value(body: Value) -> Result<Self> {
        let Value::Object(mut top) = body else {
            return Err(FieldsError::malformed(&[], "mapping response must be an object"));
        };

        if let Some(error) = top.remove("error") {
            return Ok(Self::Error(error));
        }

        let mut indices = IndexMappings::new();
        for (index, mut entry) in top {
            let mappings = entry
                .as_object_mut()
                .and_then(|e| e.remove("mappings"))
                .ok_or_else(|| {
                    FieldsError::malformed(&[index.as_str()], "index entry has no \"mappings\"")
                })?;
            indices.insert(index, mappings);
        }
        Ok(Self::Mappings(indices))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl TryFrom<Value> for MappingResponse {
    type Error = FieldsError;

    fn try_from(body: Value) -> Result<Self> {
        Self::from_value(body)
    }
}

/// Two-column `name`/`type` table, rows ordered by field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResult {
    pub ref_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<(String, String)>,
}

impl TableResult {
    pub fn new(ref_id: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, name: impl Into<String>, field_type: impl Into<String>) {
        self.rows.push((name.into(), field_type.into()));
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }
}

/// Upstream failure, forwarded in place of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub ref_id: String,
    /// Human-readable summary of `payload`
    pub message: String,
    /// The upstream error body, untouched
    pub payload: Value,
}

impl ErrorResult {
    pub fn from_payload(ref_id: impl Into<String>, payload: Value) -> Self {
        Self {
            ref_id: ref_id.into(),
            message: error_message(&payload),
            payload,
        }
    }
}

/// Prefer the first root cause, then the top-level reason.
fn error_message(payload: &Value) -> String {
    if let Value::String(message) = payload {
        return message.clone();
    }

    let root_cause = payload
        .pointer("/root_cause/0/reason")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty());
    let reason = payload
        .get("reason")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty());

    root_cause
        .or(reason)
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}

/// Outcome of one fields query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryResult {
    Table(TableResult),
    Error(ErrorResult),
}

impl QueryResult {
    pub fn ref_id(&self) -> &str {
        match self {
            Self::Table(t) => &t.ref_id,
            Self::Error(e) => &e.ref_id,
        }
    }
}

/// Results addressed by refID
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: BTreeMap<String, QueryResult>,
}

impl QueryResponse {
    pub fn single(result: QueryResult) -> Self {
        let mut results = BTreeMap::new();
        results.insert(result.ref_id().to_string(), result);
        Self { results }
    }

    pub fn get(&self, ref_id: &str) -> Option<&QueryResult> {
        self.results.get(ref_id)
    }

    pub fn table(&self, ref_id: &str) -> Option<&TableResult> {
        match self.get(ref_id)? {
            QueryResult::Table(t) => Some(t),
            QueryResult::Error(_) => None,
        }
    }

    pub fn error(&self, ref_id: &str) -> Option<&ErrorResult> {
        match self.get(ref_id)? {
            QueryResult::Error(e) => Some(e),
            QueryResult::Table(_) => None,
        }
    }
}
