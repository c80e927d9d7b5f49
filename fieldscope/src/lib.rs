//! fieldscope: field listings from Elasticsearch index mappings
//!
//! A fields query fetches the raw `_mapping` document for one or more
//! indices, flattens the nested `properties` tree into dot-joined field
//! paths, optionally narrows them to a semantic type alias and returns
//! a two-column `name`/`type` table keyed by the caller's refID.
//!
//! ```text
//! MappingFetcher ──► extract_fields ──► transform ──► QueryResponse
//! ```
//!
//! Supported type aliases:
//! - `number` (float, double, integer, long, scaled_float)
//! - `date` (date, date_nanos)
//! - `string` (string, text)
//! - `nested`

pub mod alias;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod mapping;
pub mod query;
pub mod response;
pub mod transform;

pub use alias::{FieldTypeFilter, TypeAlias};
pub use error::{FieldsError, Result};
pub use extract::{extract_fields, is_metadata_field, FlatFieldMap, METADATA_FIELDS};
pub use fetcher::{ElasticsearchFetcher, MappingFetcher};
pub use mapping::{MappingDocument, MappingLayout, MappingNode};
pub use query::{FieldsQuery, Query, QueryRequest};
pub use response::{
    ErrorResult, IndexMappings, MappingResponse, QueryResponse, QueryResult, TableResult,
};
pub use transform::{transform, transform_with_layout};
