//! Raw `_mapping` response → fields table
//!
//! The table has the following structure:
//!
//! ```text
//! |-----------|-----------|
//! | name      | type      |
//! |-----------|-----------|
//! | fieldName | fieldType |
//! |-----------|-----------|
//! ```

use crate::alias::FieldTypeFilter;
use crate::error::Result;
use crate::extract::{extract_fields, FlatFieldMap};
use crate::mapping::{MappingDocument, MappingLayout};
use crate::response::{
    ErrorResult, IndexMappings, MappingResponse, QueryResponse, QueryResult, TableResult,
};

/// Build the fields table for `ref_id`, keeping only fields whose type maps
/// to `field_type_filter` (empty keeps everything).
pub fn transform(
    response: &MappingResponse,
    field_type_filter: &str,
    ref_id: &str,
) -> Result<QueryResponse> {
    transform_with_layout(response, field_type_filter, ref_id, MappingLayout::Typeless)
}

pub fn transform_with_layout(
    response: &MappingResponse,
    field_type_filter: &str,
    ref_id: &str,
    layout: MappingLayout,
) -> Result<QueryResponse> {
    let indices = match response {
        MappingResponse::Mappings(indices) => indices,
        MappingResponse::Error(payload) => {
            let error = ErrorResult::from_payload(ref_id, payload.clone());
            tracing::warn!(ref_id, "Mapping request failed: {}", error.message);
            return Ok(QueryResponse::single(QueryResult::Error(error)));
        }
    };

    let fields = extract_indices(indices, layout)?;
    let filter = FieldTypeFilter::parse(field_type_filter);
    let table = tabulate(fields, &filter, ref_id);

    tracing::debug!(
        ref_id,
        filter = %filter,
        rows = table.rows.len(),
        "Built fields table"
    );
    Ok(QueryResponse::single(QueryResult::Table(table)))
}

/// Flatten every index in name order.
///
/// Indices are not reconciled: when two indices declare the same field path
/// the later index's type is the one reported.
fn extract_indices(indices: &IndexMappings, layout: MappingLayout) -> Result<FlatFieldMap> {
    let mut fields = FlatFieldMap::new();
    for (index, mappings) in indices {
        let doc = MappingDocument::decode_with_layout(mappings, layout)?;
        let extracted = extract_fields(&doc);
        tracing::debug!(index = %index, fields = extracted.len(), "Extracted index fields");
        fields.extend(extracted);
    }
    Ok(fields)
}

/// Filter, sort by field name (byte order) and lay out as rows.
pub(crate) fn tabulate(fields: FlatFieldMap, filter: &FieldTypeFilter, ref_id: &str) -> TableResult {
    let mut rows: Vec<(String, String)> = fields
        .into_iter()
        .filter(|(_, field_type)| filter.matches(field_type))
        .collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut table = TableResult::new(ref_id);
    table.rows = rows;
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldsError;
    use serde_json::json;

    fn response(body: serde_json::Value) -> MappingResponse {
        MappingResponse::from_value(body).unwrap()
    }

    fn rows(result: &QueryResponse, ref_id: &str) -> Vec<(String, String)> {
        result.table(ref_id).expect("table result").rows.clone()
    }

    fn row(name: &str, field_type: &str) -> (String, String) {
        (name.to_string(), field_type.to_string())
    }

    fn sample() -> MappingResponse {
        response(json!({
            "metrics-2024": {
                "mappings": {
                    "properties": {
                        "_id": { "type": "keyword" },
                        "host": { "type": "text" },
                        "metrics": { "properties": { "cpu": { "type": "float" } } }
                    }
                }
            }
        }))
    }

    #[test]
    fn test_number_filter() {
        let result = transform(&sample(), "number", "A").unwrap();
        assert_eq!(rows(&result, "A"), vec![row("metrics.cpu", "float")]);
    }

    #[test]
    fn test_string_filter() {
        let result = transform(&sample(), "string", "A").unwrap();
        assert_eq!(rows(&result, "A"), vec![row("host", "text")]);
    }

    #[test]
    fn test_empty_filter_sorted() {
        let result = transform(&sample(), "", "A").unwrap();
        let table = result.table("A").unwrap();
        assert_eq!(table.columns, vec!["name", "type"]);
        assert_eq!(
            table.rows,
            vec![row("host", "text"), row("metrics.cpu", "float")]
        );
    }

    #[test]
    fn test_no_match_is_empty_table() {
        let result = transform(&sample(), "nested", "A").unwrap();
        assert!(rows(&result, "A").is_empty());

        let result = transform(&sample(), "keyword", "A").unwrap();
        assert!(rows(&result, "A").is_empty());
    }

    #[test]
    fn test_error_payload_short_circuits() {
        let result = transform(
            &MappingResponse::Error(json!("index_not_found_exception")),
            "",
            "A",
        )
        .unwrap();

        assert_eq!(result.results.len(), 1);
        assert!(result.table("A").is_none());
        let error = result.error("A").unwrap();
        assert_eq!(error.ref_id, "A");
        assert_eq!(error.message, "index_not_found_exception");
    }

    #[test]
    fn test_byte_order_sorting() {
        let result = transform(
            &response(json!({
                "i": { "mappings": { "properties": {
                    "b": { "type": "long" },
                    "B": { "type": "long" },
                    "a.b": { "type": "long" },
                    "a": { "properties": { "a": { "type": "long" } } },
                    "_x": { "type": "long" }
                } } }
            })),
            "",
            "A",
        )
        .unwrap();

        let names: Vec<_> = result.table("A").unwrap().field_names().map(String::from).collect();
        assert_eq!(names, vec!["B", "_x", "a.a", "a.b", "b"]);
    }

    #[test]
    fn test_multiple_indices_later_index_wins() {
        let result = transform(
            &response(json!({
                "logs-b": { "mappings": { "properties": {
                    "status": { "type": "keyword" },
                    "bytes": { "type": "long" }
                } } },
                "logs-a": { "mappings": { "properties": {
                    "status": { "type": "integer" },
                    "message": { "type": "text" }
                } } }
            })),
            "",
            "A",
        )
        .unwrap();

        assert_eq!(
            rows(&result, "A"),
            vec![
                row("bytes", "long"),
                row("message", "text"),
                row("status", "keyword"),
            ]
        );
    }

    #[test]
    fn test_malformed_mapping_is_an_error() {
        let err = transform(
            &response(json!({ "i": { "mappings": { "properties": { "x": "text" } } } })),
            "",
            "A",
        )
        .unwrap_err();
        assert!(matches!(err, FieldsError::MalformedMapping { .. }));
    }

    #[test]
    fn test_typed_layout_keeps_fields_from_every_type() {
        let result = transform_with_layout(
            &response(json!({
                "places": { "mappings": {
                    "a_type": { "properties": {
                        "geo": { "properties": { "country": { "type": "keyword" } } }
                    } },
                    "b_type": { "properties": {
                        "geo": { "properties": { "city": { "type": "text" } } }
                    } }
                } }
            })),
            "",
            "A",
            MappingLayout::Typed,
        )
        .unwrap();

        assert_eq!(
            rows(&result, "A"),
            vec![row("geo.city", "text"), row("geo.country", "keyword")]
        );
    }

    #[test]
    fn test_typed_layout() {
        let result = transform_with_layout(
            &response(json!({
                "legacy": { "mappings": { "doc": { "properties": {
                    "@timestamp": { "type": "date" },
                    "count": { "type": "integer" }
                } } } }
            })),
            "date",
            "Q",
            MappingLayout::Typed,
        )
        .unwrap();
        assert_eq!(rows(&result, "Q"), vec![row("@timestamp", "date")]);
    }
}
