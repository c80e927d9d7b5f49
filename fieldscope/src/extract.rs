//! Field extraction: nested mapping tree → flat `path → type` map

use crate::mapping::{MappingDocument, Properties};
use std::collections::HashMap;

/// Fully-qualified (dot-joined) field name → declared type. Unordered.
pub type FlatFieldMap = HashMap<String, String>;

/// Identity and document metadata fields. Custom fields may start with an
/// underscore too, so only these exact names are excluded.
pub const METADATA_FIELDS: [&str; 9] = [
    "_index",
    "_type",
    "_id",
    "_source",
    "_size",
    "_field_names",
    "_ignored",
    "_routing",
    "_meta",
];

/// `true` if `field_name` is a reserved metadata field (case-sensitive).
pub fn is_metadata_field(field_name: &str) -> bool {
    METADATA_FIELDS.contains(&field_name)
}

/// Flatten every typed, non-metadata field of `doc`.
pub fn extract_fields(doc: &MappingDocument) -> FlatFieldMap {
    extract_properties(&doc.properties, &[])
}

/// Walk `properties` below the ancestor segments in `path`.
///
/// A node with both a type and sub-properties contributes an entry for
/// itself and for every typed descendant. If the same path is reached
/// twice the later entry overwrites the earlier one.
pub fn extract_properties(properties: &Properties, path: &[&str]) -> FlatFieldMap {
    let mut fields = FlatFieldMap::new();

    for (key, node) in properties {
        if is_metadata_field(key) {
            continue;
        }

        let mut field_path = path.to_vec();
        field_path.push(key.as_str());

        if let Some(field_type) = node.field_type() {
            fields.insert(field_path.join("."), field_type.to_string());
        }

        if let Some(children) = node.properties() {
            fields.extend(extract_properties(children, &field_path));
        }
    }

    fields
}
