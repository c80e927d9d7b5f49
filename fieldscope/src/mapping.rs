//! Decoding of raw `_mapping` documents into a typed tree
//!
//! The search engine hands back an untyped JSON tree. It is decoded once,
//! up front, so that the extractor walks a closed set of node shapes and a
//! document that breaks the API contract is rejected with the offending path.

use crate::error::{FieldsError, Result};
use crate::extract::is_metadata_field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Field name → child node
pub type Properties = HashMap<String, MappingNode>;

/// One node of a mapping tree
#[derive(Debug, Clone, PartialEq)]
pub enum MappingNode {
    /// A field declaring a `"type"` and no sub-properties.
    Leaf(String),
    /// A node with sub-properties. Multi-field style nodes also carry a type.
    Object {
        field_type: Option<String>,
        properties: Properties,
    },
    /// Neither `"type"` nor `"properties"` (e.g. `{"enabled": false}`).
    Untyped,
}

impl MappingNode {
    pub fn leaf(field_type: impl Into<String>) -> Self {
        Self::Leaf(field_type.into())
    }

    pub fn object<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, MappingNode)>,
        K: Into<String>,
    {
        Self::Object {
            field_type: None,
            properties: children.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn field_type(&self) -> Option<&str> {
        match self {
            Self::Leaf(t) => Some(t),
            Self::Object { field_type, .. } => field_type.as_deref(),
            Self::Untyped => None,
        }
    }

    pub fn properties(&self) -> Option<&Properties> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Combine two declarations of the same path. `other` wins on the type,
    /// sub-properties are merged recursively.
    fn merge(self, other: MappingNode) -> MappingNode {
        let field_type = other
            .field_type()
            .or(self.field_type())
            .map(str::to_string);

        match (self, other) {
            (
                Self::Object {
                    properties: mut base,
                    ..
                },
                Self::Object {
                    properties: extra, ..
                },
            ) => {
                merge_properties(&mut base, extra);
                Self::Object {
                    field_type,
                    properties: base,
                }
            }
            (Self::Object { properties, .. }, _) | (_, Self::Object { properties, .. }) => {
                Self::Object {
                    field_type,
                    properties,
                }
            }
            _ => match field_type {
                Some(t) => Self::Leaf(t),
                None => Self::Untyped,
            },
        }
    }

    fn decode(value: &Value, path: &[&str]) -> Result<Self> {
        let obj = as_object(value, path)?;

        let field_type = match obj.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(t)) => Some(t.clone()),
            Some(other) => {
                return Err(FieldsError::malformed(
                    path,
                    format!("\"type\" must be a string, found {}", kind(other)),
                ))
            }
        };

        match obj.get("properties") {
            None | Some(Value::Null) => Ok(match field_type {
                Some(t) => Self::Leaf(t),
                None => Self::Untyped,
            }),
            Some(props) => Ok(Self::Object {
                field_type,
                properties: decode_properties(props, path)?,
            }),
        }
    }
}

/// How the per-index `mappings` object is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingLayout {
    /// `mappings.properties` (Elasticsearch 7 and later)
    #[default]
    Typeless,
    /// `mappings.<type_name>.properties` (Elasticsearch 6 and earlier)
    Typed,
}

impl MappingLayout {
    /// Pick the layout for a configured engine version such as `56`, `60` or `70`.
    pub fn for_version(es_version: u32) -> Self {
        if es_version < 70 {
            Self::Typed
        } else {
            Self::Typeless
        }
    }
}

/// Root of one index's mapping tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingDocument {
    pub properties: Properties,
}

impl MappingDocument {
    pub fn new(properties: Properties) -> Self {
        Self { properties }
    }

    /// Decode a typeless `mappings` object.
    pub fn decode(value: &Value) -> Result<Self> {
        Self::decode_with_layout(value, MappingLayout::Typeless)
    }

    pub fn decode_with_layout(value: &Value, layout: MappingLayout) -> Result<Self> {
        let root = as_object(value, &[])?;

        match layout {
            MappingLayout::Typeless => {
                let props = root
                    .get("properties")
                    .ok_or_else(|| FieldsError::malformed(&[], "missing \"properties\""))?;
                Ok(Self::new(decode_properties(props, &[])?))
            }
            MappingLayout::Typed => {
                // Types are merged field by field; on a shared path the later type name wins.
                // A type without "properties" (e.g. `_default_`) declares no fields.
                let mut properties = Properties::new();
                for (type_name, type_mapping) in root {
                    let path = [type_name.as_str()];
                    if let Some(props) = as_object(type_mapping, &path)?.get("properties") {
                        merge_properties(&mut properties, decode_properties(props, &path)?);
                    }
                }
                Ok(Self::new(properties))
            }
        }
    }
}

impl TryFrom<&Value> for MappingDocument {
    type Error = FieldsError;

    fn try_from(value: &Value) -> Result<Self> {
        Self::decode(value)
    }
}

fn merge_properties(into: &mut Properties, from: Properties) {
    for (key, node) in from {
        let merged = match into.remove(&key) {
            Some(existing) => existing.merge(node),
            None => node,
        };
        into.insert(key, merged);
    }
}

/// Reserved metadata entries are dropped here so their shape is never checked.
fn decode_properties(value: &Value, path: &[&str]) -> Result<Properties> {
    let props = value.as_object().ok_or_else(|| {
        FieldsError::malformed(
            path,
            format!("\"properties\" must be an object, found {}", kind(value)),
        )
    })?;

    let mut properties = Properties::with_capacity(props.len());
    for (key, child) in props {
        if is_metadata_field(key) {
            continue;
        }
        let mut child_path = path.to_vec();
        child_path.push(key.as_str());
        properties.insert(key.clone(), MappingNode::decode(child, &child_path)?);
    }
    Ok(properties)
}

fn as_object<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        FieldsError::malformed(path, format!("expected an object, found {}", kind(value)))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
