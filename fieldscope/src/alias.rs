use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse semantic category grouping several concrete field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeAlias {
    Number,
    String,
    Date,
    Nested,
}

impl TypeAlias {
    pub const ALL: [TypeAlias; 4] = [Self::Number, Self::String, Self::Date, Self::Nested];

    /// Alias of a concrete engine type, if it has one.
    pub fn of(field_type: &str) -> Option<Self> {
        match field_type {
            "float" | "double" | "integer" | "long" | "scaled_float" => Some(Self::Number),
            "date" | "date_nanos" => Some(Self::Date),
            "string" | "text" => Some(Self::String),
            "nested" => Some(Self::Nested),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for TypeAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown type alias '{0}'")]
pub struct UnknownAlias(pub String);

impl FromStr for TypeAlias {
    type Err = UnknownAlias;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alias| alias.as_str() == s)
            .ok_or_else(|| UnknownAlias(s.to_string()))
    }
}

/// The caller's `fieldTypeFilter`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldTypeFilter {
    /// Absent or empty: every field is kept.
    #[default]
    Any,
    Alias(TypeAlias),
    /// A name that is not an alias. Matches no field type.
    Unrecognised(String),
}

impl FieldTypeFilter {
    pub fn parse(filter: &str) -> Self {
        if filter.is_empty() {
            return Self::Any;
        }
        match filter.parse() {
            Ok(alias) => Self::Alias(alias),
            Err(UnknownAlias(name)) => Self::Unrecognised(name),
        }
    }

    /// Does a field of concrete type `field_type` survive this filter?
    pub fn matches(&self, field_type: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Alias(alias) => TypeAlias::of(field_type) == Some(*alias),
            Self::Unrecognised(_) => false,
        }
    }
}

impl From<Option<TypeAlias>> for FieldTypeFilter {
    fn from(alias: Option<TypeAlias>) -> Self {
        alias.map_or(Self::Any, Self::Alias)
    }
}

impl fmt::Display for FieldTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => Ok(()),
            Self::Alias(alias) => write!(f, "{}", alias),
            Self::Unrecognised(name) => f.write_str(name),
        }
    }
}
