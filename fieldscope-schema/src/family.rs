use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// `MAJOR.MINOR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for SchemaVersion {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaError::InvalidVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(v: SchemaVersion) -> Self {
        v.to_string()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// One schema version and the file it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedSchema {
    pub version: SchemaVersion,
    pub source: PathBuf,
    pub definition: Value,
}

/// All versions of one schema package, ascending by version
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFamily {
    pub package: String,
    pub schemas: Vec<VersionedSchema>,
}

impl SchemaFamily {
    pub fn latest(&self) -> Option<&VersionedSchema> {
        self.schemas.last()
    }

    pub fn get(&self, version: SchemaVersion) -> Option<&VersionedSchema> {
        self.schemas.iter().find(|s| s.version == version)
    }

    pub fn versions(&self) -> impl Iterator<Item = SchemaVersion> + '_ {
        self.schemas.iter().map(|s| s.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("0.0".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(0, 0));
        assert_eq!("2.13".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(2, 13));
        assert!("1".parse::<SchemaVersion>().is_err());
        assert!("1.x".parse::<SchemaVersion>().is_err());
        assert!("-1.0".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(SchemaVersion::new(0, 9) < SchemaVersion::new(1, 0));
        assert!(SchemaVersion::new(1, 2) < SchemaVersion::new(1, 10));
    }

    #[test]
    fn test_version_serde_as_string() {
        let v: SchemaVersion = serde_json::from_str("\"1.2\"").unwrap();
        assert_eq!(v, SchemaVersion::new(1, 2));
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"1.2\"");
    }
}
