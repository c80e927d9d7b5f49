use crate::builder::{FamilyBuilder, LineageBuilder};
use crate::error::{Result, SchemaError};
use crate::family::{SchemaFamily, SchemaVersion, VersionedSchema};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Where to look for a package's schema files
#[derive(Debug, Clone)]
pub struct BaseLoadPaths {
    pub base_dir: PathBuf,
    pub dist_plugin_dir: PathBuf,
    pub instance_dir: PathBuf,
    pub package_name: String,
}

impl BaseLoadPaths {
    /// Use one directory for all three roots.
    pub fn single(root: impl AsRef<Path>, package_name: impl Into<String>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            base_dir: root.clone(),
            dist_plugin_dir: root.clone(),
            instance_dir: root,
            package_name: package_name.into(),
        }
    }

    /// Package directories in precedence order (lowest first).
    fn package_dirs(&self) -> [PathBuf; 3] {
        [
            self.base_dir.join(&self.package_name),
            self.dist_plugin_dir.join(&self.package_name),
            self.instance_dir.join(&self.package_name),
        ]
    }
}

/// On-disk shape of one schema file
#[derive(Debug, Deserialize)]
struct SchemaFile {
    version: SchemaVersion,
    schema: Value,
}

pub struct BaseSchemaLoader<B = LineageBuilder> {
    builder: B,
}

impl Default for BaseSchemaLoader<LineageBuilder> {
    fn default() -> Self {
        Self::new(LineageBuilder)
    }
}

impl<B: FamilyBuilder> BaseSchemaLoader<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    /// Gather the package's schemas from every root and build the family.
    ///
    /// Later roots override earlier ones for the same version.
    pub fn load_base(&self, paths: &BaseLoadPaths) -> Result<SchemaFamily> {
        let mut by_version: BTreeMap<SchemaVersion, VersionedSchema> = BTreeMap::new();

        for dir in paths.package_dirs() {
            if !dir.is_dir() {
                continue;
            }
            for schema in load_dir(&dir)? {
                by_version.insert(schema.version, schema);
            }
        }

        if by_version.is_empty() {
            return Err(SchemaError::FamilyNotFound(paths.package_name.clone()));
        }

        tracing::info!(
            package = %paths.package_name,
            versions = by_version.len(),
            "Loaded schema family"
        );

        self.builder.build(SchemaFamily {
            package: paths.package_name.clone(),
            schemas: by_version.into_values().collect(),
        })
    }
}

fn load_dir(dir: &Path) -> Result<Vec<VersionedSchema>> {
    let mut schemas = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        let is_schema = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SCHEMA_EXTENSIONS.contains(&e));
        if !is_schema || !path.is_file() {
            continue;
        }

        schemas.push(load_file(&path)?);
    }

    Ok(schemas)
}

fn load_file(path: &Path) -> Result<VersionedSchema> {
    let content = fs::read_to_string(path)?;
    // YAML is a superset of JSON, so one parser covers every extension.
    let file: SchemaFile = serde_yaml::from_str(&content).map_err(|source| SchemaError::Yaml {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(path = %path.display(), version = %file.version, "Read schema file");
    Ok(VersionedSchema {
        version: file.version,
        source: path.to_path_buf(),
        definition: file.schema,
    })
}
