use crate::error::{Result, SchemaError};
use crate::family::{SchemaFamily, SchemaVersion};

/// Turns a freshly loaded family into a validated one
pub trait FamilyBuilder: Send + Sync {
    fn build(&self, family: SchemaFamily) -> Result<SchemaFamily>;
}

impl<F> FamilyBuilder for F
where
    F: Fn(SchemaFamily) -> Result<SchemaFamily> + Send + Sync,
{
    fn build(&self, family: SchemaFamily) -> Result<SchemaFamily> {
        self(family)
    }
}

/// Checks that the family forms an unbroken version lineage.
///
/// The first version is `0.0`, majors follow each other without gaps, each
/// major starts at minor `0` and its minors are contiguous. Every schema
/// definition must be a mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineageBuilder;

impl FamilyBuilder for LineageBuilder {
    fn build(&self, family: SchemaFamily) -> Result<SchemaFamily> {
        let mut previous: Option<SchemaVersion> = None;

        for schema in &family.schemas {
            let version = schema.version;
            let expected_ok = match previous {
                None => version == SchemaVersion::new(0, 0),
                Some(prev) => {
                    let next_minor = prev
                        .minor
                        .checked_add(1)
                        .map(|minor| SchemaVersion::new(prev.major, minor));
                    let next_major = prev
                        .major
                        .checked_add(1)
                        .map(|major| SchemaVersion::new(major, 0));
                    next_minor == Some(version) || next_major == Some(version)
                }
            };
            if !expected_ok {
                return Err(SchemaError::Build(format!(
                    "{} family found but version {} breaks the lineage after {}",
                    family.package,
                    version,
                    previous.map_or_else(|| "the start".to_string(), |p| p.to_string()),
                )));
            }

            if !schema.definition.is_object() {
                return Err(SchemaError::Build(format!(
                    "{} family found but schema {} ({}) is not a mapping",
                    family.package,
                    version,
                    schema.source.display(),
                )));
            }

            previous = Some(version);
        }

        if previous.is_none() {
            return Err(SchemaError::Build(format!(
                "{} family has no schemas",
                family.package
            )));
        }

        tracing::debug!(
            package = %family.package,
            versions = family.schemas.len(),
            "Built schema family"
        );
        Ok(family)
    }
}
