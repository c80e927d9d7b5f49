pub mod fields;
pub mod schema;
pub mod transform;

use fieldscope::config::Config;
use fieldscope::{MappingLayout, Query, QueryRequest};

/// Flags shared by the commands that build a fields table
#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Type alias to keep: number, string, date or nested
    #[arg(short = 't', long = "type")]
    pub field_type: Option<String>,

    /// refID to address the result by
    #[arg(long)]
    pub ref_id: Option<String>,

    /// Engine version (e.g. 56, 60, 70); below 70 mappings are per type
    #[arg(long)]
    pub es_version: Option<u32>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl QueryArgs {
    pub fn request(&self, config: &Config) -> QueryRequest {
        let ref_id = self
            .ref_id
            .clone()
            .unwrap_or_else(|| config.query.ref_id.clone());
        let filter = self
            .field_type
            .clone()
            .unwrap_or_else(|| config.query.field_type_filter.clone());

        QueryRequest::single(Query::new(ref_id).with_field_type_filter(filter))
    }

    pub fn layout(&self, config: &Config) -> MappingLayout {
        MappingLayout::for_version(self.es_version.unwrap_or(config.elasticsearch.es_version))
    }
}
