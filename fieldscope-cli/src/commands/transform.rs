use super::QueryArgs;
use crate::output;
use anyhow::{Context, Result};
use fieldscope::config::Config;
use fieldscope::{FieldsQuery, MappingResponse};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
pub struct TransformArgs {
    /// File holding a `GET /<index>/_mapping` response body
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub query: QueryArgs,
}

pub async fn run(args: TransformArgs, config: &Config) -> Result<ExitCode> {
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let body: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    let mapping = MappingResponse::from_value(body)?;

    let response = FieldsQuery::new(mapping, args.query.request(config))
        .with_layout(args.query.layout(config))
        .execute()
        .await?;

    print!("{}", output::render(&response, args.query.json)?);
    Ok(if output::has_errors(&response) {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
