use super::QueryArgs;
use crate::output;
use anyhow::{Context, Result};
use fieldscope::config::Config;
use fieldscope::{ElasticsearchFetcher, FieldsQuery};
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// Elasticsearch URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Indices to inspect, comma-separated (overrides config)
    #[arg(short, long, value_delimiter = ',')]
    pub index: Vec<String>,

    #[command(flatten)]
    pub query: QueryArgs,
}

pub async fn run(args: FieldsArgs, config: &Config) -> Result<ExitCode> {
    let mut es = config.elasticsearch.clone();
    if let Some(url) = args.url {
        es.url = url;
    }
    if !args.index.is_empty() {
        es.indices = args.index;
    }

    let fetcher: ElasticsearchFetcher = es.fetcher()?;
    tracing::info!(
        url = %es.url,
        indices = %es.indices.join(","),
        "Fetching fields"
    );

    let response = FieldsQuery::new(fetcher, args.query.request(config))
        .with_layout(args.query.layout(config))
        .execute()
        .await
        .context("fields query failed")?;

    print!("{}", output::render(&response, args.query.json)?);
    Ok(if output::has_errors(&response) {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
