use anyhow::Result;
use fieldscope_schema::{BaseLoadPaths, BaseSchemaLoader, LineageBuilder};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Base schema root
    #[arg(long)]
    pub base_dir: PathBuf,

    /// Distributed plugin schema root (defaults to the base root)
    #[arg(long)]
    pub dist_plugin_dir: Option<PathBuf>,

    /// Per-instance schema root (defaults to the base root)
    #[arg(long)]
    pub instance_dir: Option<PathBuf>,

    /// Schema package name
    #[arg(short, long)]
    pub package: String,
}

pub fn run(args: SchemaArgs) -> Result<ExitCode> {
    let paths = BaseLoadPaths {
        dist_plugin_dir: args.dist_plugin_dir.unwrap_or_else(|| args.base_dir.clone()),
        instance_dir: args.instance_dir.unwrap_or_else(|| args.base_dir.clone()),
        base_dir: args.base_dir,
        package_name: args.package,
    };

    let family = BaseSchemaLoader::new(LineageBuilder).load_base(&paths)?;

    println!("{}", family.package);
    for schema in &family.schemas {
        println!("  {}  {}", schema.version, schema.source.display());
    }
    Ok(ExitCode::SUCCESS)
}
