//! # Delver
//!
//! Interactive DNS resolver: race a pool of public resolvers (recursive
//! mode) or walk the delegation hierarchy from the roots (iterative mode).

mod bootstrap;
mod di;
mod prompt;

use clap::Parser;
use delver_domain::config::{CliOverrides, ResolveMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "delver")]
#[command(version)]
#[command(about = "DNS resolver that supports iterative and recursive queries")]
struct Cli {
    /// Resolution method: "recursive" (race the public pool, default) or
    /// "iterative" (walk from the root servers)
    #[arg(short, long)]
    method: Option<String>,

    /// Print timing, cache and path information for each query
    #[arg(short, long)]
    verbose: bool,

    /// Resolver pool file: header line skipped, first comma-delimited
    /// field of each line is an IPv4 address
    #[arg(short, long, default_value = "us.csv")]
    servers: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // an invalid mode is rejected here, before any query runs
    let mode = cli
        .method
        .as_deref()
        .map(str::parse::<ResolveMode>)
        .transpose()?;

    let config = bootstrap::config::load_config(
        cli.config.as_deref(),
        CliOverrides {
            mode,
            log_level: cli.log_level,
        },
    )?;
    bootstrap::logging::init_logging(&config);

    let orchestrator = di::build(&config, &cli.servers)?;

    prompt::run(&orchestrator, config.resolver.mode, cli.verbose).await
}
