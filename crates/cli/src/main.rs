//! DNS filter decision-engine CLI.
//!
//! No wire-format parsing or network transport (out of scope); this binary
//! loads filter sources and runs `CheckHost`/`CheckHostRules` against
//! already-decoded queries supplied on the command line.

mod bootstrap;
mod di;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dnsfilter_application::FilterCoordinator;
use dnsfilter_domain::{FilterSource, ProtectionFlags, QType, Settings};

#[derive(Parser)]
#[command(name = "dnsfilter")]
#[command(version)]
#[command(about = "DNS request/response filter decision engine")]
struct Cli {
    /// Block-list source file (adblock/hosts-hybrid syntax)
    #[arg(long)]
    block_list: Vec<PathBuf>,

    /// Allow-list source file
    #[arg(long)]
    allow_list: Vec<PathBuf>,

    /// Hostname to check
    #[arg(long)]
    host: String,

    /// Query type
    #[arg(long, value_enum, default_value = "a")]
    qtype: CliQType,

    /// Client identifier recorded in per-query settings
    #[arg(long, default_value = "cli")]
    client_name: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, clap::ValueEnum)]
enum CliQType {
    A,
    Aaaa,
    Cname,
    Other,
}

impl From<CliQType> for QType {
    fn from(value: CliQType) -> Self {
        match value {
            CliQType::A => QType::A,
            CliQType::Aaaa => QType::Aaaa,
            CliQType::Cname => QType::Cname,
            CliQType::Other => QType::Other,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bootstrap::init_logging(&cli.log_level);

    let coordinator = di::build_coordinator(Vec::new(), ProtectionFlags::default());
    coordinator.start();

    let block: Vec<FilterSource> = cli
        .block_list
        .iter()
        .enumerate()
        .map(|(i, path)| FilterSource::from_file(i as i32 + 1, path.clone()))
        .collect();
    let allow: Vec<FilterSource> = cli
        .allow_list
        .iter()
        .enumerate()
        .map(|(i, path)| FilterSource::from_file(-(i as i32) - 100, path.clone()))
        .collect();

    coordinator.set_filters(block, allow, false).await?;

    let result = run_check(&coordinator, &cli).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    coordinator.close();
    Ok(())
}

async fn run_check(
    coordinator: &Arc<FilterCoordinator>,
    cli: &Cli,
) -> anyhow::Result<dnsfilter_domain::MatchResult> {
    let settings = Settings::new(cli.client_name.clone(), ProtectionFlags::default());
    let result = coordinator
        .check_host(&cli.host, cli.qtype.clone().into(), &settings)
        .await?;
    Ok(result)
}
