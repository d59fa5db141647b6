use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use host_lca_fetch::fetch_download_links;
use host_lca_lineage::{group_records, load, reduce_all, write, GroupOrder, LcaStats};
use std::io;
use std::path::PathBuf;

use crate::config::HostLcaConfig;
use crate::report::LcaReport;

mod config;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "host-lca")]
#[command(about = "Consensus host lineages for uncultivated virus genomes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file with [table] and [fetch] sections (overrides HOST_LCA_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce candidate host lineages to one LCA lineage per UViG
    Lca(LcaArgs),

    /// List assembly download links from an MGBase download page
    Links(LinksArgs),
}

#[derive(Args)]
struct LcaArgs {
    /// Host table (UViGs, Phylum .. Species)
    input: PathBuf,

    /// Destination of the consensus table
    output: PathBuf,

    /// Order of output rows
    #[arg(long, value_enum, default_value_t = OrderArg::Sorted)]
    order: OrderArg,

    /// Text written for unresolved ranks
    #[arg(long)]
    placeholder: Option<String>,

    /// Print a JSON run summary on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LinksArgs {
    /// Download page to scan
    #[arg(long)]
    url: Option<String>,

    /// Required file-name suffix
    #[arg(long)]
    suffix: Option<String>,

    /// Print links as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// Sorted by UViG key
    Sorted,
    /// Order of first appearance in the input
    FirstSeen,
}

impl From<OrderArg> for GroupOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Sorted => Self::Sorted,
            OrderArg::FirstSeen => Self::FirstSeen,
        }
    }
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Lca(args) => args.json,
        Commands::Links(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = HostLcaConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Lca(args) => run_lca(args, config)?,
        Commands::Links(args) => run_links(args, config).await?,
    }

    Ok(())
}

fn run_lca(args: LcaArgs, config: HostLcaConfig) -> Result<()> {
    let mut format = config.table;
    if let Some(placeholder) = args.placeholder {
        format = format.with_placeholder(placeholder);
    }
    format.validate()?;
    let order = GroupOrder::from(args.order);

    let records = load(&args.input, &format)
        .with_context(|| format!("Failed to load host table {}", args.input.display()))?;
    let record_count = records.len();

    let groups = group_records(records, order);
    let consensus = reduce_all(&groups);

    write(&args.output, &consensus, &format)
        .with_context(|| format!("Failed to write LCA table {}", args.output.display()))?;

    let report = LcaReport::new(
        &args.input,
        &args.output,
        order,
        LcaStats::from_run(record_count, &consensus),
    );
    log::info!("{}", report.summary_line());

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}

async fn run_links(args: LinksArgs, config: HostLcaConfig) -> Result<()> {
    let mut fetch = config.fetch;
    if let Some(url) = args.url {
        fetch.base_url = url;
    }
    if let Some(suffix) = args.suffix {
        fetch.suffix = suffix;
    }

    let links = fetch_download_links(&fetch).await?;

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&links)?)?;
    } else if !links.is_empty() {
        print_stdout(&links.join("\n"))?;
    }
    Ok(())
}
