//! trustpath CLI tool
//!
//! Command-line interface for running trust-path queries with trustpath-core.
//!
//! ## Commands
//!
//! - `query`: Load trust and rating files, then report approved paths between two users
//! - `tiers`: Load trust and rating files, then summarize neighbor tier populations
//!
//! Both commands accept `--config <file.toml>` (see [`trustpath_core::config::QueryConfig`]);
//! explicit flags override values from the config file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trustpath_core::{
    config::QueryConfig,
    dataset::{filter_ratings, filter_trust_edges, load_ratings, load_trust_edges},
    session::{QueryReport, TrustNetwork, TrustQuery, DEFAULT_THRESHOLD},
    TrustPathError,
};

/// Reports with fewer approved paths than this list the paths themselves.
const PATH_LISTING_LIMIT: usize = 5;

#[derive(Parser)]
#[command(name = "trustpath")]
#[command(author, version, about = "Discover and rank trust-propagation paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trust edge file (truster trustee per line)
    #[arg(long)]
    trust: Option<PathBuf>,

    /// Rating file (user item topic [...] per line)
    #[arg(long)]
    ratings: Option<PathBuf>,

    /// Keep only this many ratings after sorting by topic
    #[arg(long)]
    rating_limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and approve trust paths from a source user to a sink user
    Query {
        #[command(flatten)]
        data: DataArgs,

        /// Source (truster) user id
        #[arg(long)]
        source: Option<u64>,

        /// Sink (trustee) user id
        #[arg(long)]
        sink: Option<u64>,

        /// Topic code; omit to query every topic the source is active in
        #[arg(long)]
        topic: Option<u32>,

        /// Minimum relevance score every path edge must reach
        #[arg(long)]
        threshold: Option<f64>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize how trusted neighbors were split into proximity tiers
    Tiers {
        #[command(flatten)]
        data: DataArgs,
    },
}

struct DataPaths {
    trust: PathBuf,
    ratings: PathBuf,
    rating_limit: Option<usize>,
}

fn load_config(data: &DataArgs) -> Result<Option<QueryConfig>, TrustPathError> {
    data.config.as_ref().map(QueryConfig::from_file).transpose()
}

fn resolve_data(data: DataArgs, config: Option<&QueryConfig>) -> Result<DataPaths, TrustPathError> {
    let trust = data
        .trust
        .or_else(|| config.map(|c| c.trust_path.clone()))
        .ok_or_else(|| TrustPathError::MalformedInput("no trust edge file given".to_string()))?;
    let ratings = data
        .ratings
        .or_else(|| config.map(|c| c.ratings_path.clone()))
        .ok_or_else(|| TrustPathError::MalformedInput("no rating file given".to_string()))?;
    Ok(DataPaths {
        trust,
        ratings,
        rating_limit: data.rating_limit.or(config.and_then(|c| c.rating_limit)),
    })
}

fn load_network(paths: &DataPaths) -> Result<TrustNetwork, TrustPathError> {
    let ratings = filter_ratings(load_ratings(&paths.ratings)?, paths.rating_limit);
    let edges = filter_trust_edges(load_trust_edges(&paths.trust)?, &ratings);
    TrustNetwork::build(edges, &ratings)
}

fn print_report(report: &QueryReport) {
    println!(
        "{}  {}  {}",
        report.query.topic,
        report.approved_count(),
        report.discovered
    );
    if report.approved_count() < PATH_LISTING_LIMIT {
        for path in report.approved.iter() {
            println!("{path}");
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            data,
            source,
            sink,
            topic,
            threshold,
            json,
        } => {
            let config = load_config(&data)?;
            let source = source
                .or(config.as_ref().map(|c| c.source))
                .ok_or_else(|| TrustPathError::MalformedInput("no source user given".into()))?;
            let sink = sink
                .or(config.as_ref().map(|c| c.sink))
                .ok_or_else(|| TrustPathError::MalformedInput("no sink user given".into()))?;
            let topic = topic.or(config.as_ref().and_then(|c| c.topic));
            let threshold = threshold
                .or(config.as_ref().map(|c| c.threshold))
                .unwrap_or(DEFAULT_THRESHOLD);

            let paths = resolve_data(data, config.as_ref())?;
            let network = load_network(&paths)?;
            let reports = match topic {
                Some(topic) => vec![network.run(&TrustQuery {
                    source,
                    sink,
                    topic,
                    threshold,
                })?],
                None => network.run_source_topics(source, sink, threshold)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in reports.iter() {
                    print_report(report);
                }
            }
        }
        Commands::Tiers { data } => {
            let config = load_config(&data)?;
            let paths = resolve_data(data, config.as_ref())?;
            let network = load_network(&paths)?;
            println!(
                "{} users, {} trust edges",
                network.graph().len(),
                network.graph().edge_count()
            );
            println!("{}", network.tier_stats());
        }
    }

    Ok(())
}
