use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use parklink_batch::{export, input, runner, BatchError, LinkSummary};
use parklink_core::{
    AttributeFilter, GeoPoint, LinkConfig, LinkStrategy, ProximityConfig, ProximityQuery,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "parklink",
    about = "Link park records across sources and search for nearby entities",
    long_about = "Batch front end for parklink_core.\n\
                  Logging is controlled with RUST_LOG (default: info)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link every source-A record to at most one source-B record
    Link {
        /// JSON array of source-A records
        #[arg(long)]
        source_a: PathBuf,
        /// JSON array of source-B records
        #[arg(long)]
        source_b: PathBuf,
        /// JSON file with a link configuration; flags below override it
        #[arg(long, env = "PARKLINK_CONFIG")]
        config: Option<PathBuf>,
        /// Minimum combined score to accept a link
        #[arg(long)]
        threshold: Option<f64>,
        /// Distance in km at which location similarity reaches zero
        #[arg(long)]
        max_distance_km: Option<f64>,
        /// Assignment strategy (greedy or optimal)
        #[arg(long, default_value_t = LinkStrategy::Greedy)]
        strategy: LinkStrategy,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find candidates within a radius of every reference record
    Nearby {
        /// JSON array of reference records (typically parks)
        #[arg(long)]
        references: PathBuf,
        /// JSON array of candidate records (trails, public lands, places)
        #[arg(long)]
        candidates: PathBuf,
        /// JSON file with proximity defaults; flags below override it
        #[arg(long, env = "PARKLINK_PROXIMITY_CONFIG")]
        config: Option<PathBuf>,
        /// Search radius in meters [default: 50000]
        #[arg(long)]
        radius_m: Option<f64>,
        /// Keep at most this many results per reference
        #[arg(long)]
        limit: Option<usize>,
        /// Metadata equality filter, `field=value` (repeatable)
        #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_equals)]
        equals: Vec<AttributeFilter>,
        /// Metadata numeric range filter, `field:min:max`; either bound may be empty
        #[arg(long, value_name = "FIELD:MIN:MAX", value_parser = parse_range)]
        range: Vec<AttributeFilter>,
        /// Worker threads; defaults to rayon's choice
        #[arg(long)]
        threads: Option<usize>,
        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file; omitted means summary only
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn parse_equals(arg: &str) -> Result<AttributeFilter, String> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{arg}`"))?;
    if field.is_empty() {
        return Err(format!("missing field name in `{arg}`"));
    }
    Ok(AttributeFilter::equals(field, value))
}

fn parse_range(arg: &str) -> Result<AttributeFilter, String> {
    let mut parts = arg.splitn(3, ':');
    let (Some(field), Some(min), Some(max)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected FIELD:MIN:MAX, got `{arg}`"));
    };
    if field.is_empty() {
        return Err(format!("missing field name in `{arg}`"));
    }
    let (min, max) = (parse_bound(min)?, parse_bound(max)?);
    Ok(AttributeFilter::range(field, min, max))
}

fn parse_bound(bound: &str) -> Result<Option<f64>, String> {
    if bound.is_empty() {
        return Ok(None);
    }
    bound
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("`{bound}` is not a number"))
}

// ── Commands ───────────────────────────────────────────────────────

/// Query applied around every reference. Flags override the configured
/// defaults; the reference point is replaced per search.
fn nearby_template(
    config: &ProximityConfig,
    radius_m: Option<f64>,
    limit: Option<usize>,
    filters: Vec<AttributeFilter>,
) -> ProximityQuery {
    let mut template = ProximityQuery::from_config(GeoPoint::new(0.0, 0.0), config);
    if let Some(radius_m) = radius_m {
        template.radius_m = radius_m;
    }
    if let Some(limit) = limit {
        template = template.with_limit(limit);
    }
    filters.into_iter().fold(template, ProximityQuery::with_filter)
}

fn run(cli: Cli) -> Result<(), BatchError> {
    match cli.command {
        Commands::Link {
            source_a,
            source_b,
            config,
            threshold,
            max_distance_km,
            strategy,
            output,
        } => {
            let mut link_config = match config {
                Some(path) => input::load_link_config(path)?,
                None => LinkConfig::default(),
            };
            if let Some(threshold) = threshold {
                link_config = link_config.with_match_threshold(threshold);
            }
            if let Some(km) = max_distance_km {
                link_config = link_config.with_max_location_distance_km(km);
            }

            let source_a = input::load_entities(source_a)?;
            let source_b = input::load_entities(source_b)?;
            let report = runner::run_linking(&source_a, &source_b, strategy, link_config)?;
            println!("{}", LinkSummary::from_report(&report, source_a.len(), source_b.len()));

            if let Some(path) = output.out {
                match output.format {
                    Format::Csv => export::links_to_csv(&report.links, &path)?,
                    Format::Json => export::links_to_json(&report.links, &path)?,
                }
                info!(path = %path.display(), "links written");
            }
        }
        Commands::Nearby {
            references,
            candidates,
            config,
            radius_m,
            limit,
            equals,
            range,
            threads,
            quiet,
            output,
        } => {
            let proximity_config = match config {
                Some(path) => input::load_proximity_config(path)?,
                None => ProximityConfig::default(),
            };
            let filters = equals.into_iter().chain(range).collect();
            let template = nearby_template(&proximity_config, radius_m, limit, filters);

            let references = input::load_entities(references)?;
            let candidates = input::load_entities(candidates)?;

            let results =
                runner::run_nearby_batch(&references, &candidates, &template, threads, !quiet)?;
            for batch in &results {
                println!(
                    "{:<24} {:<40} {:>5}",
                    batch.reference_id,
                    batch.reference_name,
                    batch.results.len()
                );
            }

            if let Some(path) = output.out {
                match output.format {
                    Format::Csv => export::nearby_to_csv(&results, &path)?,
                    Format::Json => export::nearby_to_json(&results, &path)?,
                }
                info!(path = %path.display(), "nearby results written");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "parklink failed");
            ExitCode::FAILURE
        }
    }
}
