mod input;
mod report;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tagpress_config::Config;
use tagpress_geo::{DisabledGeocoder, GeocoderHandle, NominatimGeocoder};
use tagpress_pipeline::{BatchStats, Context, Limits, Pipeline};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[derive(Parser)]
#[command(name = "tagpress", version, about = "Compress and tag a batch of files")]
struct Cli {
    /// Files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Declared media type for every file, instead of guessing from the extension
    #[arg(short = 't', long = "type", value_name = "MIME")]
    media_type: Option<String>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "TAGPRESS_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip reverse geocoding of photo locations
    #[arg(long)]
    no_geo: bool,

    /// Write each compressed file into this directory as `compressed_<name>`
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_directive = if cli.verbose { "tagpress=debug" } else { "tagpress=info" };
    let default_directive = default_directive.parse::<Directive>().into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref()).map_err(fatal)?;
    let geocoder: GeocoderHandle = if config.geo.enabled && !cli.no_geo {
        let geo = &config.geo;
        let nominatim = NominatimGeocoder::new(geo.endpoint.as_str(), &geo.user_agent, geo.timeout()).map_err(fatal)?;
        tracing::debug!(endpoint = nominatim.endpoint(), "Reverse geocoding enabled");
        Arc::new(nominatim)
    } else {
        Arc::new(DisabledGeocoder)
    };
    let limits = Limits {
        max_file_size: config.limits.max_file_size,
    };
    let ctx = Context::new(geocoder).with_limits(limits).with_options(config.compression_options());

    let candidates = input::read_candidates(&cli.files, cli.media_type.as_deref(), &limits).await?;
    tracing::info!(files = candidates.len(), "Processing");
    let results = Pipeline::new(ctx).run(candidates).await;

    if let Some(dir) = &cli.output {
        input::write_outputs(dir, &results).await?;
    }

    let stats = BatchStats::from_results(&results);
    if cli.json {
        println!("{}", report::json(&results, &stats).into_diagnostic()?);
    } else {
        print!("{}", report::text(&results, &stats));
    }
    Ok(())
}

/// Turn a library error into a report for the terminal, keeping the full
/// error tree as help text.
fn fatal<E>(err: exn::Exn<E>) -> miette::Report
where
    E: std::error::Error + Send + Sync + 'static,
{
    miette::miette!(help = format!("{err:?}"), "{}", *err)
}
