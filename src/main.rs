//! # epaper_links
//!
//! Finds the direct PDF download link of today's edition for a set of
//! newspaper e-paper sources by scraping each source's landing page.
//!
//! ## Usage
//!
//! ```sh
//! epaper_links list
//! epaper_links resolve hindu
//! epaper_links resolve-all -o ./reports
//! ```
//!
//! ## Architecture
//!
//! 1. **Registry**: the source catalog is loaded once, from the built-in
//!    table or a YAML file, and passed down explicitly
//! 2. **Resolution**: each landing page is fetched once and scanned for the
//!    first anchor ending in `.pdf`
//! 3. **Output**: results go to stdout as text or JSON, and `resolve-all` can
//!    also write a dated JSON report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod registry;
mod resolver;
mod utils;

use cli::{Cli, Command, MatchArgs};
use models::{ResolutionReport, ResolutionStatus, SourceResolution};
use outputs::{json, text};
use registry::SourceRegistry;
use resolver::LinkResolver;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let registry = match &args.registry {
        Some(path) => SourceRegistry::from_yaml_file(path).await?,
        None => SourceRegistry::builtin(),
    };
    info!(sources = registry.len(), "Source registry ready");

    let result = run(&args, &registry).await;

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(?elapsed, "Execution complete"),
        Err(e) => error!(?elapsed, error = %e, "Execution failed"),
    }
    result
}

async fn run(args: &Cli, registry: &SourceRegistry) -> Result<(), Box<dyn Error>> {
    match &args.command {
        Command::List => {
            if args.json {
                let sources: Vec<_> = registry.iter().collect();
                println!("{}", json::to_pretty_json(&sources)?);
            } else {
                print!("{}", text::catalog_to_text(registry.iter()));
            }
        }
        Command::Show { id } => {
            let source = registry.get(id)?;
            if args.json {
                println!("{}", json::to_pretty_json(source)?);
            } else {
                print!("{}", text::descriptor_to_text(source));
            }
        }
        Command::Resolve { id, matching } => {
            let source = registry.get(id)?;
            let resolver = build_resolver(args, *matching)?;
            let outcome = resolver.resolve_pdf_link(&source.landing_page_url).await;

            let resolution = match &outcome {
                Ok(Some(link)) => SourceResolution::found(source, link.clone()),
                Ok(None) => SourceResolution::not_found(source),
                Err(e) => SourceResolution::fetch_failed(source, e.to_string()),
            };
            if args.json {
                println!("{}", json::to_pretty_json(&resolution)?);
            } else {
                println!("{}", text::resolution_to_text(&resolution));
            }
            outcome?;
        }
        Command::ResolveUrl { url, matching } => {
            let resolver = build_resolver(args, *matching)?;
            let outcome = resolver.resolve_pdf_link(url).await;

            if args.json {
                let (status, pdf_url, error) = match &outcome {
                    Ok(Some(link)) => (ResolutionStatus::Found, Some(link.clone()), None),
                    Ok(None) => (ResolutionStatus::NotFound, None, None),
                    Err(e) => (ResolutionStatus::FetchFailed, None, Some(e.to_string())),
                };
                let row = serde_json::json!({
                    "page_url": url,
                    "status": status,
                    "pdf_url": pdf_url,
                    "error": error,
                });
                println!("{}", json::to_pretty_json(&row)?);
            } else {
                match &outcome {
                    Ok(Some(link)) => println!("{link}"),
                    Ok(None) => println!("no PDF link found on {url}"),
                    Err(e) => println!("{url}: source unavailable ({e})"),
                }
            }
            outcome?;
        }
        Command::ResolveAll {
            concurrency,
            output_dir,
            matching,
        } => {
            // Fail before any network traffic if the report cannot be written
            if let Some(dir) = output_dir {
                if let Err(e) = ensure_writable_dir(dir).await {
                    error!(path = %dir.display(), error = %e, "Report directory is not writable");
                    return Err(e);
                }
            }

            let resolver = build_resolver(args, *matching)?;
            let now = Local::now();
            let report = ResolutionReport {
                local_date: now.date_naive().to_string(),
                local_time: now.time().to_string(),
                sources: resolver.resolve_sources(registry.iter(), *concurrency).await,
            };

            let failed = report.count(ResolutionStatus::FetchFailed);
            if failed > 0 {
                warn!(failed, total = report.sources.len(), "Some sources were unavailable");
            }

            if args.json {
                println!("{}", json::to_pretty_json(&report)?);
            } else {
                print!("{}", text::report_to_text(&report));
            }

            if let Some(dir) = output_dir {
                write_report(&report, dir).await?;
            }
        }
    }
    Ok(())
}

fn build_resolver(args: &Cli, matching: MatchArgs) -> Result<LinkResolver, Box<dyn Error>> {
    let resolver = LinkResolver::new(args.resolver_config(matching))?;
    debug!(timeout = ?resolver.config().timeout, mode = ?resolver.config().mode, "Resolver ready");
    Ok(resolver)
}

async fn write_report(report: &ResolutionReport, dir: &Path) -> Result<(), Box<dyn Error>> {
    match json::write_report(report, dir).await {
        Ok(path) => {
            info!(path = %path.display(), "Report written");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to write report");
            Err(e)
        }
    }
}
