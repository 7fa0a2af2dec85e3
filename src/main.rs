use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use ridership::{
    config::{Config, PageConfig},
    extract::{BaselineTargets, Layout},
    fetch, output,
};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Collect daily ridership from transit news page tables")]
struct Args {
    /// YAML page list
    #[arg(short, long, default_value = "ridership.yaml")]
    config: PathBuf,
    /// JSON file to write
    #[arg(short, long, default_value = "ridership.json")]
    output: PathBuf,
    /// Key the output by YYYY-MM-DD instead of the published date text
    #[arg(long)]
    iso_keys: bool,
    /// Extract a saved page instead of fetching the configured ones
    #[arg(long, requires = "layout")]
    html: Option<PathBuf>,
    #[arg(long)]
    layout: Option<Layout>,
    #[arg(long)]
    row_selector: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let results = match (&args.html, args.layout) {
        (Some(path), Some(layout)) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let page = PageConfig {
                url: format!("file://{}", path.display()),
                layout,
                row_selector: args.row_selector.clone(),
            };
            vec![fetch::extract_page(&html, &page, BaselineTargets::default())?]
        }
        _ => {
            let cfg = Config::load(&args.config)?;
            info!(pages = cfg.pages.len(), "fetching");
            fetch::fetch_all(&Client::new(), &cfg.pages, cfg.baseline_targets).await?
        }
    };

    let merged = output::merge(results);
    output::write_json(&args.output, &merged, args.iso_keys)?;
    info!(records = merged.len(), path = %args.output.display(), "written");
    Ok(())
}
