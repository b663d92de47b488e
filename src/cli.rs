use crate::config::Config;
use crate::engine::Engine;
use crate::error::SitellmsError;
use crate::render::{render_json, render_markdown};
use crate::runtime;
use crate::tools::classify::PatternSet;
use crate::types::Category;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sitellms",
    version,
    about = "Build an llms.txt-style digest of a store from its sitemap"
)]
pub struct Cli {
    /// Absolute URL of the sitemap (urlset or sitemap index)
    sitemap_url: String,

    /// Regex for product page URLs
    #[arg(long)]
    products: Option<String>,

    /// Regex for category listing URLs
    #[arg(long)]
    categories: Option<String>,

    /// Regex for institutional / useful page URLs
    #[arg(long)]
    useful: Option<String>,

    /// Maximum page requests in flight (overrides the config file)
    #[arg(long)]
    concurrency: Option<usize>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Markdown,
    Json,
}

impl Cli {
    fn patterns(&self) -> PatternSet {
        let mut patterns = PatternSet::new();
        let given = [
            (Category::Product, &self.products),
            (Category::Category, &self.categories),
            (Category::Useful, &self.useful),
        ];
        for (category, pattern) in given {
            if let Some(pattern) = pattern {
                patterns = patterns.with(category, pattern.clone());
            }
        }
        patterns
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        Ok(config)
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if matches!(e.downcast_ref::<SitellmsError>(), Some(SitellmsError::NoMatchingUrls)) {
                eprintln!("nothing to do: {e}");
                return ExitCode::from(2);
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<String> {
    let engine = Engine::with_reqwest(cli.load_config()?)?;
    let set = runtime::block_on(engine.run(&cli.sitemap_url, &cli.patterns()))?;

    match cli.format {
        Format::Markdown => Ok(render_markdown(&set, &engine.config().site_name)),
        Format::Json => Ok(render_json(&set)?),
    }
}

/// Logs go to stderr so stdout carries only the rendered document.
fn init_tracing(verbose: bool) {
    let default = if verbose { "sitellms=debug" } else { "sitellms=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
