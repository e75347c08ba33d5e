#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use camscrape::errors::ScrapeError;
use camscrape::links::DEFAULT_LINK_SELECTOR;
use camscrape::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;
use camscrape::{BrowserType, FetcherKind, OutputFormat, ScrapeConfig, Whitelist};

mod commands;

const EXIT_SUCCESS: i32 = 0;

#[derive(Parser)]
#[command(name = "camscrape")]
#[command(about = "Scrape camera product pages into a tab-separated table", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape detail pages listed in a file (one URL per line)
    Details {
        /// File with one detail-page URL per line
        urls_file: PathBuf,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "tsv")]
        format: OutputFormat,

        /// Attribute to keep from the specifications block (repeatable,
        /// replaces the default camera attribute set)
        #[arg(long = "attribute", value_parser = parse_attribute)]
        attributes: Vec<String>,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Collect detail-page URLs from paginated listing pages
    Links {
        /// First listing page
        url: String,

        /// Stop after this many links
        #[arg(long, default_value = "100")]
        max_links: usize,

        /// CSS selector of the product anchors
        #[arg(long, default_value = DEFAULT_LINK_SELECTOR)]
        link_selector: String,

        /// Write links to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// How pages are fetched
#[derive(Args)]
struct FetchArgs {
    /// Page fetcher
    #[arg(long, default_value = "http")]
    fetcher: FetcherKind,

    /// Browser to use with the browser fetcher
    #[arg(short, long, default_value = "chrome")]
    browser: BrowserType,

    /// Run browser in visible mode (disables headless)
    #[arg(long = "no-headless")]
    no_headless: bool,

    /// Pause between consecutive page fetches, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// User agent sent with every request
    #[arg(long, default_value = camscrape::config::DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl FetchArgs {
    fn into_config(self, attributes: Vec<String>) -> ScrapeConfig {
        let whitelist = if attributes.is_empty() {
            Whitelist::cameras()
        } else {
            Whitelist::new(attributes)
        };

        ScrapeConfig {
            fetcher: self.fetcher,
            browser: self.browser,
            headless: !self.no_headless,
            delay: Duration::from_millis(self.delay_ms),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent,
            whitelist,
            ..ScrapeConfig::default()
        }
    }
}

/// Spec attributes may not shadow the fixed columns
fn parse_attribute(name: &str) -> Result<String, String> {
    if camscrape::extract::is_reserved(name) {
        Err(format!("'{}' is a fixed column, not a specification attribute", name))
    } else {
        Ok(name.to_string())
    }
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Always clean up WebDriver processes before exiting
    GLOBAL_WEBDRIVER_MANAGER.shutdown();

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            let scrape_err: ScrapeError = err.into();
            eprintln!("Error: {}", scrape_err);
            std::process::exit(scrape_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr so the table on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camscrape=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Details {
            urls_file,
            output,
            format,
            attributes,
            fetch,
        } => {
            commands::details::handle_details(
                urls_file,
                output,
                format,
                fetch.into_config(attributes),
            )
            .await?
        }

        Commands::Links {
            url,
            max_links,
            link_selector,
            output,
            fetch,
        } => {
            commands::links::handle_links(
                url,
                max_links,
                link_selector,
                output,
                fetch.into_config(Vec::new()),
            )
            .await?
        }
    }

    Ok(())
}
