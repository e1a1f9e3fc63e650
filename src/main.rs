mod corpus;
mod marker;
mod script;
mod usage;

pub const USER_AGENT: &str = concat!("corpex/", env!("CARGO_PKG_VERSION"));

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use corpus::{CorpusVariant, HttpCorpusClient, Language};
use marker::Marker;
use usage::{UsageRequest, WordQuery};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

/// Get examples of a word's usage from the Russian National Corpus.
/// The word may be Russian or in the original language of a translation.
///
/// Set `CORPEX_API_URL` to use another corpus endpoint.
#[derive(Parser, Debug)]
#[command(name = "corpex", version)]
struct Cli {
    /// Word(s) to find sentences with
    #[arg(required = true, num_args = 1..)]
    word: Vec<String>,

    /// Corpus to search; chosen from the word's alphabet when omitted
    #[arg(short, long, value_enum)]
    corpus: Option<CorpusVariant>,

    /// Language of the parallel corpus examples
    #[arg(short, long, value_enum, default_value_t = Language::En)]
    language: Language,

    /// Number of examples to show
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// How to mark the found wordforms
    #[arg(long, value_enum, default_value_t = Marker::Upper)]
    marker: Marker,

    /// Console log level
    #[arg(long, alias = "level", value_enum, default_value_t = LogLevel::Warning)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Notset,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Notset => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LevelFilter::from(cli.log_level).into()),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let query = WordQuery::from_words(&cli.word)?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    let client = HttpCorpusClient::from_env(http);

    let req = UsageRequest {
        query: &query,
        count: cli.count,
        corpus: cli.corpus,
        language: cli.language,
        marker: Some(cli.marker),
    };
    let lines = usage::collect_examples(&client, &req).await?;
    info!(lines = lines.len(), "printing examples");

    let mut out = io::stdout().lock();
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
