//! Command-line front end for the FinSight research pipeline.
//!
//! Two subcommands mirror the two pipeline operations:
//!
//! ```bash
//! # Build the index from up to three article URLs
//! finsight ingest https://example.com/a https://example.com/b
//!
//! # Ask a question against the persisted index
//! finsight ask "what changed in Q3?"
//! ```
//!
//! The Gemini API key is read from `GEMINI_API_KEY` (or `GOOGLE_API_KEY`),
//! with `.env` files honored. Logging goes through `tracing`; set
//! `RUST_LOG=debug` for request-level detail.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finsight_gemini::GeminiBackend;
use finsight_loader::HttpLoader;
use finsight_rag::{AskOutcome, RagConfig, ResearchEngine};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finsight", version, about = "Research news articles with retrieval-augmented QA")]
struct Args {
    /// Where the index file lives.
    #[arg(long, global = true)]
    index_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch article URLs and (re)build the index.
    Ingest {
        /// Article URLs, at most three.
        #[arg(required = true, num_args = 1..=3)]
        urls: Vec<String>,
    },
    /// Ask a question against the ingested articles.
    Ask {
        /// The question to answer.
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may carry the key.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let backend = GeminiBackend::from_env()
        .context("cannot start without a Gemini API key; set GEMINI_API_KEY or add it to .env")?;
    let loader = HttpLoader::new().context("failed to set up the HTTP loader")?;

    let mut config = RagConfig::builder();
    if let Some(path) = args.index_path {
        config = config.index_path(path);
    }
    let engine = ResearchEngine::new(backend.clone(), backend, loader, config.build());

    match args.command {
        Command::Ingest { urls } => {
            let report = engine.ingest(&urls).await?;
            println!(
                "Indexed {} chunk(s) from {} document(s).",
                report.chunks, report.documents
            );
        }
        Command::Ask { question } => {
            let question = question.join(" ");
            anyhow::ensure!(!question.trim().is_empty(), "the question is empty");

            match engine.ask(&question).await? {
                AskOutcome::NotReady => {
                    println!("No index yet. Run `finsight ingest <URL>...` first.");
                }
                AskOutcome::Answer(answer) => {
                    println!("{}", answer.text.trim());
                    if !answer.sources.is_empty() {
                        println!();
                        println!("Sources:");
                        for source in &answer.sources {
                            println!(
                                "  {:>6.3}  {} (chunk {})",
                                source.score, source.chunk.source_url, source.chunk.index
                            );
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
