//! ragprobe CLI - generate and run RAG evaluation test sets.
//!
//! # Usage
//!
//! ```bash
//! # Generate up to 100 test cases from a directory of text files
//! ragprobe generate --source ./knowledge-base --output tests.json --num 100
//!
//! # Evaluate retrieval and answers against the test cases
//! ragprobe evaluate --input tests.json --source ./knowledge-base
//! ragprobe evaluate --input tests.json --source ./knowledge-base --json
//!
//! # Show help
//! ragprobe --help
//! ```
//!
//! LLM settings come from flags or `LLM_SERVER_URL`, `LLM_MODEL` and
//! `LLM_API_KEY`.

mod config;
mod evaluate;
mod generate;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{EvaluateArgs, GenerateArgs, LlmArgs};
use tracing_subscriber::EnvFilter;

/// RAG evaluation harness.
///
/// Synthesizes grounded question/answer test cases from documents and scores
/// a retrieval + answer pipeline against them.
#[derive(Parser, Debug)]
#[command(name = "ragprobe", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    llm: LlmArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate test cases from a document source
    Generate(GenerateArgs),
    /// Evaluate a RAG pipeline against a test-case file
    Evaluate(EvaluateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => generate::run(&args, &cli.llm).await,
        Command::Evaluate(args) => evaluate::run(&args, &cli.llm).await,
    }
}
