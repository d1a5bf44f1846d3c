//! `ragprobe generate` implementation.

use crate::config::{GenerateArgs, LlmArgs};
use crate::output;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ragprobe_core::generation::{GenerationConfig, TestGenerator};
use ragprobe_core::rag::Fetcher;
use ragprobe_core::TestFile;
use tracing::info;

/// Fetches documents, generates test cases and writes the test-case file.
pub async fn run(args: &GenerateArgs, llm: &LlmArgs) -> Result<()> {
    if args.mode != "text" {
        bail!("unsupported mode: {}", args.mode);
    }

    let source = args.source.source_str()?;
    let documents = args
        .source
        .fetcher()
        .fetch(source)
        .with_context(|| format!("Failed to fetch documents from {}", source))?;
    info!("Loaded {} documents", documents.len());

    let config = GenerationConfig {
        max_tests: args.num,
        ..GenerationConfig::default()
    };

    let pb = if args.num > 0 {
        let pb = ProgressBar::new(args.num as u64);
        pb.set_style(ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}")?);
        pb
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_message("Generating");

    let generator = TestGenerator::new(llm.client()?);
    let tests = generator
        .generate(&documents, &config, |progress| {
            pb.set_position(progress.accepted as u64);
            pb.set_message(output::format_generation_progress(progress));
        })
        .await
        .context("Test generation failed")?;
    pb.finish_and_clear();

    let file = TestFile::new(tests);
    file.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{}",
        output::format_generation(file.tests.len(), &args.output, &file.category_counts())
    );
    Ok(())
}
