//! `ragprobe evaluate` implementation.
//!
//! Builds the reference pipeline (BM25 retriever over the source documents
//! plus an LLM responder) and scores it against a test-case file.

use crate::config::{EvaluateArgs, LlmArgs};
use crate::output;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ragprobe_core::evaluation::{EvaluationConfig, Evaluator};
use ragprobe_core::rag::{Fetcher, KeywordRetriever, LlmResponder};
use ragprobe_core::TestFile;
use std::sync::Arc;
use tracing::info;

pub async fn run(args: &EvaluateArgs, llm: &LlmArgs) -> Result<()> {
    let file = TestFile::load(&args.input)
        .with_context(|| format!("Failed to load test cases from {}", args.input.display()))?;
    info!("Loaded {} test cases", file.tests.len());

    let source = args.source.source_str()?;
    let documents = args
        .source
        .fetcher()
        .fetch(source)
        .with_context(|| format!("Failed to fetch documents from {}", source))?;

    let retrieval = &args.retrieval;
    let retriever = Arc::new(
        KeywordRetriever::from_documents(&documents, retrieval.chunk_size, retrieval.chunk_overlap)
            .context("Failed to build keyword index")?,
    );
    info!("Indexed {} chunks", retriever.len());

    let client = llm.client()?;
    let mut responder =
        LlmResponder::new(retriever.clone(), client.clone()).with_top_k(retrieval.top_k);
    if let Some(template) = retrieval.load_template()? {
        responder = responder.with_template(template);
    }

    let evaluator = Evaluator::new(
        retriever,
        Arc::new(responder),
        client,
        EvaluationConfig {
            top_k: retrieval.top_k,
        },
    );

    let pb = ProgressBar::new(file.tests.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}")?);
    pb.set_message("Evaluating");

    let report = evaluator
        .evaluate(&file.tests, |progress| {
            pb.set_position(progress.completed as u64)
        })
        .await;
    pb.finish_and_clear();
    let report = report?;

    let rendered = if args.json {
        output::format_report_json(&report)?
    } else {
        output::format_summary(&report.summary)
    };
    println!("{}", rendered);
    Ok(())
}
