//! `process` command: run a queue batch against a local store.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{Cli, StoreArgs};
use crate::config::ResizeConfig;
use crate::event::QueueBatch;
use crate::log;
use crate::pipeline::{Outcome, Pipeline, ProcessingResult};
use crate::store::FsStore;

/// Execute the process command.
pub fn run_process(batch: &Path, store: &StoreArgs, config: &ResizeConfig) -> Result<()> {
    let content = read_batch(batch)?;
    let batch = QueueBatch::from_json(&content)?;

    let store = FsStore::new(&store.store);
    let pipeline = Pipeline::new(config, &store);
    let results = pipeline
        .process_batch(&batch)
        .with_context(|| format!("batch failed, store at {}", store.root().display()))?;

    log!("done"; "{}", Summary::from_results(&results));
    Ok(())
}

fn read_batch(path: &Path) -> Result<String> {
    if Cli::batch_from_stdin(path) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read batch from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read batch {}", path.display()))
}

/// Totals over a batch.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    processed: usize,
    skipped: usize,
    variants: usize,
    bytes: usize,
}

impl Summary {
    fn from_results(results: &[ProcessingResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match &result.outcome {
                Outcome::Processed(records) => {
                    summary.processed += 1;
                    summary.variants += records.len();
                    summary.bytes += records.iter().map(|r| r.bytes).sum::<usize>();
                }
                Outcome::Skipped(_) => summary.skipped += 1,
            }
            summary
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} skipped, {} variants written ({} bytes)",
            self.processed, self.skipped, self.variants, self.bytes
        )
    }
}
