//! Digest a file or directory

use anyhow::{Context, Result};
use codedigest_parser::ParseConfig;
use codedigest_worker::{CompressTask, FileDigest, PoolConfig, WorkerPool};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::common::resolve_root;
use crate::discovery::discover;

#[derive(Debug, Clone, Default)]
pub struct DigestOptions {
    pub json: bool,
    pub max_workers: Option<usize>,
    pub include_unsupported: bool,
}

pub fn digest(path: &Path, options: &DigestOptions) -> Result<()> {
    let root = resolve_root(path)?;
    info!("Digesting: {:?}", root);

    let start = Instant::now();
    let files = discover(&root, options.include_unsupported)
        .with_context(|| format!("failed to collect files under {}", root.display()))?;

    let mut pool_config = PoolConfig::from_env();
    if let Some(max_workers) = options.max_workers {
        pool_config = pool_config.with_max_workers(max_workers);
    }

    let pool = WorkerPool::new(&pool_config, files.len());
    let parse_config = Arc::new(ParseConfig::default());
    let tasks = files.into_iter().map(|file| {
        CompressTask::new(file.path, file.content).with_config(Arc::clone(&parse_config))
    });
    let results = pool.run(tasks).context("worker pool failed")?;
    let workers = pool.shutdown();

    let mut out = BufWriter::new(io::stdout().lock());
    render(&mut out, &results, options.json)?;
    out.flush().context("failed to write output")?;

    let compressed = results.iter().filter(|r| r.is_digest()).count();
    let elapsed = start.elapsed();

    info!("Digest complete!");
    info!("  Files: {}", results.len());
    info!("  Compressed: {}", compressed);
    info!("  Passed through: {}", results.len() - compressed);
    info!("  Workers: {}", workers.len());
    info!("  Time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn render(out: &mut impl Write, results: &[FileDigest], json: bool) -> Result<()> {
    for result in results {
        if json {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
        } else {
            writeln!(out, "## {}", result.path.display())?;
            writeln!(out, "{}", result.text())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
