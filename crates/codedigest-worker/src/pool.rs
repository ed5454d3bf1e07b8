//! Bounded pool of compression threads.
//!
//! Every worker owns one `LanguageRegistry` for its whole life, so grammar and
//! query preparation is paid once per language per worker. Workers start on
//! demand and leave after sitting idle, disposing their registry first.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use codedigest_parser::{
    BuiltinGrammars, GrammarLoader, LanguageRegistry, ParseConfig, ParseOutcome, compress,
};

use crate::config::PoolConfig;
use crate::error::{PoolError, Result};

/// One file to compress.
#[derive(Debug, Clone)]
pub struct CompressTask {
    pub path: PathBuf,
    pub content: String,
    pub config: Arc<ParseConfig>,
}

impl CompressTask {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            config: Arc::new(ParseConfig::default()),
        }
    }

    pub fn with_config(mut self, config: Arc<ParseConfig>) -> Self {
        self.config = config;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DigestOutcome {
    Digest { text: String },
    /// The file could not be compressed; its original content is handed back.
    PassThrough { reason: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: DigestOutcome,
}

impl FileDigest {
    /// The digest, or the untouched content for pass-through files.
    pub fn text(&self) -> &str {
        match &self.outcome {
            DigestOutcome::Digest { text } => text,
            DigestOutcome::PassThrough { content, .. } => content,
        }
    }

    pub fn is_digest(&self) -> bool {
        matches!(self.outcome, DigestOutcome::Digest { .. })
    }
}

/// What one worker did over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub worker: usize,
    pub files: usize,
    pub languages_prepared: usize,
}

struct Job {
    index: usize,
    task: CompressTask,
    reply: Sender<(usize, FileDigest)>,
}

#[derive(Default)]
struct PoolState {
    live: usize,
    spawned: usize,
    handles: Vec<JoinHandle<WorkerStats>>,
}

type LoaderFactory<L> = dyn Fn() -> L + Send + Sync;

struct Shared<L> {
    jobs: Receiver<Job>,
    state: Mutex<PoolState>,
    idle_timeout: Duration,
    make_loader: Box<LoaderFactory<L>>,
}

impl<L> Shared<L> {
    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct WorkerPool<L = BuiltinGrammars> {
    jobs: Option<Sender<Job>>,
    shared: Arc<Shared<L>>,
    max_workers: usize,
}

impl WorkerPool<BuiltinGrammars> {
    /// Pool sized for a batch of `file_count` files.
    pub fn new(config: &PoolConfig, file_count: usize) -> Self {
        Self::with_loader_factory(config, file_count, || BuiltinGrammars)
    }
}

impl<L: GrammarLoader + 'static> WorkerPool<L> {
    /// Each worker calls `make_loader` once, when it handles its first file.
    pub fn with_loader_factory(
        config: &PoolConfig,
        file_count: usize,
        make_loader: impl Fn() -> L + Send + Sync + 'static,
    ) -> Self {
        let (sender, receiver) = channel::unbounded();
        let max_workers = config.worker_count(file_count);
        debug!(
            "Worker pool for {} files: up to {} workers, idle timeout {:?}",
            file_count, max_workers, config.idle_timeout
        );

        Self {
            jobs: Some(sender),
            shared: Arc::new(Shared {
                jobs: receiver,
                state: Mutex::new(PoolState::default()),
                idle_timeout: config.idle_timeout,
                make_loader: Box::new(make_loader),
            }),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Workers currently alive (busy or waiting for work).
    pub fn live_workers(&self) -> usize {
        self.shared.lock_state().live
    }

    /// Compress every task and return the results in task order.
    ///
    /// A file that fails, panics or has no grammar comes back as
    /// `PassThrough`; it never fails the batch.
    pub fn run(&self, tasks: impl IntoIterator<Item = CompressTask>) -> Result<Vec<FileDigest>> {
        let (reply, results) = channel::unbounded();

        let mut submitted = 0;
        for (index, task) in tasks.into_iter().enumerate() {
            self.submit(Job {
                index,
                task,
                reply: reply.clone(),
            })?;
            submitted += 1;
        }
        drop(reply);

        let mut slots: Vec<Option<FileDigest>> = vec![None; submitted];
        // Ends once every job has been answered or dropped.
        for (index, digest) in results.iter() {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(digest);
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(PoolError::Lost { index }))
            .collect()
    }

    fn submit(&self, job: Job) -> Result<()> {
        let sender = self.jobs.as_ref().ok_or(PoolError::Closed)?;

        // Held across spawn and send: an idle worker deciding to exit takes the
        // same lock, so it either sees this job or we see it gone.
        let mut state = self.shared.lock_state();
        if state.live < self.max_workers {
            match self.spawn_worker(state.spawned) {
                Ok(handle) => {
                    state.live += 1;
                    state.spawned += 1;
                    state.handles.push(handle);
                }
                Err(err) if state.live == 0 => return Err(PoolError::Spawn(err)),
                Err(err) => warn!("Could not start another worker: {}", err),
            }
        }

        sender.send(job).map_err(|_| PoolError::Closed)
    }

    fn spawn_worker(&self, id: usize) -> std::io::Result<JoinHandle<WorkerStats>> {
        let shared = Arc::clone(&self.shared);
        thread::Builder::new()
            .name(format!("codedigest-worker-{id}"))
            .spawn(move || worker_loop(&shared, id))
    }

    /// Drain queued work, stop every worker and collect their stats.
    pub fn shutdown(mut self) -> Vec<WorkerStats> {
        self.close()
    }

    fn close(&mut self) -> Vec<WorkerStats> {
        // Disconnecting the queue is the termination signal.
        self.jobs.take();

        let handles = std::mem::take(&mut self.shared.lock_state().handles);
        let mut stats = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(worker) => stats.push(worker),
                Err(_) => error!("A worker thread panicked outside of a task"),
            }
        }
        stats.sort_by_key(|worker| worker.worker);
        stats
    }
}

impl<L> Drop for WorkerPool<L> {
    fn drop(&mut self) {
        self.jobs.take();
        let handles = std::mem::take(&mut self.shared.lock_state().handles);
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn worker_loop<L: GrammarLoader>(shared: &Shared<L>, id: usize) -> WorkerStats {
    trace!("Worker {} started", id);
    let mut stats = WorkerStats {
        worker: id,
        ..WorkerStats::default()
    };
    let mut registry: Option<LanguageRegistry<L>> = None;

    loop {
        let job = match shared.jobs.recv_timeout(shared.idle_timeout) {
            Ok(job) => job,
            Err(RecvTimeoutError::Timeout) => {
                let mut state = shared.lock_state();
                match shared.jobs.try_recv() {
                    Ok(job) => {
                        drop(state);
                        job
                    }
                    Err(_) => {
                        state.live -= 1;
                        debug!("Worker {} idle, exiting", id);
                        break;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                shared.lock_state().live -= 1;
                break;
            }
        };

        let registry = registry.get_or_insert_with(|| {
            LanguageRegistry::with_loader((shared.make_loader)())
        });
        let digest = process(registry, job.task, &mut stats);
        stats.files += 1;
        // The caller may have stopped listening; the work is simply discarded.
        let _ = job.reply.send((job.index, digest));
    }

    if let Some(mut registry) = registry {
        retire(&mut registry, &mut stats);
    }
    debug!(
        "Worker {} done: {} files, {} languages prepared",
        id, stats.files, stats.languages_prepared
    );
    stats
}

fn process<L: GrammarLoader>(
    registry: &mut LanguageRegistry<L>,
    task: CompressTask,
    stats: &mut WorkerStats,
) -> FileDigest {
    let CompressTask {
        path,
        content,
        config,
    } = task;

    let result = {
        let registry = &mut *registry;
        panic::catch_unwind(AssertUnwindSafe(|| {
            compress(registry, &content, &path, &config)
        }))
    };

    let outcome = match result {
        Ok(Ok(ParseOutcome::Digest(text))) => DigestOutcome::Digest { text },
        Ok(Ok(ParseOutcome::Unsupported)) => {
            trace!("No grammar for {}", path.display());
            DigestOutcome::PassThrough {
                reason: "unsupported file type".to_string(),
                content,
            }
        }
        Ok(Err(err)) => {
            warn!("Failed to compress {}: {}", path.display(), err);
            DigestOutcome::PassThrough {
                reason: err.to_string(),
                content,
            }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("Panic while compressing {}: {}", path.display(), message);
            // Cached parsers may be mid-parse; start from a clean registry.
            retire(registry, stats);
            DigestOutcome::PassThrough {
                reason: format!("panicked: {message}"),
                content,
            }
        }
    };

    FileDigest { path, outcome }
}

fn retire<L: GrammarLoader>(registry: &mut LanguageRegistry<L>, stats: &mut WorkerStats) {
    stats.languages_prepared += registry.prepared_count();
    registry.dispose();
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
