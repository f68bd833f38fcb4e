//! Glob expansion and multi-file conversion.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::pipeline::{convert_file, default_output_path};
use crate::{ConvertError, ConvertOptions, ConvertResult, FailurePolicy, WriteSummary};

// ── Report ────────────────────────────────────────────────────────────────────

/// A file that converted successfully.
#[derive(Debug)]
pub struct Converted {
    pub source:  PathBuf,
    pub summary: WriteSummary,
}

/// A file that failed, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error:  ConvertError,
}

impl FileFailure {
    /// The failure as a single error carrying the input path.
    pub fn into_error(self) -> ConvertError {
        ConvertError::File { path: self.source, source: Box::new(self.error) }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.error)
    }
}

/// Outcome of [`convert_batch`], in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Converted>,
    pub failed:    Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files attempted.
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// The converted files, or the first failure.
    pub fn into_result(self) -> ConvertResult<Vec<Converted>> {
        match self.failed.into_iter().next() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.converted),
        }
    }
}

// ── Pattern expansion ─────────────────────────────────────────────────────────

/// Regular files matching `pattern`, sorted.
///
/// Relative patterns are resolved against `base`; `**` matches any number
/// of directories.
pub fn expand_pattern(base: &Path, pattern: &str) -> ConvertResult<Vec<PathBuf>> {
    let pattern_err = |reason: String| ConvertError::Pattern { pattern: pattern.to_owned(), reason };

    let full = if Path::new(pattern).is_absolute() {
        pattern.to_owned()
    } else {
        let base = base
            .to_str()
            .ok_or_else(|| pattern_err(format!("{} is not valid UTF-8", base.display())))?;
        format!("{}/{pattern}", glob::Pattern::escape(base))
    };

    let entries = glob::glob(&full).map_err(|e| pattern_err(e.to_string()))?;
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!(path = %e.path().display(), error = %e.error(), "skipping unreadable path"),
        }
    }
    files.sort();
    Ok(files)
}

// ── Batch conversion ──────────────────────────────────────────────────────────

/// Convert every file matching `pattern`.
///
/// Only errors that stop the batch before any file is touched are returned
/// as `Err`; per-file failures are collected in the report.
pub fn convert_batch(
    base:    &Path,
    pattern: &str,
    options: &ConvertOptions,
) -> ConvertResult<BatchReport> {
    let files = expand_pattern(base, pattern)?;
    if files.is_empty() {
        warn!(pattern, "no files match");
        return Ok(BatchReport::default());
    }
    if options.output.is_some() && files.len() > 1 {
        return Err(ConvertError::MultipleFilesSingleOutput { matched: files.len() });
    }

    let jobs: Vec<Job> = files
        .into_iter()
        .map(|source| {
            let destination =
                options.output.clone().unwrap_or_else(|| default_output_path(&source));
            Job { source, destination }
        })
        .collect();

    let outcomes = run_jobs(&jobs, options);

    let mut report = BatchReport::default();
    for (job, outcome) in jobs.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(summary)) => report.converted.push(Converted { source: job.source, summary }),
            Some(Err(error)) => {
                let failure = FileFailure { source: job.source, error };
                error!("{failure}");
                report.failed.push(failure);
            }
            None => {}
        }
    }
    Ok(report)
}

struct Job {
    source:      PathBuf,
    destination: PathBuf,
}

impl Job {
    fn run(&self, options: &ConvertOptions) -> ConvertResult<WriteSummary> {
        convert_file(&self.source, &self.destination, options)
    }
}

/// One outcome per job; `None` for jobs skipped after an abort.
fn run_jobs(jobs: &[Job], options: &ConvertOptions) -> Vec<Option<ConvertResult<WriteSummary>>> {
    #[cfg(feature = "parallel")]
    {
        if options.parallel {
            return run_parallel(jobs, options);
        }
    }

    let mut outcomes = Vec::with_capacity(jobs.len());
    let mut stopped = false;
    for job in jobs {
        if stopped {
            outcomes.push(None);
            continue;
        }
        let outcome = job.run(options);
        stopped = outcome.is_err() && options.failure_policy == FailurePolicy::Abort;
        outcomes.push(Some(outcome));
    }
    outcomes
}

#[cfg(feature = "parallel")]
fn run_parallel(jobs: &[Job], options: &ConvertOptions) -> Vec<Option<ConvertResult<WriteSummary>>> {
    use std::sync::atomic::{AtomicBool, Ordering};

    use rayon::prelude::*;

    // Jobs already running when the flag flips still finish.
    let stop = AtomicBool::new(false);
    jobs.par_iter()
        .map(|job| {
            if stop.load(Ordering::Relaxed) {
                return None;
            }
            let outcome = job.run(options);
            if outcome.is_err() && options.failure_policy == FailurePolicy::Abort {
                stop.store(true, Ordering::Relaxed);
            }
            Some(outcome)
        })
        .collect()
}
