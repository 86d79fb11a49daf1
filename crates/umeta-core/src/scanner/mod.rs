//! Source tree discovery and per-file orchestration.
//!
//! The scanner walks a directory, parses each matching header with its own
//! session and hands the results to a [`RecordStore`].

mod error;

pub use error::ScanError;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::builder::ParseOutcome;
use crate::config::ScanConfig;
use crate::parser::{HeaderParser, ParserOptions};
use crate::storage::RecordStore;

/// Totals for one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Files visited, including skipped ones.
    pub files: usize,
    pub containers: usize,
    pub properties: usize,
    pub functions: usize,
    pub failures: usize,
    /// Files skipped because they were unreadable or hit a protocol violation.
    pub errors: usize,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ScanStats {
    fn record(&mut self, outcome: &ParseOutcome) {
        self.containers += outcome.containers.len();
        self.properties += outcome.containers.iter().map(|c| c.properties.len()).sum::<usize>();
        self.functions += outcome.containers.iter().map(|c| c.functions.len()).sum::<usize>();
        self.failures += outcome.failures.len();
    }
}

/// Walks a source tree and parses every matching file.
pub struct Scanner {
    config: ScanConfig,
    parser: HeaderParser,
}

impl Scanner {
    /// Creates a scanner with default scan and parser settings.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default(), ParserOptions::default())
    }

    /// Creates a scanner with custom configuration.
    pub fn with_config(config: ScanConfig, options: ParserOptions) -> Self {
        Self {
            config,
            parser: HeaderParser::new(options),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Lists matching files under `root`, sorted by path.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::MissingSourceDir(root.to_path_buf()));
        }

        let exclude_dirs = self.config.exclude_dirs.clone();
        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(self.config.respect_gitignore)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| exclude_dirs.iter().any(|d| d == name)))
            })
            .build();

        let mut files: Vec<PathBuf> = walker
            .flatten()
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| self.config.matches_extension(path))
            .collect();
        files.sort();

        debug!(root = %root.display(), count = files.len(), "collected source files");
        Ok(files)
    }

    /// Parses one file without persisting anything.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome, ScanError> {
        let bytes = fs::read(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);

        self.parser
            .parse_str(&source)
            .map_err(|source| ScanError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Scans `root` and appends all results to `store`.
    pub fn scan<S: RecordStore>(&self, root: &Path, store: &S) -> Result<ScanStats, ScanError> {
        self.scan_with_progress(root, store, |_, _| {})
    }

    /// Like [`scan`](Self::scan), calling `progress` after each file.
    pub fn scan_with_progress<S, F>(
        &self,
        root: &Path,
        store: &S,
        progress: F,
    ) -> Result<ScanStats, ScanError>
    where
        S: RecordStore,
        F: FnMut(&Path, &ScanStats),
    {
        let files = self.collect_files(root)?;
        info!(root = %root.display(), files = files.len(), "scan started");
        self.scan_files(&files, store, progress)
    }

    /// Parses an already collected file list and appends the results.
    pub fn scan_files<S, F>(
        &self,
        files: &[PathBuf],
        store: &S,
        mut progress: F,
    ) -> Result<ScanStats, ScanError>
    where
        S: RecordStore,
        F: FnMut(&Path, &ScanStats),
    {
        let mut stats = ScanStats::default();
        for path in files {
            stats.files += 1;

            match self.parse_file(path) {
                Ok(outcome) => {
                    stats.record(&outcome);
                    store.append_containers(&outcome.containers)?;
                    store.append_failures(&outcome.failures)?;
                }
                Err(ScanError::Parse { path, source }) => {
                    error!(path = %path.display(), line = source.line(), error = %source, "parse session aborted");
                    stats.errors += 1;
                }
                Err(ScanError::Io { path, source }) => {
                    warn!(path = %path.display(), error = %source, "skipping unreadable file");
                    stats.errors += 1;
                }
                Err(e) => return Err(e),
            }

            progress(path, &stats);
        }

        stats.finished_at = Some(Utc::now());
        info!(
            files = stats.files,
            containers = stats.containers,
            failures = stats.failures,
            errors = stats.errors,
            "scan finished"
        );
        Ok(stats)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
