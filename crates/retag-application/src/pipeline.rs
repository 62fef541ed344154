// SPDX-License-Identifier: GPL-3.0-or-later

//! Sequential per-file pipeline.
//!
//! Each file walks Opened → Matched → Rewritten → Flushed → Closed; any
//! failure is terminal for the file and, by policy, for the whole run.
//! There is no per-file isolation or partial-progress report — a deliberate
//! simplicity trade-off for a single-user batch tool.

use crate::matcher::{build_query, select_best_match, MatchError};
use crate::ports::{Catalog, TagStore};
use crate::rewriter::{rewrite, RewriteError};
use retag_catalog::CatalogError;
use retag_domain::CandidateTrack;
use retag_tagfile::{TagDocument, TagError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no .{extension} files found in {}", .dir.display())]
    NoFiles { dir: PathBuf, extension: String },

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Enumerate the files to process: direct children of `dir` with the given
/// extension (case-insensitive, no leading dot), lexicographically sorted so
/// runs are deterministic. An empty result is an error — a run over nothing
/// is almost always a mistyped path.
pub fn scan_library(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(PipelineError::NoFiles {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(files)
}

/// The match-and-rewrite pipeline over one catalog session.
pub struct Pipeline<C: Catalog> {
    catalog: C,
}

impl<C: Catalog> Pipeline<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Process every matching file under `dir`, strictly one at a time.
    ///
    /// Returns the number of rewritten files. The first error aborts the
    /// run; files after the failing one are not touched.
    pub async fn run(&self, dir: &Path, extension: &str) -> Result<usize, PipelineError> {
        let files = scan_library(dir, extension)?;
        info!(
            target: "pipeline",
            count = files.len(),
            dir = %dir.display(),
            "starting run"
        );

        for path in &files {
            self.process_file(path).await?;
        }

        info!(target: "pipeline", count = files.len(), "run complete");
        Ok(files.len())
    }

    async fn process_file(&self, path: &Path) -> Result<(), PipelineError> {
        info!(target: "pipeline", path = %path.display(), "processing file");

        let mut doc = TagDocument::open(path)?;
        let filename = file_label(path);

        let track = self.process_document(&mut doc, &filename).await?;

        doc.save()?;
        info!(target: "pipeline", path = %path.display(), track = %track, "file rewritten");
        Ok(())
    }

    /// Per-file core, separated from file I/O so tests can drive it with a
    /// fake store: query → search → select → rewrite. The caller flushes.
    pub async fn process_document<S: TagStore>(
        &self,
        store: &mut S,
        filename: &str,
    ) -> Result<CandidateTrack, PipelineError> {
        let query = build_query(filename);
        let candidates = self.catalog.search_tracks(&query).await?;

        let track = match select_best_match(filename, candidates) {
            Ok(track) => {
                info!(target: "pipeline", query = %query, found = %track, "match selected");
                track
            }
            Err(e) => {
                warn!(target: "pipeline", query = %query, error = %e, "match failed");
                return Err(e.into());
            }
        };

        rewrite(store, &self.catalog, &track).await?;
        Ok(track)
    }
}

/// Display name the matcher sees: the file stem, extension stripped.
fn file_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
