// SPDX-License-Identifier: GPL-3.0-or-later

//! Core match-and-rewrite pipeline.
//!
//! Per file: derive a search query from the filename, score the catalog's
//! candidate set to pick one authoritative record, then rewrite the file's
//! tag document to match it (textual fields plus the best-resolution cover).
//! Strictly sequential; the first failed file aborts the whole run.

pub mod matcher;
pub mod pipeline;
pub mod ports;
pub mod rewriter;

#[cfg(test)]
pub(crate) mod testing;

pub use matcher::{build_query, select_best_match, MatchError};
pub use pipeline::{scan_library, Pipeline, PipelineError};
pub use ports::{Catalog, CatalogSession, TagStore};
pub use rewriter::{largest_cover, rewrite, RewriteError};
