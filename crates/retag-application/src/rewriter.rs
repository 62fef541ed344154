// SPDX-License-Identifier: GPL-3.0-or-later

//! Tag rewriting against a matched catalog record.
//!
//! A fixed sequence: clear stale fields, overwrite the textual fields with
//! the authoritative values, then fetch and attach the best-resolution
//! cover. No merging — the record wins wholesale.

use crate::ports::{Catalog, TagStore};
use retag_catalog::CatalogError;
use retag_domain::{CandidateTrack, CoverImage};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("record \"{track}\" has no usable cover art variant")]
    NoCoverArt { track: String },

    #[error("cover download failed: {0}")]
    Download(#[from] CatalogError),
}

/// Pick the cover variant with the strictly largest width.
///
/// Starts from a zero-width sentinel, so ties keep the first-seen variant
/// and zero-width entries are never selected. `None` means the record has
/// nothing worth downloading.
pub fn largest_cover(images: &[CoverImage]) -> Option<&CoverImage> {
    let mut best: Option<&CoverImage> = None;
    for image in images {
        if image.width > best.map_or(0, |b| b.width) {
            best = Some(image);
        }
    }
    best
}

/// Rewrite `store` to match `track`, downloading the cover via `catalog`.
///
/// Stale artist, album-artist, and picture fields are deleted first so no
/// orphaned multi-valued frames survive from a prior tagging pass. The
/// release date is written as the record's raw string. The caller flushes
/// afterwards; nothing here touches disk.
pub async fn rewrite<C, S>(store: &mut S, catalog: &C, track: &CandidateTrack) -> Result<(), RewriteError>
where
    C: Catalog + ?Sized,
    S: TagStore + ?Sized,
{
    store.remove_artist();
    store.remove_album_artist();
    store.remove_cover_art();

    store.set_title(&track.name);
    store.set_artist(&track.artist_line());
    store.set_album(&track.album.name);
    store.set_release_date(&track.album.release_date);

    let cover = largest_cover(&track.album.images).ok_or_else(|| RewriteError::NoCoverArt {
        track: track.to_string(),
    })?;

    debug!(
        target: "rewriter",
        url = %cover.url,
        width = cover.width,
        "selected cover variant"
    );

    let payload = catalog.fetch_image(&cover.url).await?;
    debug!(target: "rewriter", bytes = payload.len(), "attaching front cover");
    store.attach_front_cover(payload);

    Ok(())
}
