// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared domain types for the retag pipeline.
//!
//! These are plain data carriers: the catalog crate maps wire responses into
//! them, the application crate scores and consumes them. No I/O lives here.

use serde::{Deserialize, Serialize};

/// One variant of a record's cover art.
///
/// The catalog returns several resolutions of the same artwork; `width`
/// drives the rewriter's pick of the best one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImage {
    /// Retrieval URL for the image payload.
    pub url: String,
    /// Pixel width of this variant.
    pub width: u32,
    /// Pixel height of this variant.
    pub height: u32,
}

/// Album summary attached to a candidate track.
///
/// `release_date` is the catalog's raw string (`YYYY`, `YYYY-MM`, or
/// `YYYY-MM-DD`) and is written to tags verbatim, never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    pub release_date: String,
    /// Cover variants in the order the catalog returned them.
    pub images: Vec<CoverImage>,
}

/// A track record returned by the catalog for a search query.
///
/// Immutable once received. The `Default` value doubles as the matcher's
/// zero-valued sentinel: empty id/name, no artists, no album data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    /// Opaque catalog identifier.
    pub id: String,
    /// Display name of the track.
    pub name: String,
    /// Artist names in credited order.
    pub artists: Vec<String>,
    pub album: AlbumRef,
}

impl CandidateTrack {
    /// Artist names joined with comma-space, in credited order.
    ///
    /// This is both the display form and the artist string written to tags.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

impl std::fmt::Display for CandidateTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist_line(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_line_joins_with_comma_space() {
        let track = CandidateTrack {
            artists: vec!["Daft Punk".into(), "Pharrell Williams".into()],
            ..Default::default()
        };
        assert_eq!(track.artist_line(), "Daft Punk, Pharrell Williams");
    }

    #[test]
    fn artist_line_single_artist_has_no_separator() {
        let track = CandidateTrack {
            artists: vec!["Aphex Twin".into()],
            ..Default::default()
        };
        assert_eq!(track.artist_line(), "Aphex Twin");
    }

    #[test]
    fn default_track_is_the_zero_sentinel() {
        let track = CandidateTrack::default();
        assert!(track.id.is_empty());
        assert!(track.name.is_empty());
        assert!(track.artists.is_empty());
        assert!(track.album.images.is_empty());
        assert_eq!(track.artist_line(), "");
    }

    #[test]
    fn display_is_artist_dash_title() {
        let track = CandidateTrack {
            name: "Xtal".into(),
            artists: vec!["Aphex Twin".into()],
            ..Default::default()
        };
        assert_eq!(track.to_string(), "Aphex Twin - Xtal");
    }
}
