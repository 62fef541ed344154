// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire models for the catalog API.
//!
//! These mirror the JSON the service actually returns; [`TrackItem`]
//! flattens into the domain [`CandidateTrack`] at the client boundary so
//! nothing downstream depends on the wire shape.

use retag_domain::{AlbumRef, CandidateTrack, CoverImage};
use serde::Deserialize;

/// Response of the client-credentials token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

/// Top-level search response; only the track page is requested.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

/// One page of track results. The client never paginates.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistItem>,
    pub album: AlbumItem,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistItem {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumItem {
    pub name: String,
    /// Raw date string (`YYYY`, `YYYY-MM`, or `YYYY-MM-DD`); kept verbatim.
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub images: Vec<ImageItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageItem {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl From<TrackItem> for CandidateTrack {
    fn from(item: TrackItem) -> Self {
        CandidateTrack {
            id: item.id,
            name: item.name,
            artists: item.artists.into_iter().map(|a| a.name).collect(),
            album: AlbumRef {
                name: item.album.name,
                release_date: item.album.release_date,
                images: item
                    .album
                    .images
                    .into_iter()
                    .map(|i| CoverImage {
                        url: i.url,
                        width: i.width,
                        height: i.height,
                    })
                    .collect(),
            },
        }
    }
}
