// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fakes for matcher/rewriter/pipeline tests.

use crate::ports::{Catalog, TagStore};
use async_trait::async_trait;
use retag_catalog::CatalogError;
use retag_domain::{AlbumRef, CandidateTrack, CoverImage};
use retag_tagfile::TagError;
use std::sync::Mutex;

/// Candidate with a name and artists only (no album data, no covers).
pub(crate) fn track(name: &str, artists: &[&str]) -> CandidateTrack {
    CandidateTrack {
        id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: AlbumRef::default(),
    }
}

/// Fully populated candidate, covers given as `(url, width)` pairs.
pub(crate) fn track_with_images(
    name: &str,
    artists: &[&str],
    album: &str,
    release_date: &str,
    images: &[(&str, u32)],
) -> CandidateTrack {
    let mut candidate = track(name, artists);
    candidate.album = AlbumRef {
        name: album.to_string(),
        release_date: release_date.to_string(),
        images: images
            .iter()
            .map(|(url, width)| CoverImage {
                url: url.to_string(),
                width: *width,
                height: *width,
            })
            .collect(),
    };
    candidate
}

/// In-memory catalog returning a fixed result page and image payload.
pub(crate) struct FakeCatalog {
    pub results: Vec<CandidateTrack>,
    pub image: Vec<u8>,
    pub fail_downloads: bool,
    queries: Mutex<Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_results(results: Vec<CandidateTrack>) -> Self {
        Self {
            results,
            image: vec![0xFF, 0xD8, 0xFF, 0xE0],
            fail_downloads: false,
            queries: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched lock").clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CandidateTrack>, CatalogError> {
        self.queries.lock().expect("queries lock").push(query.to_string());
        Ok(self.results.clone())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.fetched.lock().expect("fetched lock").push(url.to_string());
        if self.fail_downloads {
            return Err(CatalogError::NotFound(url.to_string()));
        }
        Ok(self.image.clone())
    }
}

/// Recording tag store; `removals` keeps the deletion order.
#[derive(Default)]
pub(crate) struct FakeTagStore {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub release_date: Option<String>,
    pub pictures: Vec<Vec<u8>>,
    pub removals: Vec<&'static str>,
    pub saves: usize,
}

impl TagStore for FakeTagStore {
    fn remove_artist(&mut self) {
        self.artist = None;
        self.removals.push("artist");
    }

    fn remove_album_artist(&mut self) {
        self.removals.push("album_artist");
    }

    fn remove_cover_art(&mut self) {
        self.pictures.clear();
        self.removals.push("cover_art");
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_artist(&mut self, artist: &str) {
        self.artist = Some(artist.to_string());
    }

    fn set_album(&mut self, album: &str) {
        self.album = Some(album.to_string());
    }

    fn set_release_date(&mut self, raw: &str) {
        self.release_date = Some(raw.to_string());
    }

    fn attach_front_cover(&mut self, payload: Vec<u8>) {
        self.pictures.push(payload);
    }

    fn save(&mut self) -> Result<(), TagError> {
        self.saves += 1;
        Ok(())
    }
}
