// SPDX-License-Identifier: GPL-3.0-or-later

//! Trait seams between the core and its collaborators.
//!
//! The matcher and rewriter are written against these traits so tests can
//! inject fakes without network access or real audio files.

use async_trait::async_trait;
use retag_catalog::{CatalogClient, CatalogError, Session};
use retag_domain::CandidateTrack;
use retag_tagfile::{TagDocument, TagError};

/// Remote catalog capability: one-page track search and image download.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CandidateTrack>, CatalogError>;

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

/// The narrow tag mutation surface the rewriter consumes.
pub trait TagStore {
    fn remove_artist(&mut self);
    fn remove_album_artist(&mut self);
    fn remove_cover_art(&mut self);
    fn set_title(&mut self, title: &str);
    fn set_artist(&mut self, artist: &str);
    fn set_album(&mut self, album: &str);
    fn set_release_date(&mut self, raw: &str);
    fn attach_front_cover(&mut self, payload: Vec<u8>);
    fn save(&mut self) -> Result<(), TagError>;
}

impl TagStore for TagDocument {
    fn remove_artist(&mut self) {
        TagDocument::remove_artist(self);
    }

    fn remove_album_artist(&mut self) {
        TagDocument::remove_album_artist(self);
    }

    fn remove_cover_art(&mut self) {
        TagDocument::remove_cover_art(self);
    }

    fn set_title(&mut self, title: &str) {
        TagDocument::set_title(self, title);
    }

    fn set_artist(&mut self, artist: &str) {
        TagDocument::set_artist(self, artist);
    }

    fn set_album(&mut self, album: &str) {
        TagDocument::set_album(self, album);
    }

    fn set_release_date(&mut self, raw: &str) {
        TagDocument::set_release_date(self, raw);
    }

    fn attach_front_cover(&mut self, payload: Vec<u8>) {
        TagDocument::attach_front_cover(self, payload);
    }

    fn save(&mut self) -> Result<(), TagError> {
        TagDocument::save(self)
    }
}

/// A [`CatalogClient`] paired with the explicit [`Session`] it authenticated.
///
/// This is the only place the session lives; nothing is cached globally.
pub struct CatalogSession {
    client: CatalogClient,
    session: Session,
}

impl CatalogSession {
    pub fn new(client: CatalogClient, session: Session) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl Catalog for CatalogSession {
    async fn search_tracks(&self, query: &str) -> Result<Vec<CandidateTrack>, CatalogError> {
        self.client.search_tracks(&self.session, query).await
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.client.fetch_image(url).await
    }
}
