// SPDX-License-Identifier: GPL-3.0-or-later

//! Thin wrapper over `lofty` exposing the narrow tag mutation surface the
//! rewriter consumes: open, delete stale fields, set textual fields, attach
//! a front cover, save.
//!
//! One tag layer per file: the container's primary tag type (ID3v2 for MP3).
//! Other layers present in the file are left untouched.

use std::path::{Path, PathBuf};

use lofty::config::{ParseOptions, ParsingMode, WriteOptions};
use lofty::file::TaggedFile;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagType};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read tags from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("failed to write tags to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}

pub type Result<T> = std::result::Result<T, TagError>;

/// The in-memory tag document for one audio file.
///
/// Mutations are in-memory only until [`save`](TagDocument::save) flushes
/// them back to the file in one write. Dropping the document without saving
/// discards all changes.
pub struct TagDocument {
    path: PathBuf,
    file: TaggedFile,
    tag_type: TagType,
}

impl TagDocument {
    /// Open the file at `path` and load its primary tag.
    ///
    /// Files with no existing tag get an empty one of the primary type, so
    /// every returned document is writable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut file = Probe::open(&path)
            .map_err(|e| TagError::Read {
                path: path.clone(),
                source: e,
            })?
            .options(parse_options())
            .read()
            .map_err(|e| TagError::Read {
                path: path.clone(),
                source: e,
            })?;

        let tag_type = file.file_type().primary_tag_type();
        if file.tag(tag_type).is_none() {
            file.insert_tag(Tag::new(tag_type));
        }

        debug!(target: "tagfile", path = %path.display(), ?tag_type, "opened tag document");

        Ok(Self {
            path,
            file,
            tag_type,
        })
    }

    /// Delete all track-artist entries.
    pub fn remove_artist(&mut self) {
        self.tag_mut().remove_key(&ItemKey::TrackArtist);
    }

    /// Delete all album-artist entries.
    pub fn remove_album_artist(&mut self) {
        self.tag_mut().remove_key(&ItemKey::AlbumArtist);
    }

    /// Delete every embedded picture, regardless of its role.
    pub fn remove_cover_art(&mut self) {
        let tag = self.tag_mut();
        while !tag.pictures().is_empty() {
            tag.remove_picture(0);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.tag_mut().set_title(title.to_string());
    }

    pub fn set_artist(&mut self, artist: &str) {
        self.tag_mut().set_artist(artist.to_string());
    }

    pub fn set_album(&mut self, album: &str) {
        self.tag_mut().set_album(album.to_string());
    }

    /// Write the catalog's raw release-date string, unparsed.
    ///
    /// Written to both the recording-date and year keys; older ID3 readers
    /// only look at the latter. Vorbis Comments use DATE alone, where the
    /// secondary write would create a duplicate field.
    pub fn set_release_date(&mut self, raw: &str) {
        let tag_type = self.tag_type;
        let tag = self.tag_mut();
        tag.insert_text(ItemKey::RecordingDate, raw.to_string());
        if tag_type != TagType::VorbisComments {
            tag.insert_text(ItemKey::Year, raw.to_string());
        }
    }

    /// Attach `payload` as the front-cover picture.
    ///
    /// MIME type is fixed to `image/jpeg` and the description to "Cover",
    /// whatever the payload actually contains.
    pub fn attach_front_cover(&mut self, payload: Vec<u8>) {
        let picture = Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::Jpeg),
            Some("Cover".to_string()),
            payload,
        );
        self.tag_mut().push_picture(picture);
    }

    /// Flush the document back to its file.
    ///
    /// A failure here leaves the on-disk file in whatever state the
    /// container library's write primitive guarantees; there is no rollback.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone();
        self.tag()
            .save_to_path(&path, WriteOptions::default())
            .map_err(|e| TagError::Write { path, source: e })?;
        debug!(target: "tagfile", path = %self.path.display(), "saved tag document");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Read accessors, used by the pipeline for logging and by tests.

    pub fn title(&self) -> Option<String> {
        self.tag().title().map(|s| s.to_string())
    }

    pub fn artist(&self) -> Option<String> {
        self.tag().artist().map(|s| s.to_string())
    }

    pub fn album(&self) -> Option<String> {
        self.tag().album().map(|s| s.to_string())
    }

    pub fn release_date(&self) -> Option<String> {
        self.tag()
            .get_string(&ItemKey::RecordingDate)
            .map(|s| s.to_string())
    }

    pub fn picture_count(&self) -> usize {
        self.tag().pictures().len()
    }

    fn tag(&self) -> &Tag {
        self.file
            .tag(self.tag_type)
            .expect("primary tag inserted at open")
    }

    fn tag_mut(&mut self) -> &mut Tag {
        self.file
            .tag_mut(self.tag_type)
            .expect("primary tag inserted at open")
    }
}

fn parse_options() -> ParseOptions {
    // Cover art must be read so existing pictures survive a round-trip.
    ParseOptions::new()
        .read_cover_art(true)
        .parsing_mode(ParsingMode::BestAttempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::file::FileType;
    use lofty::properties::FileProperties;

    fn in_memory_document() -> TagDocument {
        let tag_type = FileType::Mpeg.primary_tag_type();
        let file = TaggedFile::new(
            FileType::Mpeg,
            FileProperties::default(),
            vec![Tag::new(tag_type)],
        );
        TagDocument {
            path: PathBuf::from("test.mp3"),
            file,
            tag_type,
        }
    }

    #[test]
    fn textual_setters_overwrite_previous_values() {
        let mut doc = in_memory_document();

        doc.set_title("Xtal");
        doc.set_artist("Aphex Twin");
        doc.set_album("Selected Ambient Works 85-92");
        doc.set_release_date("1992-11-09");

        doc.set_title("Pulsewidth");

        assert_eq!(doc.title().as_deref(), Some("Pulsewidth"));
        assert_eq!(doc.artist().as_deref(), Some("Aphex Twin"));
        assert_eq!(doc.album().as_deref(), Some("Selected Ambient Works 85-92"));
        assert_eq!(doc.release_date().as_deref(), Some("1992-11-09"));
    }

    #[test]
    fn release_date_is_stored_verbatim() {
        let mut doc = in_memory_document();
        doc.set_release_date("2001");
        assert_eq!(doc.release_date().as_deref(), Some("2001"));
    }

    #[test]
    fn remove_artist_clears_the_field() {
        let mut doc = in_memory_document();
        doc.set_artist("Stale Artist");
        doc.remove_artist();
        assert_eq!(doc.artist(), None);
    }

    #[test]
    fn remove_cover_art_clears_every_picture() {
        let mut doc = in_memory_document();
        doc.attach_front_cover(vec![1, 2, 3]);
        doc.attach_front_cover(vec![4, 5, 6]);
        assert_eq!(doc.picture_count(), 2);

        doc.remove_cover_art();
        assert_eq!(doc.picture_count(), 0);
    }

    #[test]
    fn attached_cover_is_front_cover_jpeg_with_fixed_description() {
        let mut doc = in_memory_document();
        doc.attach_front_cover(vec![0xFF, 0xD8, 0xFF]);

        let pictures = doc.tag().pictures();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].pic_type(), PictureType::CoverFront);
        assert_eq!(pictures[0].mime_type(), Some(&MimeType::Jpeg));
        assert_eq!(pictures[0].description(), Some("Cover"));
        assert_eq!(pictures[0].data(), &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn open_reports_unreadable_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.mp3");
        let result = TagDocument::open(&missing);
        assert!(matches!(result, Err(TagError::Read { .. })));
    }
}
