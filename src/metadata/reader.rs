use std::path::Path;

use id3::{ErrorKind, Tag, TagLike};

use crate::error::{Result, SeedError};

/// Raw frame values lifted out of an ID3 tag, before any normalization.
///
/// Year and track number stay as the frame's text so the resolver can apply
/// its validated digits-only parse instead of trusting whatever the tag
/// writer stored ("2019 ", "unknown", "3/12", ...).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub track: Option<String>,
    pub duration_secs: Option<u32>,
}

/// Read the ID3 tag of a single audio file.
///
/// A file without any tag yields an empty `RawTag` so the filename fallbacks
/// still apply; a corrupt or unreadable tag is an error for this file only
/// and the caller is expected to skip it and move on.
pub fn read_raw_tag(path: &Path) -> Result<RawTag> {
    let tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(err) if matches!(err.kind, ErrorKind::NoTag) => {
            err.partial_tag.unwrap_or_default()
        }
        Err(err) => {
            return Err(SeedError::TagRead {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };

    Ok(RawTag {
        title: tag.title().map(str::to_string),
        artist: tag.artist().map(str::to_string),
        album: tag.album().map(str::to_string),
        genre: tag.genre().map(str::to_string),
        year: text_frame(&tag, "TDRC").or_else(|| text_frame(&tag, "TYER")),
        track: text_frame(&tag, "TRCK"),
        // TLEN stores milliseconds
        duration_secs: tag.duration().map(|ms| ms / 1000),
    })
}

fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    tag.get(id)
        .and_then(|frame| frame.content().text())
        .map(str::to_string)
}
