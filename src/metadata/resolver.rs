use std::path::Path;

use rand::Rng;

use super::reader::RawTag;

/// Suffix some download tools append to filenames; stripped before the
/// filename is used as a title source.
pub const SUFFIX_TOKEN: &str = "_SPOTISAVER";

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// What to use for a track's duration when the tag has none (or a
/// non-positive one). Library seeding pins a fixed value, demo seeding
/// picks a random plausible length.
#[derive(Debug, Clone, Copy)]
pub enum DurationPolicy {
    Fixed(u32),
    RandomRange(u32, u32),
}

impl DurationPolicy {
    fn fallback(&self) -> u32 {
        match self {
            Self::Fixed(secs) => *secs,
            Self::RandomRange(lo, hi) => rand::thread_rng().gen_range(*lo..=*hi),
        }
    }
}

/// Normalized metadata for one audio file, every field either populated or
/// explicitly absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: Option<i32>,
    pub track_number: Option<i32>,
    pub duration_secs: u32,
}

impl ResolvedTrack {
    /// Completeness gate: a record without a usable title or artist is
    /// rejected before persistence rather than stored half-filled.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && self.title != UNKNOWN && !self.artist.is_empty()
    }
}

/// Reconcile embedded tag data with filename conventions.
///
/// The filename stem is always the starting point for the title; a non-empty
/// embedded title tag overrides it.
pub fn resolve_track(raw: &RawTag, path: &Path, duration: DurationPolicy) -> ResolvedTrack {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let title = match non_empty(raw.title.as_deref()) {
        Some(tag_title) => tag_title.to_string(),
        None => title_from_stem(&stem),
    };

    let duration_secs = match raw.duration_secs {
        Some(secs) if secs > 0 => secs,
        _ => duration.fallback(),
    };

    ResolvedTrack {
        title,
        artist: non_empty(raw.artist.as_deref())
            .unwrap_or(UNKNOWN_ARTIST)
            .to_string(),
        album: non_empty(raw.album.as_deref())
            .unwrap_or(UNKNOWN_ALBUM)
            .to_string(),
        genre: non_empty(raw.genre.as_deref()).unwrap_or(UNKNOWN).to_string(),
        year: parse_int_field(raw.year.as_deref()),
        track_number: parse_int_field(raw.track.as_deref()),
        duration_secs,
    }
}

/// Derive a title from a filename stem: strip the recognized suffix token,
/// then keep what follows the first `" - "` separator ("Artist - Title").
pub fn title_from_stem(stem: &str) -> String {
    let stem = stem.replace(SUFFIX_TOKEN, "");
    let stem = stem.trim();

    match stem.split_once(" - ") {
        Some((_, rest)) => rest.trim().to_string(),
        None => stem.to_string(),
    }
}

/// Validated integer parse for tag fields like year and track number.
///
/// Accepts only text that is all ASCII digits after trimming; anything else
/// ("unknown", "3/12", "") is absent, never zero and never an error.
pub fn parse_int_field(value: Option<&str>) -> Option<i32> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(raw: &RawTag, file_name: &str) -> ResolvedTrack {
        let path = PathBuf::from("/music/Test Album").join(file_name);
        resolve_track(raw, &path, DurationPolicy::Fixed(180))
    }

    #[test]
    fn tag_title_wins_over_filename() {
        let raw = RawTag {
            title: Some("  Actual Title  ".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&raw, "Someone - Something Else.mp3");
        assert_eq!(resolved.title, "Actual Title");
    }

    #[test]
    fn empty_tag_title_falls_back_to_filename() {
        let raw = RawTag {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&raw, "Midnight Drive.mp3");
        assert_eq!(resolved.title, "Midnight Drive");
    }

    #[test]
    fn filename_with_artist_prefix_and_suffix_token() {
        let resolved = resolve(
            &RawTag::default(),
            "Max Thunder - Midnight Drive_SPOTISAVER.mp3",
        );
        assert_eq!(resolved.title, "Midnight Drive");
    }

    #[test]
    fn filename_without_separator_uses_full_stem() {
        let resolved = resolve(&RawTag::default(), "Midnight Drive.mp3");
        assert_eq!(resolved.title, "Midnight Drive");
    }

    #[test]
    fn only_first_separator_splits() {
        let resolved = resolve(&RawTag::default(), "A - B - C.mp3");
        assert_eq!(resolved.title, "B - C");
    }

    #[test]
    fn missing_artist_album_genre_get_placeholders() {
        let resolved = resolve(&RawTag::default(), "Song.mp3");
        assert_eq!(resolved.artist, UNKNOWN_ARTIST);
        assert_eq!(resolved.album, UNKNOWN_ALBUM);
        assert_eq!(resolved.genre, UNKNOWN);
    }

    #[test]
    fn year_with_trailing_whitespace_parses() {
        assert_eq!(parse_int_field(Some("2019 ")), Some(2019));
    }

    #[test]
    fn non_numeric_year_is_absent() {
        assert_eq!(parse_int_field(Some("unknown")), None);
        assert_eq!(parse_int_field(Some("")), None);
        assert_eq!(parse_int_field(Some("3/12")), None);
        assert_eq!(parse_int_field(None), None);
    }

    #[test]
    fn tag_duration_is_kept_when_positive() {
        let raw = RawTag {
            duration_secs: Some(215),
            ..Default::default()
        };
        let resolved = resolve(&raw, "Song.mp3");
        assert_eq!(resolved.duration_secs, 215);
    }

    #[test]
    fn zero_duration_uses_fallback() {
        let raw = RawTag {
            duration_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve(&raw, "Song.mp3");
        assert_eq!(resolved.duration_secs, 180);
    }

    #[test]
    fn random_duration_fallback_stays_in_range() {
        for _ in 0..50 {
            let resolved = resolve_track(
                &RawTag::default(),
                &PathBuf::from("Song.mp3"),
                DurationPolicy::RandomRange(150, 300),
            );
            assert!((150..=300).contains(&resolved.duration_secs));
        }
    }

    #[test]
    fn unknown_title_fails_the_completeness_gate() {
        let raw = RawTag {
            title: Some(UNKNOWN.to_string()),
            artist: Some("Nova Sky".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&raw, "Unknown.mp3");
        assert!(!resolved.is_complete());
    }

    #[test]
    fn complete_record_passes_the_gate() {
        let raw = RawTag {
            title: Some("Midnight Drive".to_string()),
            artist: Some("Nova Sky".to_string()),
            ..Default::default()
        };
        assert!(resolve(&raw, "x.mp3").is_complete());
    }
}
