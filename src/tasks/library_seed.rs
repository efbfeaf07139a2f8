use std::path::Path;

use sea_orm::DatabaseConnection;

use crate::db::repositories::{
    AlbumRepository, ArtistRepository, NewAlbum, NewArtist, NewTrack, TrackRepository,
};
use crate::error::Result;
use crate::fingerprint;
use crate::metadata::{self, DurationPolicy};
use crate::scanner;

/// Duration used when a tag carries no usable length.
const DURATION_FALLBACK_SECS: u32 = 180;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LibrarySummary {
    pub files_found: usize,
    pub tracks_added: usize,
    pub tracks_skipped: usize,
    pub artists_created: usize,
    pub albums_created: usize,
}

enum FileOutcome {
    Added {
        artist_created: bool,
        album_created: bool,
    },
    DuplicateContent,
    Incomplete,
}

/// Seed the library from every `.mp3` under `music_dir`, recursively.
///
/// Safe to re-run over the same file set: artists and albums dedup by name,
/// tracks dedup by content fingerprint. A file that cannot be processed is
/// logged, counted as skipped, and never halts the batch.
pub async fn run_library_seed(db: &DatabaseConnection, music_dir: &Path) -> Result<LibrarySummary> {
    let files = scanner::collect_mp3_files(music_dir)?;
    tracing::info!("Found {} MP3 files under {}", files.len(), music_dir.display());

    let artists = ArtistRepository::new(db.clone());
    let albums = AlbumRepository::new(db.clone());
    let tracks = TrackRepository::new(db.clone());

    let mut summary = LibrarySummary {
        files_found: files.len(),
        ..Default::default()
    };

    for file in &files {
        match seed_file(&artists, &albums, &tracks, file).await {
            Ok(FileOutcome::Added {
                artist_created,
                album_created,
            }) => {
                summary.tracks_added += 1;
                if artist_created {
                    summary.artists_created += 1;
                }
                if album_created {
                    summary.albums_created += 1;
                }
            }
            Ok(FileOutcome::DuplicateContent) => {
                tracing::debug!("Already seeded: {}", file.display());
                summary.tracks_skipped += 1;
            }
            Ok(FileOutcome::Incomplete) => {
                tracing::info!("Skipped (no title/artist): {}", file.display());
                summary.tracks_skipped += 1;
            }
            Err(err) => {
                tracing::warn!("Failed to process {}: {}", file.display(), err);
                summary.tracks_skipped += 1;
            }
        }
    }

    tracing::info!(
        "Library seed finished: {} added, {} skipped",
        summary.tracks_added,
        summary.tracks_skipped
    );
    Ok(summary)
}

async fn seed_file(
    artists: &ArtistRepository,
    albums: &AlbumRepository,
    tracks: &TrackRepository,
    file: &Path,
) -> Result<FileOutcome> {
    let raw = metadata::read_raw_tag(file)?;
    let resolved =
        metadata::resolve_track(&raw, file, DurationPolicy::Fixed(DURATION_FALLBACK_SECS));

    if !resolved.is_complete() {
        return Ok(FileOutcome::Incomplete);
    }

    // Fingerprint before touching artist/album so a duplicate file creates
    // nothing at all.
    let file_hash = fingerprint::file_fingerprint(file)?;
    if tracks.exists_with_hash(&file_hash).await? {
        return Ok(FileOutcome::DuplicateContent);
    }

    let (artist, artist_created) = artists
        .find_or_create(&resolved.artist, NewArtist::default())
        .await?;
    if artist_created {
        tracing::info!("Created artist: {}", artist.name);
    }

    let (album, album_created) = albums
        .find_or_create(
            &resolved.album,
            artist.id,
            NewAlbum {
                release_year: resolved.year,
                ..Default::default()
            },
        )
        .await?;
    if album_created {
        tracing::info!("Created album: {}", album.title);
    }

    let inserted = tracks
        .insert_if_new(NewTrack {
            title: resolved.title.clone(),
            artist_id: artist.id,
            album_id: album.id,
            duration_secs: resolved.duration_secs as i32,
            track_number: resolved.track_number,
            genre: Some(resolved.genre),
            audio_url: None,
            file_path: Some(file.to_string_lossy().into_owned()),
            file_hash: Some(file_hash),
        })
        .await?;

    match inserted {
        Some(track) => {
            tracing::info!(
                "Added: {} - {} [{}s]",
                track.title,
                artist.name,
                track.duration_secs
            );
            Ok(FileOutcome::Added {
                artist_created,
                album_created,
            })
        }
        None => Ok(FileOutcome::DuplicateContent),
    }
}
