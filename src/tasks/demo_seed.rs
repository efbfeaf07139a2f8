use std::path::Path;

use chrono::{Datelike, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::entities::{artist, user};
use crate::db::repositories::{
    clear_generated_data, AlbumRepository, ArtistRepository, EngagementRepository, NewAlbum,
    NewArtist, NewTrack, PlaylistRepository, TrackRepository, UserRepository,
};
use crate::error::{Result, SeedError};
use crate::fixtures::{FixtureSet, DEMO_EMAIL_SUFFIX, DUMMY_PASSWORD_HASH};
use crate::metadata::{self, DurationPolicy};
use crate::scanner::{self, AlbumFolder};

const DURATION_FALLBACK_RANGE: (u32, u32) = (150, 300);
const MAX_TRACK_LIKES: usize = 30;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub users_created: usize,
    pub artists_created: usize,
    pub albums_created: usize,
    pub tracks_added: usize,
    pub tracks_skipped: usize,
    pub playlists_created: usize,
    pub likes_created: usize,
    pub artist_follows_created: usize,
    pub album_follows_created: usize,
}

/// Reset and repopulate the demo environment.
///
/// Every immediate subdirectory of `music_dir` becomes an album, assigned
/// round-robin to the fixture artists. Previously generated data is cleared
/// first, so re-running converges instead of accumulating duplicates.
pub async fn run_demo_seed(
    db: &DatabaseConnection,
    music_dir: &Path,
    base_url: &str,
    fixtures: &FixtureSet,
) -> Result<DemoSummary> {
    fixtures.validate()?;

    // Fail preconditions before mutating anything.
    let folders = scanner::collect_album_folders(music_dir)?;
    if folders.iter().all(|f| f.tracks.is_empty()) {
        return Err(SeedError::NoAlbumFolders(music_dir.to_path_buf()));
    }

    tracing::info!("Clearing previously generated demo data");
    clear_generated_data(db, DEMO_EMAIL_SUFFIX).await?;

    let users_repo = UserRepository::new(db.clone());
    let artists_repo = ArtistRepository::new(db.clone());
    let albums_repo = AlbumRepository::new(db.clone());
    let tracks_repo = TrackRepository::new(db.clone());
    let playlists_repo = PlaylistRepository::new(db.clone());
    let engagement = EngagementRepository::new(db.clone());

    let mut summary = DemoSummary::default();

    // Regular listener accounts
    let mut listeners: Vec<user::Model> = Vec::new();
    for fixture in &fixtures.users {
        let listener = users_repo
            .create(
                &fixture.display_name,
                &fixture.username,
                &fixture.email,
                DUMMY_PASSWORD_HASH,
                false,
            )
            .await?;
        tracing::info!("Created user: {}", listener.display_name);
        listeners.push(listener);
    }
    summary.users_created = listeners.len();

    // Fixture artists, each backed by a user account
    let mut artist_models: Vec<artist::Model> = Vec::new();
    for fixture in &fixtures.artists {
        let username = fixture.username();
        let account = users_repo
            .create(
                &fixture.name,
                &username,
                &fixture.email(),
                DUMMY_PASSWORD_HASH,
                true,
            )
            .await?;

        let (artist, created) = artists_repo
            .find_or_create(
                &fixture.name,
                NewArtist {
                    user_id: Some(account.id),
                    genre: Some(fixture.genre.clone()),
                    bio: Some(fixture.bio.clone()),
                    social_links: vec![
                        format!("https://instagram.com/{username}"),
                        format!("https://twitter.com/{username}"),
                    ],
                    picture_url: Some(format!("{base_url}/images/artists/{username}.jpg")),
                },
            )
            .await?;
        if created {
            tracing::info!("Created artist: {} ({})", artist.name, fixture.genre);
            summary.artists_created += 1;
        }
        artist_models.push(artist);
    }

    // Albums and tracks from the folder layout
    let mut all_track_ids: Vec<Uuid> = Vec::new();
    let mut album_ids: Vec<Uuid> = Vec::new();
    for (idx, folder) in folders.iter().enumerate() {
        if folder.tracks.is_empty() {
            tracing::warn!("Skipping empty album folder: {}", folder.name);
            continue;
        }

        let artist = &artist_models[idx % artist_models.len()];
        tracing::info!(
            "Processing album '{}' ({} tracks) for {}",
            folder.name,
            folder.tracks.len(),
            artist.name
        );

        let days_ago = rand::thread_rng().gen_range(365..=3650);
        let release_date = Utc::now() - Duration::days(days_ago);
        let slug = folder.name.to_lowercase().replace(' ', "-");

        let (album, created) = albums_repo
            .find_or_create(
                &folder.name,
                artist.id,
                NewAlbum {
                    release_year: Some(release_date.year()),
                    release_date: Some(release_date.into()),
                    cover_art_url: Some(format!("{base_url}/images/albums/{slug}.jpg")),
                },
            )
            .await?;
        if created {
            summary.albums_created += 1;
        }
        album_ids.push(album.id);

        for (position, file) in folder.tracks.iter().enumerate() {
            match seed_demo_track(
                &tracks_repo,
                folder,
                file,
                base_url,
                artist.id,
                album.id,
                position as i32 + 1,
            )
            .await
            {
                Ok(Some(track_id)) => {
                    all_track_ids.push(track_id);
                    summary.tracks_added += 1;
                }
                Ok(None) => summary.tracks_skipped += 1,
                Err(err) => {
                    tracing::warn!("Failed to process {}: {}", file.display(), err);
                    summary.tracks_skipped += 1;
                }
            }
        }
    }

    // Playlists with random track selections
    let mut rng = rand::thread_rng();
    for fixture in &fixtures.playlists {
        let owner = &listeners[fixture.owner_index];
        let slug = fixture.title.to_lowercase().replace(' ', "-");
        let playlist = playlists_repo
            .create(
                &fixture.title,
                owner.id,
                &fixture.description,
                fixture.is_public,
                Some(format!("{base_url}/images/playlists/{slug}.jpg")),
            )
            .await?;
        tracing::info!("Created playlist: {}", playlist.title);
        summary.playlists_created += 1;

        let hi = all_track_ids.len().min(15);
        if hi == 0 {
            continue;
        }
        let num_tracks = rng.gen_range(5.min(hi)..=hi);
        let selected: Vec<Uuid> = all_track_ids
            .choose_multiple(&mut rng, num_tracks)
            .copied()
            .collect();
        for (position, track_id) in selected.into_iter().enumerate() {
            playlists_repo
                .add_track_if_absent(playlist.id, track_id, position as i32, Some(owner.id))
                .await?;
        }
    }

    // Random likes; duplicate picks simply do not insert
    for _ in 0..MAX_TRACK_LIKES.min(all_track_ids.len()) {
        let user_id = listeners.choose(&mut rng).map(|u| u.id);
        let track_id = all_track_ids.choose(&mut rng).copied();
        if let (Some(user_id), Some(track_id)) = (user_id, track_id) {
            if engagement.like_track_if_absent(user_id, track_id).await? {
                summary.likes_created += 1;
            }
        }
    }

    // Every artist gets a few followers
    for artist in &artist_models {
        let num_followers = rng.gen_range(2..=4usize.min(listeners.len()).max(2));
        let followers: Vec<Uuid> = listeners
            .choose_multiple(&mut rng, num_followers.min(listeners.len()))
            .map(|u| u.id)
            .collect();
        for user_id in followers {
            if engagement.follow_artist_if_absent(user_id, artist.id).await? {
                summary.artist_follows_created += 1;
            }
        }
    }

    // And every album
    for album_id in &album_ids {
        let num_followers = rng.gen_range(1..=3usize.min(listeners.len()).max(1));
        let followers: Vec<Uuid> = listeners
            .choose_multiple(&mut rng, num_followers.min(listeners.len()))
            .map(|u| u.id)
            .collect();
        for user_id in followers {
            if engagement.follow_album_if_absent(user_id, *album_id).await? {
                summary.album_follows_created += 1;
            }
        }
    }

    tracing::info!(
        "Demo seed finished: {} tracks added, {} skipped",
        summary.tracks_added,
        summary.tracks_skipped
    );
    Ok(summary)
}

async fn seed_demo_track(
    tracks_repo: &TrackRepository,
    folder: &AlbumFolder,
    file: &Path,
    base_url: &str,
    artist_id: Uuid,
    album_id: Uuid,
    position: i32,
) -> Result<Option<Uuid>> {
    let raw = metadata::read_raw_tag(file)?;
    let (lo, hi) = DURATION_FALLBACK_RANGE;
    let resolved = metadata::resolve_track(&raw, file, DurationPolicy::RandomRange(lo, hi));

    if !resolved.is_complete() {
        tracing::info!("Skipped (no usable title): {}", file.display());
        return Ok(None);
    }

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let track = tracks_repo
        .create(NewTrack {
            title: resolved.title,
            artist_id,
            album_id,
            duration_secs: resolved.duration_secs as i32,
            track_number: Some(position),
            genre: Some(resolved.genre),
            audio_url: Some(audio_url(base_url, &folder.name, &file_name)),
            file_path: Some(file.to_string_lossy().into_owned()),
            file_hash: None,
        })
        .await?;

    tracing::info!(
        "Track {}: {} ({}s)",
        position,
        track.title,
        track.duration_secs
    );
    Ok(Some(track.id))
}

/// Build the HTTP path for a track file. The album folder and file name are
/// percent-encoded as separate segments so the `/` between them survives.
pub fn audio_url(base_url: &str, album_folder: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(album_folder),
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::audio_url;

    #[test]
    fn encodes_spaces_in_both_segments() {
        assert_eq!(
            audio_url("http://localhost:5000/Music", "Night Tapes", "01 First Light.mp3"),
            "http://localhost:5000/Music/Night%20Tapes/01%20First%20Light.mp3"
        );
    }

    #[test]
    fn encodes_special_characters() {
        let url = audio_url("http://localhost:5000/Music", "R&B Hits", "A#1?.mp3");
        assert_eq!(url, "http://localhost:5000/Music/R%26B%20Hits/A%231%3F.mp3");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        assert_eq!(
            audio_url("http://localhost:5000/Music/", "Album", "x.mp3"),
            "http://localhost:5000/Music/Album/x.mp3"
        );
    }
}
