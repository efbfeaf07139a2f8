use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::db::entities::{
    album, album_follower, artist, artist_follower, playlist, playlist_track, track, track_like,
    user,
};
use crate::error::Result;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        display_name: &str,
        username: &str,
        email: &str,
        password_hash: &str,
        is_artist: bool,
    ) -> Result<user::Model> {
        let now = Utc::now().into();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            display_name: Set(display_name.to_string()),
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            is_artist: Set(is_artist),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(new_user.insert(&self.db).await?)
    }
}

/// New-artist attributes beyond the identifying name.
#[derive(Debug, Default, Clone)]
pub struct NewArtist {
    pub user_id: Option<Uuid>,
    pub genre: Option<String>,
    pub bio: Option<String>,
    pub social_links: Vec<String>,
    pub picture_url: Option<String>,
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(artist::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// Look up an artist by exact name, creating it on first sighting.
    /// The bool reports whether an insert occurred.
    pub async fn find_or_create(
        &self,
        name: &str,
        details: NewArtist,
    ) -> Result<(artist::Model, bool)> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok((existing, false));
        }

        let social_links = if details.social_links.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&details.social_links)?)
        };

        let now = Utc::now().into();
        let new_artist = artist::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            user_id: Set(details.user_id),
            genre: Set(details.genre),
            bio: Set(details.bio),
            social_links: Set(social_links),
            picture_url: Set(details.picture_url),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok((new_artist.insert(&self.db).await?, true))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(artist::Entity::find().count(&self.db).await?)
    }
}

/// New-album attributes beyond the identifying (title, artist) pair.
#[derive(Debug, Default, Clone)]
pub struct NewAlbum {
    pub release_year: Option<i32>,
    pub release_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub cover_art_url: Option<String>,
}

pub struct AlbumRepository {
    db: DatabaseConnection,
}

impl AlbumRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_title_and_artist(
        &self,
        title: &str,
        artist_id: Uuid,
    ) -> Result<Option<album::Model>> {
        Ok(album::Entity::find()
            .filter(album::Column::Title.eq(title))
            .filter(album::Column::ArtistId.eq(artist_id))
            .one(&self.db)
            .await?)
    }

    /// An album is identified by (title, artist); same contract as the
    /// artist upsert.
    pub async fn find_or_create(
        &self,
        title: &str,
        artist_id: Uuid,
        details: NewAlbum,
    ) -> Result<(album::Model, bool)> {
        if let Some(existing) = self.find_by_title_and_artist(title, artist_id).await? {
            return Ok((existing, false));
        }

        let now = Utc::now().into();
        let new_album = album::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            artist_id: Set(artist_id),
            release_year: Set(details.release_year),
            release_date: Set(details.release_date),
            cover_art_url: Set(details.cover_art_url),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok((new_album.insert(&self.db).await?, true))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(album::Entity::find().count(&self.db).await?)
    }
}

/// Everything needed to persist one track row.
#[derive(Debug, Clone)]
pub struct NewTrack {
    pub title: String,
    pub artist_id: Uuid,
    pub album_id: Uuid,
    pub duration_secs: i32,
    pub track_number: Option<i32>,
    pub genre: Option<String>,
    pub audio_url: Option<String>,
    pub file_path: Option<String>,
    pub file_hash: Option<String>,
}

pub struct TrackRepository {
    db: DatabaseConnection,
}

impl TrackRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists_with_hash(&self, file_hash: &str) -> Result<bool> {
        let count = track::Entity::find()
            .filter(track::Column::FileHash.eq(file_hash))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, new_track: NewTrack) -> Result<track::Model> {
        let now = Utc::now().into();
        let model = track::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_track.title),
            artist_id: Set(new_track.artist_id),
            album_id: Set(new_track.album_id),
            duration_secs: Set(new_track.duration_secs),
            track_number: Set(new_track.track_number),
            genre: Set(new_track.genre),
            audio_url: Set(new_track.audio_url),
            file_path: Set(new_track.file_path),
            file_hash: Set(new_track.file_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Insert a track unless one with the same content fingerprint already
    /// exists; `None` means the insert was skipped.
    pub async fn insert_if_new(&self, new_track: NewTrack) -> Result<Option<track::Model>> {
        if let Some(hash) = &new_track.file_hash {
            if self.exists_with_hash(hash).await? {
                return Ok(None);
            }
        }
        Ok(Some(self.create(new_track).await?))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(track::Entity::find().count(&self.db).await?)
    }
}

pub struct PlaylistRepository {
    db: DatabaseConnection,
}

impl PlaylistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        owner_id: Uuid,
        description: &str,
        is_public: bool,
        cover_image_url: Option<String>,
    ) -> Result<playlist::Model> {
        let now = Utc::now().into();
        let new_playlist = playlist::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            owner_id: Set(owner_id),
            description: Set(Some(description.to_string())),
            is_public: Set(is_public),
            cover_image_url: Set(cover_image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(new_playlist.insert(&self.db).await?)
    }

    /// Append a track to a playlist unless it is already on it. Returns
    /// whether an insert occurred.
    pub async fn add_track_if_absent(
        &self,
        playlist_id: Uuid,
        track_id: Uuid,
        position: i32,
        added_by: Option<Uuid>,
    ) -> Result<bool> {
        let exists = playlist_track::Entity::find()
            .filter(playlist_track::Column::PlaylistId.eq(playlist_id))
            .filter(playlist_track::Column::TrackId.eq(track_id))
            .count(&self.db)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        let entry = playlist_track::ActiveModel {
            id: Set(Uuid::new_v4()),
            playlist_id: Set(playlist_id),
            track_id: Set(track_id),
            position: Set(position),
            added_by: Set(added_by),
            added_at: Set(Utc::now().into()),
        };
        entry.insert(&self.db).await?;
        Ok(true)
    }
}

/// Like and follower edges share the same insert-if-absent contract: the
/// caller learns whether an edge was created instead of catching a
/// uniqueness violation.
pub struct EngagementRepository {
    db: DatabaseConnection,
}

impl EngagementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn like_track_if_absent(&self, user_id: Uuid, track_id: Uuid) -> Result<bool> {
        let exists = track_like::Entity::find()
            .filter(track_like::Column::UserId.eq(user_id))
            .filter(track_like::Column::TrackId.eq(track_id))
            .count(&self.db)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        let like = track_like::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            track_id: Set(track_id),
            liked_at: Set(Utc::now().into()),
        };
        like.insert(&self.db).await?;
        Ok(true)
    }

    pub async fn follow_artist_if_absent(&self, user_id: Uuid, artist_id: Uuid) -> Result<bool> {
        let exists = artist_follower::Entity::find()
            .filter(artist_follower::Column::UserId.eq(user_id))
            .filter(artist_follower::Column::ArtistId.eq(artist_id))
            .count(&self.db)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        let follower = artist_follower::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            artist_id: Set(artist_id),
            followed_at: Set(Utc::now().into()),
        };
        follower.insert(&self.db).await?;
        Ok(true)
    }

    pub async fn follow_album_if_absent(&self, user_id: Uuid, album_id: Uuid) -> Result<bool> {
        let exists = album_follower::Entity::find()
            .filter(album_follower::Column::UserId.eq(user_id))
            .filter(album_follower::Column::AlbumId.eq(album_id))
            .count(&self.db)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        let follower = album_follower::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            album_id: Set(album_id),
            followed_at: Set(Utc::now().into()),
        };
        follower.insert(&self.db).await?;
        Ok(true)
    }

    pub async fn like_count(&self) -> Result<u64> {
        Ok(track_like::Entity::find().count(&self.db).await?)
    }

    pub async fn artist_follower_count(&self) -> Result<u64> {
        Ok(artist_follower::Entity::find().count(&self.db).await?)
    }

    pub async fn album_follower_count(&self) -> Result<u64> {
        Ok(album_follower::Entity::find().count(&self.db).await?)
    }
}

/// Wipe everything a previous demo run generated, children before parents
/// so foreign keys stay satisfied. Real user accounts are preserved.
pub async fn clear_generated_data(db: &DatabaseConnection, demo_email_suffix: &str) -> Result<()> {
    playlist_track::Entity::delete_many().exec(db).await?;
    track_like::Entity::delete_many().exec(db).await?;
    artist_follower::Entity::delete_many().exec(db).await?;
    album_follower::Entity::delete_many().exec(db).await?;
    playlist::Entity::delete_many().exec(db).await?;
    track::Entity::delete_many().exec(db).await?;
    album::Entity::delete_many().exec(db).await?;
    artist::Entity::delete_many().exec(db).await?;
    user::Entity::delete_many()
        .filter(user::Column::Email.ends_with(demo_email_suffix))
        .exec(db)
        .await?;
    Ok(())
}
