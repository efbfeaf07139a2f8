use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SeedError};

/// Placeholder bcrypt-shaped hash for demo accounts; nobody logs in as these.
pub const DUMMY_PASSWORD_HASH: &str =
    "$2b$10$dummyhashdummyhashdummyhashdummyhashdummyhash";

/// Generated demo accounts all live under this email domain so a reseed can
/// delete them without touching real users.
pub const DEMO_EMAIL_SUFFIX: &str = "@example.com";

#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub display_name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistFixture {
    pub name: String,
    pub genre: String,
    pub bio: String,
}

impl ArtistFixture {
    /// Username for the artist's backing user account: the display name
    /// lowercased with whitespace removed.
    pub fn username(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    pub fn email(&self) -> String {
        format!("{}{DEMO_EMAIL_SUFFIX}", self.username())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistFixture {
    pub title: String,
    pub description: String,
    pub is_public: bool,
    /// Index into `FixtureSet::users` naming the playlist owner.
    pub owner_index: usize,
}

/// The demo-data tables, supplied as configuration rather than hardcoded so
/// the fixture set can be swapped without touching resolver or upsert logic.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSet {
    pub users: Vec<UserFixture>,
    pub artists: Vec<ArtistFixture>,
    pub playlists: Vec<PlaylistFixture>,
}

impl FixtureSet {
    /// Load a fixture set from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let set: Self = serde_json::from_str(&raw)?;
        set.validate()?;
        Ok(set)
    }

    /// Every playlist owner index must point at a declared user, the user
    /// and artist lists must be non-empty for sampling to make sense, and
    /// usernames and emails must be unique across the whole set (artist
    /// accounts included) so the run cannot trip a unique index after it
    /// has started writing.
    pub fn validate(&self) -> Result<()> {
        if self.users.is_empty() {
            return Err(SeedError::InvalidFixtures(
                "fixture set declares no users".to_string(),
            ));
        }
        if self.artists.is_empty() {
            return Err(SeedError::InvalidFixtures(
                "fixture set declares no artists".to_string(),
            ));
        }

        let mut usernames = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.users {
            if !usernames.insert(user.username.clone()) {
                return Err(SeedError::InvalidFixtures(format!(
                    "duplicate username '{}'",
                    user.username
                )));
            }
            if !emails.insert(user.email.clone()) {
                return Err(SeedError::InvalidFixtures(format!(
                    "duplicate email '{}'",
                    user.email
                )));
            }
        }
        for artist in &self.artists {
            let username = artist.username();
            if !usernames.insert(username.clone()) {
                return Err(SeedError::InvalidFixtures(format!(
                    "artist '{}' needs username '{}', which is already taken",
                    artist.name, username
                )));
            }
            if !emails.insert(artist.email()) {
                return Err(SeedError::InvalidFixtures(format!(
                    "artist '{}' needs email '{}', which is already taken",
                    artist.name,
                    artist.email()
                )));
            }
        }

        for playlist in &self.playlists {
            if playlist.owner_index >= self.users.len() {
                return Err(SeedError::InvalidFixtures(format!(
                    "playlist '{}' names owner index {} but only {} users exist",
                    playlist.title,
                    playlist.owner_index,
                    self.users.len()
                )));
            }
        }
        Ok(())
    }
}

impl Default for FixtureSet {
    fn default() -> Self {
        let user = |display_name: &str, username: &str| UserFixture {
            display_name: display_name.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
        };
        let artist = |name: &str, genre: &str, bio: &str| ArtistFixture {
            name: name.to_string(),
            genre: genre.to_string(),
            bio: bio.to_string(),
        };
        let playlist = |title: &str, description: &str, is_public: bool, owner_index: usize| {
            PlaylistFixture {
                title: title.to_string(),
                description: description.to_string(),
                is_public,
                owner_index,
            }
        };

        Self {
            users: vec![
                user("John Smith", "johnsmith"),
                user("Sarah Johnson", "sarahjohnson"),
                user("Mike Wilson", "mikewilson"),
                user("Emily Davis", "emilydavis"),
            ],
            artists: vec![
                artist("Luna Rivers", "R&B", "Soulful voice with smooth melodies"),
                artist("Max Thunder", "Hip-Hop", "Bringing raw energy to every track"),
                artist("Aria Stone", "Pop", "Chart-topping hits and catchy hooks"),
                artist("Phoenix Blake", "Trap", "Trap beats with lyrical fire"),
                artist("Nova Sky", "Electronic", "Pushing boundaries of electronic music"),
            ],
            playlists: vec![
                playlist("Chill Vibes", "Perfect for relaxing and unwinding", true, 0),
                playlist("Workout Mix", "High energy tracks to keep you motivated", true, 1),
                playlist("Late Night Drives", "Smooth tracks for nighttime cruising", true, 2),
                playlist("Party Hits", "Get the party started with these bangers", false, 3),
                playlist("Study Session", "Focus music for productive studying", true, 0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_set_is_valid() {
        FixtureSet::default().validate().unwrap();
    }

    #[test]
    fn owner_index_out_of_range_is_rejected() {
        let mut set = FixtureSet::default();
        set.playlists[0].owner_index = 99;
        assert!(matches!(
            set.validate(),
            Err(SeedError::InvalidFixtures(_))
        ));
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let mut set = FixtureSet::default();
        set.users[1].username = set.users[0].username.clone();
        assert!(matches!(
            set.validate(),
            Err(SeedError::InvalidFixtures(_))
        ));
    }

    #[test]
    fn duplicate_emails_are_rejected() {
        let mut set = FixtureSet::default();
        set.users[1].email = set.users[0].email.clone();
        assert!(set.validate().is_err());
    }

    #[test]
    fn artist_username_colliding_with_a_user_is_rejected() {
        let mut set = FixtureSet::default();
        // "Max Thunder" normalizes to "maxthunder"
        set.users[0].username = "maxthunder".to_string();
        set.users[0].email = "max@mailhost.net".to_string();
        assert!(matches!(
            set.validate(),
            Err(SeedError::InvalidFixtures(_))
        ));
    }

    #[test]
    fn empty_artist_list_is_rejected() {
        let mut set = FixtureSet::default();
        set.artists.clear();
        assert!(set.validate().is_err());
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": [{{"display_name": "A", "username": "a", "email": "a@example.com"}}],
                "artists": [{{"name": "Solo Act", "genre": "Jazz", "bio": "One take"}}],
                "playlists": [{{"title": "P", "description": "d", "is_public": true, "owner_index": 0}}]
            }}"#
        )
        .unwrap();

        let set = FixtureSet::load(file.path()).unwrap();
        assert_eq!(set.artists[0].name, "Solo Act");
        assert_eq!(set.playlists.len(), 1);
    }
}
