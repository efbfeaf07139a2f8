pub mod user;
pub mod artist;
pub mod album;
pub mod track;
pub mod playlist;
pub mod playlist_track;
pub mod track_like;
pub mod artist_follower;
pub mod album_follower;

pub use user::Entity as User;
pub use artist::Entity as Artist;
pub use album::Entity as Album;
pub use track::Entity as Track;
pub use playlist::Entity as Playlist;
pub use playlist_track::Entity as PlaylistTrack;
pub use track_like::Entity as TrackLike;
pub use artist_follower::Entity as ArtistFollower;
pub use album_follower::Entity as AlbumFollower;
