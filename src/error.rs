use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag read failed for {}: {}", .path.display(), .source)]
    TagRead {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fixture set: {0}")]
    InvalidFixtures(String),

    #[error("Music folder not found: {}", .0.display())]
    MusicDirMissing(PathBuf),

    #[error("No album folders with tracks found in {}", .0.display())]
    NoAlbumFolders(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;
