use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SeedError};

/// An immediate subdirectory of the music root, treated as one album in demo
/// seeding. `tracks` holds the folder's `.mp3` files in name order.
#[derive(Debug, Clone)]
pub struct AlbumFolder {
    pub name: String,
    pub path: PathBuf,
    pub tracks: Vec<PathBuf>,
}

/// Recursively collect every `.mp3` under the music root, sorted by path.
pub fn collect_mp3_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SeedError::MusicDirMissing(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_mp3(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Collect the album folders directly under the music root (non-recursive),
/// each with its own `.mp3` files. Folders without any tracks are returned
/// too; the caller decides whether to warn or skip.
pub fn collect_album_folders(root: &Path) -> Result<Vec<AlbumFolder>> {
    if !root.is_dir() {
        return Err(SeedError::MusicDirMissing(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let mut tracks: Vec<PathBuf> = fs::read_dir(&path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_mp3(p))
            .collect();
        tracks.sort();

        folders.push(AlbumFolder {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            tracks,
        });
    }
    folders.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(folders)
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;

    #[test]
    fn missing_root_is_an_error() {
        let result = collect_mp3_files(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(SeedError::MusicDirMissing(_))));
    }

    #[test]
    fn recursive_scan_finds_nested_mp3s_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        File::create(dir.path().join("top.mp3")).unwrap();
        File::create(dir.path().join("a/one.MP3")).unwrap();
        File::create(dir.path().join("a/b/two.mp3")).unwrap();
        File::create(dir.path().join("a/cover.jpg")).unwrap();

        let files = collect_mp3_files(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn album_folders_are_non_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Zebra/nested")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        File::create(dir.path().join("Alpha/01.mp3")).unwrap();
        File::create(dir.path().join("Zebra/track.mp3")).unwrap();
        File::create(dir.path().join("Zebra/nested/hidden.mp3")).unwrap();
        File::create(dir.path().join("loose.mp3")).unwrap();

        let folders = collect_album_folders(dir.path()).unwrap();
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0].name, "Alpha");
        assert_eq!(folders[1].name, "Zebra");
        // Nested files do not belong to the album folder
        assert_eq!(folders[1].tracks.len(), 1);
    }
}
