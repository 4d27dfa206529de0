//! File system scanner for discovering NPC save files.
//!
//! Recursively scans directories for `.yml` / `.yaml` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;
use super::MANIFEST_FILENAME;

/// Check whether a path looks like a YAML save file.
pub fn is_save_file(path: &Path) -> bool {
    if path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILENAME) {
        return false;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

/// Scan a directory for save files.
///
/// Results are sorted so conversions run in a stable order.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| !manifest.is_excluded(path))
        .filter(|path| is_save_file(path))
        .collect();

    files.sort();
    files
}

/// Scan multiple source paths relative to `base_path`.
///
/// Sources naming a single file are taken as-is.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        if source_path.is_file() {
            files.push(source_path);
        } else {
            files.extend(scan_directory(&source_path, manifest));
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_save_file() {
        assert!(is_save_file(Path::new("saves.yml")));
        assert!(is_save_file(Path::new("plugins/Citizens/saves.yml")));
        assert!(is_save_file(Path::new("data.YAML")));
        assert!(!is_save_file(Path::new("saves.json")));
        assert!(!is_save_file(Path::new("readme")));
        assert!(!is_save_file(Path::new("npconvert.yaml")));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();

        let files = scan_directory(dir.path(), &Manifest::default());

        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_finds_yaml_files_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("plugins/Citizens")).unwrap();

        fs::write(dir.path().join("plugins/Citizens/saves.yml"), "npc: {}").unwrap();
        fs::write(dir.path().join("other.yaml"), "npc: {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::write(dir.path().join("npconvert.yaml"), "output: out").unwrap();

        let files = scan_directory(dir.path(), &Manifest::default());

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("plugins/Citizens/saves.yml")));
        assert!(files.iter().any(|f| f.ends_with("other.yaml")));
    }

    #[test]
    fn test_scan_with_excludes() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("saves.yml"), "npc: {}").unwrap();
        fs::write(dir.path().join("saves.bak.yml"), "npc: {}").unwrap();

        let manifest = Manifest {
            excludes: vec!["*.bak.yml".to_string()],
            ..Default::default()
        };

        let files = scan_directory(dir.path(), &manifest);

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("saves.yml"));
    }

    #[test]
    fn test_scan_sources_mixes_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("saves")).unwrap();

        fs::write(dir.path().join("saves/a.yml"), "npc: {}").unwrap();
        fs::write(dir.path().join("single.yml"), "npc: {}").unwrap();

        let sources = vec!["saves/".to_string(), "single.yml".to_string()];
        let files = scan_sources(&sources, dir.path(), &Manifest::default());

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let files = scan_directory(Path::new("/nonexistent/path"), &Manifest::default());

        assert!(files.is_empty());
    }
}
