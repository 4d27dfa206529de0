//! Save file discovery for npconvert projects.
//!
//! This module finds the save files to convert, either by scanning the
//! sources listed in an `npconvert.yaml` manifest or from paths given on
//! the command line.
//!
//! # Example
//!
//! ```ignore
//! use npconvert::discovery::discover;
//!
//! let result = discover("./server")?;
//! println!("Found {} save files", result.inputs.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

pub use manifest::{Manifest, OutputFormat};
pub use scanner::{is_save_file, scan_directory, scan_sources};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "npconvert.yaml";

/// Result of discovering save files in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no npconvert.yaml found).
    pub manifest: Manifest,

    /// Whether an npconvert.yaml manifest was found.
    pub has_manifest: bool,

    /// Save files to convert.
    pub inputs: Vec<PathBuf>,
}

/// Load the manifest in `root`, or the default if there is none.
///
/// Returns the manifest and whether a file was found.
pub fn load_manifest(root: &Path) -> Result<(Manifest, bool)> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        Ok((Manifest::load(&manifest_path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}

/// Discover save files in a project directory.
///
/// Looks for an `npconvert.yaml` manifest in the root directory and scans
/// its sources (the whole directory by default). Files inside the
/// manifest's output directory are ignored so converted files are never
/// converted again.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let (manifest, has_manifest) = load_manifest(&root)?;

    let inputs = exclude_dir(
        scan_sources(&manifest.effective_sources(), &root, &manifest),
        &root.join(&manifest.output),
    );

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        inputs,
    })
}

/// Collect save files from explicit paths.
///
/// Files are taken as given, whatever their extension. Directories are
/// scanned for `.yml` / `.yaml` files, skipping anything inside
/// `output_dir`. A path that does not exist is an error.
pub fn discover_paths(
    paths: &[PathBuf],
    manifest: &Manifest,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            inputs.extend(exclude_dir(scan_directory(path, manifest), output_dir));
        } else if path.is_file() {
            inputs.push(path.clone());
        } else {
            return Err(ConvertError::Io {
                path: path.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    Ok(inputs)
}

/// Drop every path inside `dir`.
///
/// Paths are compared in canonical form when they exist, so `./out/a.yml`
/// is found inside `out`.
pub fn exclude_dir(inputs: Vec<PathBuf>, dir: &Path) -> Vec<PathBuf> {
    let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());

    inputs
        .into_iter()
        .filter(|path| {
            let path = path.canonicalize().unwrap_or_else(|_| path.clone());
            !path.starts_with(&dir)
        })
        .collect()
}
