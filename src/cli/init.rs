//! Init command implementation.
//!
//! Generates an `npconvert.yaml` manifest, listing the directories that
//! hold Citizens saves as sources.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::convert::citizens::NPC_SECTION;
use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::document::Value;
use crate::error::{ConvertError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::parse;

/// Initialize an npconvert project by generating npconvert.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing npconvert.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(ConvertError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let saves: Vec<PathBuf> = scan_directory(&args.path, &Manifest::default())
        .into_iter()
        .filter(|path| is_citizens_save(path))
        .collect();

    let mut source_dirs = BTreeSet::new();
    for file in &saves {
        if let Some(parent) = file.parent() {
            let relative = parent.strip_prefix(&args.path).unwrap_or(parent);

            let dir_str = if relative == Path::new("") {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            };
            source_dirs.insert(dir_str);
        }
    }

    let defaults = Manifest::default();
    let mut yaml = String::new();

    if !(source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."))) {
        yaml.push_str("sources:\n");
        for dir in &source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }

    yaml.push_str(&format!("source: {}\n", defaults.source));
    yaml.push_str(&format!("output: {}\n", defaults.output.display()));
    yaml.push_str("# yaml writes FancyNPCs npcs.yml files, json writes response envelopes\n");
    yaml.push_str("format: yaml\n");
    yaml.push_str("# fail rejects a file with a broken NPC, skip drops the NPC\n");
    yaml.push_str("on_malformed: fail\n");

    fs::write(&manifest_path, &yaml).map_err(|e| ConvertError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(saves.len(), "save file", "save files")
        ),
    );

    Ok(())
}

/// Whether a file parses to a document with an `npc` section.
fn is_citizens_save(path: &Path) -> bool {
    match fs::read_to_string(path) {
        Ok(source) => matches!(parse(&source).get(NPC_SECTION), Some(Value::Mapping(_))),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Skipping unreadable file");
            false
        }
    }
}
