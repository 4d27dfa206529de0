pub mod check;
pub mod completions;
pub mod convert;
pub mod init;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crate::discovery::{discover, discover_paths, exclude_dir, load_manifest, DiscoveryResult};
use crate::error::{ConvertError, Result};

/// npconvert - Convert NPC plugin saves to FancyNPCs
#[derive(Parser, Debug)]
#[command(name = "npconvert")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert save files and write FancyNPCs documents
    Convert(convert::ConvertArgs),

    /// Convert save files without writing anything
    Check(check::CheckArgs),

    /// Initialize an npconvert project (generates npconvert.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Resolve command-line paths into save files and the manifest that applies.
///
/// With no paths, the sources listed in `./npconvert.yaml` are scanned.
/// Directory scans never pick up files from the output directory, which is
/// `output` when given and the manifest's otherwise.
pub(crate) fn resolve_inputs(paths: &[PathBuf], output: Option<&Path>) -> Result<DiscoveryResult> {
    if paths.is_empty() {
        let mut discovery = discover(".")?;
        if let Some(output) = output {
            discovery.inputs = exclude_dir(discovery.inputs, output);
        }
        return Ok(discovery);
    }

    let root = PathBuf::from(".");
    let (manifest, has_manifest) = load_manifest(&root)?;
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(&manifest.output));
    let inputs = discover_paths(paths, &manifest, &output_dir)?;

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        inputs,
    })
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}

/// Turn the per-input failures of a command into its result.
///
/// A lone input keeps its own error; otherwise failures are summarized.
pub(crate) fn settle(mut failures: Vec<ConvertError>, total: usize) -> Result<()> {
    match failures.len() {
        0 => Ok(()),
        1 if total == 1 => Err(failures.remove(0)),
        failed => Err(ConvertError::Failed { failed, total }),
    }
}
