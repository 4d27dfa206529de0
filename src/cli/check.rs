//! Check command implementation.
//!
//! Runs the full conversion on every input without writing any files.

use std::path::PathBuf;

use clap::Args;

use crate::convert::{convert_str, MalformedPolicy, SourceFormat};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::parser::emit;

use super::{read_source, resolve_inputs, settle};

/// Convert save files without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Save files or directories to check (default: manifest sources)
    pub paths: Vec<PathBuf>,

    /// Plugin format of the input files
    #[arg(long, value_enum)]
    pub from: Option<SourceFormat>,

    /// Drop NPC entries with missing fields instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Print each converted document to stdout
    #[arg(long)]
    pub dump: bool,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let discovery = resolve_inputs(&args.paths, None)?;
    let from = args.from.unwrap_or(discovery.manifest.source);

    let mut options = discovery.manifest.convert_options();
    if args.skip_malformed {
        options.on_malformed = MalformedPolicy::Skip;
    }

    let inputs = &discovery.inputs;
    if inputs.is_empty() {
        printer.warning("Warning", "no save files found");
        return Ok(());
    }

    let mut failures = Vec::new();
    let mut warnings = 0;

    for input in inputs {
        printer.status("Checking", &display_path(input));

        match read_source(input).and_then(|source| convert_str(&source, from, &options)) {
            Ok(conversion) => {
                printer.diagnostics(&conversion.diagnostics);
                warnings += conversion.diagnostics.warning_count();

                let stats = conversion.stats;
                printer.info(
                    "Found",
                    &format!(
                        "{}, {} convertible",
                        plural(stats.original_count, "NPC", "NPCs"),
                        stats.converted_count
                    ),
                );

                if args.dump {
                    print!("{}", emit(&conversion.document));
                }
            }
            Err(err) => {
                printer.error("Failed", &format!("{}: {}", display_path(input), err));
                failures.push(err);
            }
        }
    }

    if failures.is_empty() {
        printer.status(
            "Finished",
            &format!(
                "{} checked, {}",
                plural(inputs.len(), "file", "files"),
                plural(warnings, "warning", "warnings")
            ),
        );
    }

    settle(failures, inputs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::fs;
    use tempfile::tempdir;

    const MISSING_UUID: &str = "\
npc:
  ghost:
    name: Ghost
    traits:
      location:
        world: world
        x: 0
        y: 0
        z: 0
        yaw: 0
        pitch: 0
";

    fn args(paths: Vec<PathBuf>) -> CheckArgs {
        CheckArgs {
            paths,
            from: None,
            skip_malformed: false,
            dump: false,
        }
    }

    #[test]
    fn test_check_valid_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, MISSING_UUID.replace("    name: Ghost\n", "    name: Ghost\n    uuid: g-1\n"))
            .unwrap();

        run(args(vec![input]), &Printer::plain()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_check_reports_malformed_entry() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, MISSING_UUID).unwrap();

        let result = run(args(vec![input]), &Printer::plain());

        assert!(matches!(result, Err(ConvertError::MalformedEntry { .. })));
    }

    #[test]
    fn test_check_skip_malformed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, MISSING_UUID).unwrap();

        let mut check_args = args(vec![input]);
        check_args.skip_malformed = true;

        assert!(run(check_args, &Printer::plain()).is_ok());
    }

    #[test]
    fn test_check_unsupported_format() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, MISSING_UUID).unwrap();

        let mut check_args = args(vec![input]);
        check_args.from = Some(SourceFormat::ZNpcs);
        let result = run(check_args, &Printer::plain());

        assert!(matches!(result, Err(ConvertError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_check_directory_with_failures() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.yml"), MISSING_UUID).unwrap();
        fs::write(dir.path().join("b.yml"), "npc: {}").unwrap();
        fs::write(dir.path().join("c.yml"), MISSING_UUID).unwrap();

        let result = run(args(vec![dir.path().to_path_buf()]), &Printer::plain());

        assert!(matches!(
            result,
            Err(ConvertError::Failed {
                failed: 2,
                total: 3
            })
        ));
    }
}
