//! Convert command implementation.
//!
//! Reads save files, converts them and writes one FancyNPCs document per
//! input into the output directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::convert::{convert_str, Conversion, MalformedPolicy, Response, SourceFormat};
use crate::discovery::OutputFormat;
use crate::document::Mapping;
use crate::error::{ConvertError, Result};
use crate::output::{display_path, plural, Printer};

use super::{read_source, resolve_inputs, settle};

/// Convert save files and write FancyNPCs documents
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Save files or directories to convert (default: manifest sources)
    pub paths: Vec<PathBuf>,

    /// Plugin format of the input files
    #[arg(long, value_enum)]
    pub from: Option<SourceFormat>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print converted documents to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Drop NPC entries with missing fields instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let discovery = resolve_inputs(&args.paths, args.output.as_deref())?;
    let manifest = &discovery.manifest;

    let from = args.from.unwrap_or(manifest.source);
    let format = args.format.unwrap_or(manifest.format);
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| discovery.root.join(&manifest.output));

    let mut options = manifest.convert_options();
    if args.skip_malformed {
        options.on_malformed = MalformedPolicy::Skip;
    }

    let inputs = &discovery.inputs;
    if inputs.is_empty() {
        printer.warning("Warning", "no save files found");
        return Ok(());
    }

    let targets = if args.stdout {
        None
    } else {
        Some(plan_outputs(inputs, &output_dir, format)?)
    };
    let separate = args.stdout && inputs.len() > 1 && format == OutputFormat::Yaml;

    let mut failures = Vec::new();
    let mut total_npcs = 0;
    let mut succeeded = 0;

    for (index, input) in inputs.iter().enumerate() {
        let target = targets.as_ref().map(|t| t[index].as_path());
        printer.status("Converting", &display_path(input));

        let conversion = match read_source(input).and_then(|source| convert_str(&source, from, &options)) {
            Ok(conversion) => conversion,
            Err(err) => {
                printer.error("Failed", &format!("{}: {}", display_path(input), err));
                if format == OutputFormat::Json {
                    let envelope = render_json(&Response::failure(&err))
                        .and_then(|text| deliver(&text, target, false, printer));
                    if let Err(write_err) = envelope {
                        printer.error("Failed", &write_err.to_string());
                    }
                }
                failures.push(err);
                continue;
            }
        };

        report(&conversion, input, printer);
        let converted = conversion.stats.converted_count;

        let written = match format {
            OutputFormat::Yaml => render_yaml(&conversion.document),
            OutputFormat::Json => render_json(&Response::success(conversion)),
        }
        .and_then(|text| deliver(&text, target, separate, printer));

        match written {
            Ok(()) => {
                total_npcs += converted;
                succeeded += 1;
            }
            Err(err) => {
                printer.error("Failed", &format!("{}: {}", display_path(input), err));
                failures.push(err);
            }
        }
    }

    if succeeded > 0 {
        printer.status(
            "Finished",
            &format!(
                "{} from {}",
                plural(total_npcs, "NPC", "NPCs"),
                plural(succeeded, "file", "files")
            ),
        );
    }

    settle(failures, inputs.len())
}

/// Output file for every input, failing if two inputs would collide.
fn plan_outputs(inputs: &[PathBuf], output_dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    let mut claimed: BTreeMap<PathBuf, &Path> = BTreeMap::new();
    let mut targets = Vec::with_capacity(inputs.len());

    for input in inputs {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("npcs");
        let target = output_dir.join(format!("{}.{}", stem, format.extension()));

        if let Some(previous) = claimed.insert(target.clone(), input.as_path()) {
            return Err(ConvertError::Output {
                message: format!(
                    "{} and {} would both be written to {}",
                    display_path(previous),
                    display_path(input),
                    display_path(&target)
                ),
                help: Some("Convert them separately with different --output directories".to_string()),
            });
        }
        targets.push(target);
    }

    Ok(targets)
}

fn report(conversion: &Conversion, input: &Path, printer: &Printer) {
    printer.diagnostics(&conversion.diagnostics);

    let stats = &conversion.stats;
    if stats.original_count == 0 {
        printer.warning(
            "Empty",
            &format!("{}: no {} NPCs found", display_path(input), conversion.format.label()),
        );
        return;
    }

    let mut message = format!(
        "{} of {}",
        stats.converted_count,
        plural(stats.original_count, "NPC", "NPCs")
    );
    if stats.skipped_count > 0 {
        message.push_str(&format!(" ({} skipped)", stats.skipped_count));
    }
    printer.info("Converted", &message);
}

fn render_yaml(document: &Mapping) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| ConvertError::Output {
        message: format!("Failed to serialize YAML: {}", e),
        help: None,
    })
}

fn render_json(response: &Response) -> Result<String> {
    response
        .to_json()
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| ConvertError::Output {
            message: format!("Failed to serialize JSON: {}", e),
            help: None,
        })
}

/// Write a rendered document to its target file, or to stdout.
fn deliver(text: &str, target: Option<&Path>, separate: bool, printer: &Printer) -> Result<()> {
    let Some(path) = target else {
        let mut stdout = std::io::stdout().lock();
        if separate {
            writeln!(stdout, "---")?;
        }
        stdout.write_all(text.as_bytes())?;
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConvertError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(path, text).map_err(|e| ConvertError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write output: {}", e),
    })?;

    printer.info("Wrote", &printer.cyan(&display_path(path)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BOB: &str = "\
npc:
  bob:
    name: '&6Bob'
    uuid: 11111111-1111-1111-1111-111111111111
    traits:
      location:
        world: world
        x: 1.0
        y: 64.0
        z: 1.0
        yaw: 0.0
        pitch: 0.0
";

    fn args(paths: Vec<PathBuf>, output: &Path) -> ConvertArgs {
        ConvertArgs {
            paths,
            from: None,
            output: Some(output.to_path_buf()),
            format: Some(OutputFormat::Yaml),
            stdout: false,
            skip_malformed: false,
        }
    }

    #[test]
    fn test_convert_writes_yaml() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, BOB).unwrap();
        let out = dir.path().join("out");

        run(args(vec![input], &out), &Printer::plain()).unwrap();

        let written = fs::read_to_string(out.join("saves.yml")).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&written).unwrap();
        let npc = &parsed["npcs"]["11111111-1111-1111-1111-111111111111"];

        assert_eq!(npc["name"].as_str(), Some("converted_bob"));
        assert_eq!(npc["displayName"].as_str(), Some("Bob"));
        assert_eq!(npc["location"]["y"].as_i64(), Some(64));
        assert_eq!(npc["attributes"]["shaking"].as_str(), Some("false"));
    }

    #[test]
    fn test_convert_writes_json_envelope() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, BOB).unwrap();
        let out = dir.path().join("out");

        let mut convert_args = args(vec![input], &out);
        convert_args.format = Some(OutputFormat::Json);
        run(convert_args, &Printer::plain()).unwrap();

        let written = fs::read_to_string(out.join("saves.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["stats"]["originalCount"], 1);
        assert_eq!(json["stats"]["convertedCount"], 1);
    }

    #[test]
    fn test_convert_unsupported_format_propagates() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, BOB).unwrap();
        let out = dir.path().join("out");

        let mut convert_args = args(vec![input], &out);
        convert_args.from = Some(SourceFormat::ZNpcs);
        let result = run(convert_args, &Printer::plain());

        assert!(matches!(result, Err(ConvertError::UnsupportedFormat { .. })));
        assert!(!out.join("saves.yml").exists());
    }

    #[test]
    fn test_convert_json_failure_envelope() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, BOB).unwrap();
        let out = dir.path().join("out");

        let mut convert_args = args(vec![input], &out);
        convert_args.from = Some(SourceFormat::ZNpcsPlus);
        convert_args.format = Some(OutputFormat::Json);
        assert!(run(convert_args, &Printer::plain()).is_err());

        let written = fs::read_to_string(out.join("saves.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "zNPCsPlus conversion is not yet supported");
    }

    #[test]
    fn test_convert_batch_failure_is_summarized() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.yml");
        let bad = dir.path().join("bad.yml");
        fs::write(&good, BOB).unwrap();
        fs::write(&bad, "npc:\n  broken:\n    name: x\n").unwrap();
        let out = dir.path().join("out");

        let result = run(args(vec![good, bad], &out), &Printer::plain());

        assert!(matches!(
            result,
            Err(ConvertError::Failed {
                failed: 1,
                total: 2
            })
        ));
        assert!(out.join("good.yml").exists());
        assert!(!out.join("bad.yml").exists());
    }

    #[test]
    fn test_convert_skip_malformed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, format!("{}  broken:\n    name: x\n", BOB)).unwrap();
        let out = dir.path().join("out");

        let mut convert_args = args(vec![input], &out);
        convert_args.skip_malformed = true;
        run(convert_args, &Printer::plain()).unwrap();

        let written = fs::read_to_string(out.join("saves.yml")).unwrap();
        assert!(written.contains("converted_bob"));
        assert!(!written.contains("converted_broken"));
    }

    #[test]
    fn test_convert_rejects_colliding_outputs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/saves.yml"), BOB).unwrap();
        fs::write(dir.path().join("b/saves.yml"), BOB).unwrap();
        let out = dir.path().join("out");

        let result = run(
            args(vec![dir.path().join("a"), dir.path().join("b")], &out),
            &Printer::plain(),
        );

        assert!(matches!(result, Err(ConvertError::Output { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_convert_empty_document_writes_empty_section() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("saves.yml");
        fs::write(&input, "# nothing here\n").unwrap();
        let out = dir.path().join("out");

        run(args(vec![input], &out), &Printer::plain()).unwrap();

        let written = fs::read_to_string(out.join("saves.yml")).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&written).unwrap();
        assert!(parsed["npcs"].as_mapping().is_some_and(|m| m.is_empty()));
    }

    #[test]
    fn test_convert_continues_after_write_failure() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.yml");
        let second = dir.path().join("b.yml");
        fs::write(&first, BOB).unwrap();
        fs::write(&second, BOB).unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("a.yml")).unwrap();

        let result = run(args(vec![first, second], &out), &Printer::plain());

        assert!(matches!(
            result,
            Err(ConvertError::Failed {
                failed: 1,
                total: 2
            })
        ));
        assert!(out.join("a.yml").is_dir());
        assert!(fs::read_to_string(out.join("b.yml"))
            .unwrap()
            .contains("converted_bob"));
    }

    #[test]
    fn test_convert_directory_twice_skips_output() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("saves.yml"), BOB).unwrap();
        let out = dir.path().join("converted");

        run(args(vec![dir.path().to_path_buf()], &out), &Printer::plain()).unwrap();
        run(args(vec![dir.path().to_path_buf()], &out), &Printer::plain()).unwrap();

        let written = fs::read_to_string(out.join("saves.yml")).unwrap();
        assert!(written.contains("converted_bob"));
        assert!(!out.join("converted").exists());
    }

    #[test]
    fn test_plan_outputs_extension() {
        let targets = plan_outputs(
            &[PathBuf::from("plugins/Citizens/saves.yml")],
            Path::new("out"),
            OutputFormat::Json,
        )
        .unwrap();

        assert_eq!(targets, vec![PathBuf::from("out/saves.json")]);
    }
}
