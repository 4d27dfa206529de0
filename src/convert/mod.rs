//! Conversion of NPC saves into FancyNPCs format.
//!
//! Every supported plugin format has its own mapping from the generic
//! document produced by [`crate::parser::parse`] to FancyNPCs records.
//! [`transform`] is the single dispatch point.
//!
//! # Example
//!
//! ```ignore
//! use npconvert::convert::{transform, SourceFormat};
//! use npconvert::parser::parse;
//!
//! let doc = parse(&std::fs::read_to_string("saves.yml")?);
//! let conversion = transform(&doc, SourceFormat::Citizens)?;
//! println!("Converted {} NPCs", conversion.stats.converted_count);
//! ```

pub mod citizens;
mod display_name;
mod response;
mod target;
mod texture;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::document::{Mapping, Value};
use crate::error::{ConvertError, Result};
use crate::parser::parse;

pub use display_name::{sanitize_display_name, strip_format_codes};
pub use response::Response;
pub use target::{Attributes, Location, Skin, SkinVariant, TargetNpc};
pub use texture::{decode_texture, SkinTexture, TextureError};

/// Top-level section of the converted document.
pub const NPCS_SECTION: &str = "npcs";

/// Plugin format of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    #[default]
    Citizens,
    #[value(name = "znpcs")]
    ZNpcs,
    #[value(name = "znpcsplus")]
    ZNpcsPlus,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [
        SourceFormat::Citizens,
        SourceFormat::ZNpcs,
        SourceFormat::ZNpcsPlus,
    ];

    /// Selector string, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Citizens => "citizens",
            SourceFormat::ZNpcs => "znpcs",
            SourceFormat::ZNpcsPlus => "znpcsplus",
        }
    }

    /// Plugin name for display.
    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Citizens => "Citizens",
            SourceFormat::ZNpcs => "zNPCs",
            SourceFormat::ZNpcsPlus => "zNPCsPlus",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        SourceFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == name)
            .ok_or_else(|| ConvertError::UnknownFormat {
                name: s.to_string(),
            })
    }
}

/// What to do with an NPC entry that lacks required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Reject the whole document.
    #[default]
    Fail,
    /// Drop the entry, record an error diagnostic and continue.
    Skip,
}

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub on_malformed: MalformedPolicy,
}

/// Entry counts of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStats {
    /// Entries found in the source document.
    pub original_count: usize,
    /// Entries present in the output document.
    pub converted_count: usize,
    /// Entries dropped under [`MalformedPolicy::Skip`].
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped_count: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Format the document was read as.
    pub format: SourceFormat,
    /// The FancyNPCs document: a single `npcs` section keyed by UUID.
    pub document: Mapping,
    pub stats: ConversionStats,
    pub diagnostics: Diagnostics,
}

impl Conversion {
    /// The converted NPCs, keyed by UUID.
    pub fn npcs(&self) -> &Mapping {
        static EMPTY: OnceLock<Mapping> = OnceLock::new();
        self.document
            .get(NPCS_SECTION)
            .and_then(Value::as_mapping)
            .unwrap_or_else(|| EMPTY.get_or_init(Mapping::new))
    }
}

/// Convert a parsed document with default options.
pub fn transform(doc: &Mapping, format: SourceFormat) -> Result<Conversion> {
    transform_with(doc, format, &ConvertOptions::default())
}

/// Convert a parsed document.
pub fn transform_with(
    doc: &Mapping,
    format: SourceFormat,
    options: &ConvertOptions,
) -> Result<Conversion> {
    match format {
        SourceFormat::Citizens => citizens::convert(doc, options),
        SourceFormat::ZNpcs | SourceFormat::ZNpcsPlus => Err(ConvertError::UnsupportedFormat {
            format: format.label().to_string(),
        }),
    }
}

/// Parse and convert raw save file text.
pub fn convert_str(
    source: &str,
    format: SourceFormat,
    options: &ConvertOptions,
) -> Result<Conversion> {
    transform_with(&parse(source), format, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_format_from_str() {
        assert_eq!("citizens".parse::<SourceFormat>().unwrap(), SourceFormat::Citizens);
        assert_eq!("zNPCs".parse::<SourceFormat>().unwrap(), SourceFormat::ZNpcs);
        assert_eq!(" znpcsplus ".parse::<SourceFormat>().unwrap(), SourceFormat::ZNpcsPlus);
    }

    #[test]
    fn test_source_format_unknown() {
        let err = "mythicmobs".parse::<SourceFormat>().unwrap_err();

        assert!(matches!(err, ConvertError::UnknownFormat { ref name } if name == "mythicmobs"));
    }

    #[test]
    fn test_source_format_display_round_trips() {
        for format in SourceFormat::ALL {
            assert_eq!(format.to_string().parse::<SourceFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_unsupported_formats_fail() {
        let doc = parse("npc:\n  a:\n    name: x\n");

        for format in [SourceFormat::ZNpcs, SourceFormat::ZNpcsPlus] {
            let err = transform(&doc, format).unwrap_err();
            assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
        }
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = transform(&Mapping::new(), SourceFormat::ZNpcsPlus).unwrap_err();

        assert_eq!(err.to_string(), "zNPCsPlus conversion is not yet supported");
    }

    #[test]
    fn test_converted_count_matches_output() {
        let source = "\
npc:
  a:
    uuid: u-1
    traits:
      location:
        world: w
        x: 0
        y: 0
        z: 0
        yaw: 0
        pitch: 0
  b:
    uuid: u-2
    traits:
      location:
        world: w
        x: 0
        y: 0
        z: 0
        yaw: 0
        pitch: 0
";
        let conversion = convert_str(source, SourceFormat::Citizens, &ConvertOptions::default())
            .unwrap();

        assert_eq!(conversion.stats.original_count, 2);
        assert_eq!(conversion.stats.converted_count, conversion.npcs().len());
        assert_eq!(conversion.document.keys().collect::<Vec<_>>(), vec!["npcs"]);
    }

    #[test]
    fn test_stats_serialization() {
        let stats = ConversionStats {
            original_count: 3,
            converted_count: 2,
            skipped_count: 0,
        };
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"originalCount":3,"convertedCount":2}"#
        );

        let stats = ConversionStats {
            skipped_count: 1,
            ..stats
        };
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"originalCount":3,"convertedCount":2,"skippedCount":1}"#
        );
    }

    #[test]
    fn test_malformed_policy_from_yaml() {
        let policy: MalformedPolicy = serde_yaml::from_str("skip").unwrap();
        assert_eq!(policy, MalformedPolicy::Skip);
    }
}
