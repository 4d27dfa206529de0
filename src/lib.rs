//! npconvert - NPC save converter
//!
//! A library for reading the save files of Minecraft NPC plugins and
//! converting them to the FancyNPCs format. Saves are read with a lenient
//! YAML-subset parser into a generic [`Mapping`], then transformed per
//! plugin format.

pub mod cli;
pub mod convert;
pub mod diagnostics;
pub mod discovery;
pub mod document;
pub mod error;
pub mod output;
pub mod parser;

pub use convert::{
    convert_str, transform, transform_with, Conversion, ConversionStats, ConvertOptions,
    MalformedPolicy, Response, SourceFormat, TargetNpc,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, OutputFormat};
pub use document::{Mapping, Value};
pub use error::{ConvertError, Result};
pub use parser::{emit, parse};
