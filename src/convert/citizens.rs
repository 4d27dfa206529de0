//! Citizens save (`saves.yml`) conversion.
//!
//! Citizens keeps every NPC under a top-level `npc` section, keyed by its
//! numeric id:
//!
//! ```text
//! npc:
//!   '0':
//!     name: '&6Bob'
//!     uuid: 11111111-1111-1111-1111-111111111111
//!     traits:
//!       skintrait:
//!         textureRaw: eyJ0aW1lc3RhbXAiOjE3...
//!       location:
//!         world: world
//!         x: '1.0'
//!         ...
//!       lookclose:
//!         enabled: true
//!         range: 5
//!       type: PLAYER
//!       owner:
//!         uuid: 22222222-2222-2222-2222-222222222222
//! ```

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::document::{Mapping, Value};
use crate::error::{ConvertError, Result};

use super::display_name::sanitize_display_name;
use super::target::{Location, Skin, TargetNpc, DEFAULT_ENTITY_TYPE, NIL_UUID};
use super::texture::decode_texture;
use super::{Conversion, ConversionStats, ConvertOptions, MalformedPolicy, SourceFormat};

/// Top-level section holding the NPC entries.
pub const NPC_SECTION: &str = "npc";

/// Prefix for the FancyNPCs name of a converted NPC.
pub const NAME_PREFIX: &str = "converted_";

/// A single converted entry, ready to be keyed by its UUID.
#[derive(Debug)]
struct ConvertedEntry {
    uuid: String,
    npc: TargetNpc,
    diagnostics: Diagnostics,
}

/// Convert a parsed Citizens save.
///
/// A missing or empty `npc` section yields an empty result, not an error.
pub fn convert(doc: &Mapping, options: &ConvertOptions) -> Result<Conversion> {
    let entries = match doc.get(NPC_SECTION) {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(entries)) => Some(entries),
        Some(other) => {
            return Err(ConvertError::MalformedEntry {
                entry: NPC_SECTION.to_string(),
                message: format!("expected a section of NPCs, found a {}", other.type_name()),
                help: Some("Is this a Citizens saves.yml file?".to_string()),
            });
        }
    };

    let original_count = entries.map_or(0, Mapping::len);
    let mut npcs = Mapping::new();
    let mut diagnostics = Diagnostics::new();
    let mut skipped_count = 0;

    for (key, entry) in entries.into_iter().flat_map(Mapping::iter) {
        match convert_entry(key, entry) {
            Ok(converted) => {
                tracing::debug!(npc = %key, uuid = %converted.uuid, "Converted NPC");
                diagnostics.merge(converted.diagnostics);

                let replaced = npcs.insert(converted.uuid.as_str(), converted.npc.to_mapping());
                if replaced.is_some() {
                    tracing::warn!(npc = %key, uuid = %converted.uuid, "Duplicate NPC uuid");
                    diagnostics.push(
                        Diagnostic::warning(
                            "npconvert::duplicate",
                            format!("uuid {} is used by an earlier NPC, which was replaced", converted.uuid),
                        )
                        .for_entry(key),
                    );
                }
            }
            Err(err) => match options.on_malformed {
                MalformedPolicy::Fail => return Err(err),
                MalformedPolicy::Skip => {
                    tracing::warn!(npc = %key, error = %err, "Skipping malformed NPC");
                    diagnostics.push(
                        Diagnostic::error("npconvert::skipped", err.to_string()).for_entry(key),
                    );
                    skipped_count += 1;
                }
            },
        }
    }

    let stats = ConversionStats {
        original_count,
        converted_count: npcs.len(),
        skipped_count,
    };

    let mut document = Mapping::new();
    document.insert("npcs", npcs);

    Ok(Conversion {
        format: SourceFormat::Citizens,
        document,
        stats,
        diagnostics,
    })
}

fn convert_entry(key: &str, entry: &Value) -> Result<ConvertedEntry> {
    let entry = entry.as_mapping().ok_or_else(|| {
        ConvertError::malformed(
            key,
            format!("expected an NPC section, found a {}", entry.type_name()),
        )
    })?;

    let empty = Mapping::new();
    let traits = entry.get_mapping(&["traits"]).unwrap_or(&empty);

    let location = read_location(key, traits)?;

    let uuid = entry
        .get("uuid")
        .and_then(Value::to_text)
        .filter(|uuid| !uuid.is_empty())
        .ok_or_else(|| ConvertError::malformed(key, "missing uuid"))?;

    let mut diagnostics = Diagnostics::new();
    let skin = match resolve_skin(traits) {
        Ok(skin) => skin,
        Err(diagnostic) => {
            tracing::warn!(npc = %key, "{}; using default skin", diagnostic.message);
            diagnostics.push(diagnostic.for_entry(key));
            Skin::default()
        }
    };

    let raw_name = entry
        .get("name")
        .and_then(Value::to_text)
        .unwrap_or_default();

    let mut npc = TargetNpc::new(format!("{NAME_PREFIX}{key}"), location);
    npc.display_name = sanitize_display_name(&raw_name);
    npc.creator = text_or(traits.get_path(&["owner", "uuid"]), NIL_UUID);
    npc.entity_type = text_or(traits.get("type"), DEFAULT_ENTITY_TYPE);
    npc.skin = skin;
    npc.turn_to_player = traits
        .get_path(&["lookclose", "enabled"])
        .and_then(Value::as_bool)
        .unwrap_or(false);
    // Zero range counts as unset.
    npc.turn_to_player_distance = traits
        .get_path(&["lookclose", "range"])
        .and_then(Value::coerce_f64)
        .filter(|range| *range != 0.0)
        .unwrap_or(-1.0);

    Ok(ConvertedEntry {
        uuid,
        npc,
        diagnostics,
    })
}

fn read_location(key: &str, traits: &Mapping) -> Result<Location> {
    let location = traits
        .get_mapping(&["location"])
        .ok_or_else(|| ConvertError::MalformedEntry {
            entry: key.to_string(),
            message: "missing traits.location".to_string(),
            help: Some("Every Citizens NPC needs a location to be placed in the world".to_string()),
        })?;

    let world = location
        .get("world")
        .and_then(Value::to_text)
        .ok_or_else(|| ConvertError::malformed(key, "missing traits.location.world"))?;

    let coordinate = |field: &str| -> Result<f64> {
        let value = location.get(field).ok_or_else(|| {
            ConvertError::malformed(key, format!("missing traits.location.{field}"))
        })?;
        value.coerce_f64().ok_or_else(|| {
            ConvertError::malformed(
                key,
                format!("traits.location.{field} is not a number: {value}"),
            )
        })
    };

    Ok(Location {
        world,
        x: coordinate("x")?,
        y: coordinate("y")?,
        z: coordinate("z")?,
        yaw: coordinate("yaw")?,
        pitch: coordinate("pitch")?,
    })
}

/// Resolve the skin from `skintrait.textureRaw`.
///
/// No payload means the default skin. A payload that cannot be used is
/// reported as a warning diagnostic; the caller falls back to the default.
fn resolve_skin(traits: &Mapping) -> std::result::Result<Skin, Diagnostic> {
    let raw = match traits.get_path(&["skintrait", "textureRaw"]) {
        None | Some(Value::Null) => return Ok(Skin::default()),
        Some(Value::Mapping(m)) if m.is_empty() => return Ok(Skin::default()),
        Some(Value::Mapping(_)) => {
            return Err(Diagnostic::warning(
                "npconvert::texture",
                "textureRaw is a section, not a texture payload",
            ));
        }
        Some(scalar) => scalar.to_text().unwrap_or_default(),
    };

    if raw.is_empty() {
        return Ok(Skin::default());
    }

    let texture = decode_texture(&raw).map_err(|err| {
        Diagnostic::warning("npconvert::texture", err.to_string())
            .with_help("The default skin was used; set the skin manually in FancyNPCs")
    })?;

    Ok(Skin {
        identifier: texture.url,
        variant: texture.variant,
        mirror_skin: false,
    })
}

/// Text of a scalar, or `default` when it is missing or empty.
fn text_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::to_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| default.to_string())
}
