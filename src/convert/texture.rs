//! Skin texture payload decoding.
//!
//! Citizens stores a player skin as the base64-encoded JSON profile the
//! Mojang session server returns:
//!
//! ```text
//! {
//!   "timestamp": 1700000000000,
//!   "profileId": "...",
//!   "profileName": "...",
//!   "textures": {
//!     "SKIN": {
//!       "url": "http://textures.minecraft.net/texture/...",
//!       "metadata": { "model": "slim" }
//!     }
//!   }
//! }
//! ```

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::target::SkinVariant;

/// Why a texture payload could not be used.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("textureRaw is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("textureRaw does not contain a valid texture profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("texture profile has no textures.SKIN.url")]
    MissingUrl,
}

/// The skin texture found in a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinTexture {
    pub url: String,
    pub variant: SkinVariant,
}

#[derive(Deserialize)]
struct TextureProfile {
    textures: Option<Textures>,
}

#[derive(Deserialize)]
struct Textures {
    #[serde(rename = "SKIN")]
    skin: Option<SkinEntry>,
}

/// Only a string `url` is required. `metadata` of any shape is accepted.
#[derive(Deserialize)]
struct SkinEntry {
    url: Option<JsonValue>,
    metadata: Option<JsonValue>,
}

/// Decode a base64 texture payload into its skin URL and model.
///
/// Whitespace inside the payload is ignored and padding is optional.
pub fn decode_texture(raw: &str) -> Result<SkinTexture, TextureError> {
    let bytes = decode_base64(raw)?;
    let profile: TextureProfile = serde_json::from_slice(&bytes)?;

    let skin = profile
        .textures
        .and_then(|t| t.skin)
        .ok_or(TextureError::MissingUrl)?;

    let url = skin
        .url
        .as_ref()
        .and_then(JsonValue::as_str)
        .filter(|url| !url.is_empty())
        .ok_or(TextureError::MissingUrl)?
        .to_string();

    let slim = skin
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get("model"))
        .and_then(JsonValue::as_str)
        == Some("slim");

    Ok(SkinTexture {
        url,
        variant: if slim {
            SkinVariant::Slim
        } else {
            SkinVariant::Classic
        },
    })
}

fn decode_base64(raw: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .or_else(|_| STANDARD_NO_PAD.decode(compact.as_bytes()))
}

#[cfg(test)]
pub(crate) fn encode_payload(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}
