//! JSON manifest describing a game's sprite art.
//!
//! A manifest names shared palettes (hex color strings), per-sprite index
//! grids, and animation sheets referencing sprites by name. Parsing and
//! reference resolution are the only fallible operations in the crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::color::Color;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sprite '{sprite}' references unknown palette '{palette}'")]
    UnknownPalette { sprite: String, palette: String },
    #[error("sheet '{sheet}' references unknown sprite '{frame}'")]
    UnknownFrame { sheet: String, frame: String },
    #[error("palette '{palette}' has invalid color '{value}'")]
    BadColor { palette: String, value: String },
}

/// Sprite manifest as loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteManifest {
    /// Named palettes: lists of `#rrggbb` strings. Index 0 in sprite grids
    /// is transparency; grid index 1 maps to the first palette entry.
    #[serde(default)]
    pub palettes: HashMap<String, Vec<String>>,
    /// Named sprites.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteArt>,
    /// Named animation sheets.
    #[serde(default)]
    pub sheets: HashMap<String, SheetDescriptor>,
}

/// One sprite's art: dimensions, palette reference, and index grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteArt {
    pub width: u32,
    pub height: u32,
    pub palette: String,
    pub rows: Vec<Vec<u8>>,
}

/// An animation sheet: ordered frame sprite names plus per-frame duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    pub frames: Vec<String>,
    #[serde(default = "default_frame_duration")]
    pub frame_duration_ms: f64,
}

fn default_frame_duration() -> f64 {
    150.0
}

impl SpriteManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a named palette into colors.
    pub fn resolve_palette(&self, name: &str) -> Result<Vec<Color>, ManifestError> {
        let entries = self
            .palettes
            .get(name)
            .ok_or_else(|| ManifestError::UnknownPalette {
                sprite: String::new(),
                palette: name.to_string(),
            })?;
        entries
            .iter()
            .map(|value| {
                Color::from_hex(value).ok_or_else(|| ManifestError::BadColor {
                    palette: name.to_string(),
                    value: value.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r##"{
            "palettes": { "hero": ["#ff0000", "#ffffff"] },
            "sprites": {
                "hero_idle": { "width": 2, "height": 2, "palette": "hero", "rows": [[1, 0], [0, 2]] }
            },
            "sheets": {
                "hero_walk": { "frames": ["hero_idle"], "frame_duration_ms": 120 }
            }
        }"##;
        let manifest = SpriteManifest::from_json(json).unwrap();
        assert_eq!(manifest.sprites["hero_idle"].width, 2);
        assert_eq!(manifest.sheets["hero_walk"].frame_duration_ms, 120.0);

        let palette = manifest.resolve_palette("hero").unwrap();
        assert_eq!(palette, vec![Color::RED, Color::WHITE]);
    }

    #[test]
    fn frame_duration_defaults() {
        let json = r#"{ "sheets": { "s": { "frames": [] } } }"#;
        let manifest = SpriteManifest::from_json(json).unwrap();
        assert_eq!(manifest.sheets["s"].frame_duration_ms, 150.0);
    }

    #[test]
    fn bad_color_is_an_error() {
        let json = r#"{ "palettes": { "p": ["nope"] } }"#;
        let manifest = SpriteManifest::from_json(json).unwrap();
        assert!(manifest.resolve_palette("p").is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SpriteManifest::from_json("{ nope").is_err());
    }
}
