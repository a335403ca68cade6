//! Registry of named sprites and sheets with identity assignment.

use std::collections::HashMap;

use super::manifest::{ManifestError, SpriteManifest};
use super::sprite::{Sprite, SpriteDefinition, SpriteId, SpriteSheet};

/// Name-keyed sprite storage. Every registered definition gets the next
/// sequential `SpriteId`; ids are never reused, so render caches keyed on
/// them stay valid for the program's lifetime.
pub struct SpriteRegistry {
    sprites: HashMap<String, Sprite>,
    sheets: HashMap<String, SpriteSheet>,
    next_id: u32,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
            sheets: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a definition under a name, assigning its identity.
    /// Re-registering a name replaces the art under a fresh id.
    pub fn register(&mut self, name: impl Into<String>, def: SpriteDefinition) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.sprites.insert(name.into(), Sprite { id, def });
        id
    }

    /// Register an animation sheet from already-registered frame names.
    /// Unknown frame names are skipped.
    pub fn register_sheet(
        &mut self,
        name: impl Into<String>,
        frame_names: &[&str],
        frame_duration_ms: f64,
    ) {
        let frames = frame_names
            .iter()
            .filter_map(|n| self.sprites.get(*n).cloned())
            .collect();
        self.sheets.insert(
            name.into(),
            SpriteSheet {
                frames,
                frame_duration_ms,
            },
        );
    }

    /// Look up a sprite by name.
    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// Look up a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&SpriteSheet> {
        self.sheets.get(name)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Build a registry from a parsed manifest, resolving palettes and
    /// sheet frame references.
    pub fn from_manifest(manifest: &SpriteManifest) -> Result<Self, ManifestError> {
        let mut registry = Self::new();

        for (name, art) in &manifest.sprites {
            let palette = manifest.resolve_palette(&art.palette).map_err(|e| match e {
                ManifestError::UnknownPalette { palette, .. } => ManifestError::UnknownPalette {
                    sprite: name.clone(),
                    palette,
                },
                other => other,
            })?;
            let def = SpriteDefinition::new(art.width, art.height, &art.rows, palette);
            registry.register(name.clone(), def);
        }

        for (name, desc) in &manifest.sheets {
            let mut frames = Vec::with_capacity(desc.frames.len());
            for frame in &desc.frames {
                let sprite =
                    registry
                        .sprites
                        .get(frame)
                        .cloned()
                        .ok_or_else(|| ManifestError::UnknownFrame {
                            sheet: name.clone(),
                            frame: frame.clone(),
                        })?;
                frames.push(sprite);
            }
            registry.sheets.insert(
                name.clone(),
                SpriteSheet {
                    frames,
                    frame_duration_ms: desc.frame_duration_ms,
                },
            );
        }

        Ok(registry)
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::Color;

    fn dot() -> SpriteDefinition {
        SpriteDefinition::new(1, 1, &[vec![1]], vec![Color::WHITE])
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let mut reg = SpriteRegistry::new();
        let a = reg.register("a", dot());
        let b = reg.register("b", dot());
        assert_ne!(a, b);
        assert_eq!(reg.get("a").unwrap().id, a);
    }

    #[test]
    fn reregistering_assigns_a_fresh_id() {
        let mut reg = SpriteRegistry::new();
        let first = reg.register("a", dot());
        let second = reg.register("a", dot());
        assert_ne!(first, second);
        assert_eq!(reg.sprite_count(), 1);
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SpriteRegistry::new();
        assert!(reg.get("nonexistent").is_none());
    }

    #[test]
    fn loads_from_manifest() {
        let json = r##"{
            "palettes": { "p": ["#ff0000"] },
            "sprites": {
                "dot": { "width": 1, "height": 1, "palette": "p", "rows": [[1]] }
            },
            "sheets": {
                "blink": { "frames": ["dot", "dot"], "frame_duration_ms": 100 }
            }
        }"##;
        let manifest = SpriteManifest::from_json(json).unwrap();
        let reg = SpriteRegistry::from_manifest(&manifest).unwrap();
        assert!(reg.get("dot").is_some());
        assert_eq!(reg.sheet("blink").unwrap().frame_count(), 2);
    }

    #[test]
    fn dangling_sheet_frame_is_an_error() {
        let json = r#"{ "sheets": { "s": { "frames": ["missing"] } } }"#;
        let manifest = SpriteManifest::from_json(json).unwrap();
        assert!(SpriteRegistry::from_manifest(&manifest).is_err());
    }
}
