//! Palette Catalog - read-only design-system swatches
//!
//! Six palettes ship embedded in the binary. Extra palettes in the same JSON
//! shape can be loaded from a directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const BUILTIN_PALETTES: [&str; 6] = [
    include_str!("../palettes/tailwind.json"),
    include_str!("../palettes/radix.json"),
    include_str!("../palettes/material.json"),
    include_str!("../palettes/open_color.json"),
    include_str!("../palettes/chakra.json"),
    include_str!("../palettes/ant.json"),
];

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid palette JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Palette {palette}: group {group} does not match the declared shades")]
    ShadeMismatch { palette: String, group: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorShade {
    pub shade: String,
    pub hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorGroup {
    pub name: String,
    pub colors: Vec<ColorShade>,
}

impl ColorGroup {
    pub fn hex(&self, shade: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|c| c.shade == shade)
            .map(|c| c.hex.as_str())
    }
}

/// A shade key plus a usage hint such as "bg" or "text"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShadeLabel {
    pub shade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub name: String,
    pub shade_labels: Vec<ShadeLabel>,
    pub groups: Vec<ColorGroup>,
}

impl Palette {
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let palette: Palette = serde_json::from_str(json)?;
        palette.check_shades()?;
        Ok(palette)
    }

    pub fn group(&self, name: &str) -> Option<&ColorGroup> {
        self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    /// Hex value of `shade` in hue `group`
    pub fn color(&self, group: &str, shade: &str) -> Option<&str> {
        self.group(group)?.hex(shade)
    }

    /// Every group must list exactly the declared shades, in order, once each.
    pub fn check_shades(&self) -> Result<(), PaletteError> {
        for group in &self.groups {
            let matches = group.colors.len() == self.shade_labels.len()
                && group
                    .colors
                    .iter()
                    .zip(&self.shade_labels)
                    .all(|(color, label)| color.shade == label.shade);

            if !matches {
                return Err(PaletteError::ShadeMismatch {
                    palette: self.name.clone(),
                    group: group.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered palette list with lookup by name
pub struct PaletteCatalog {
    palettes: Vec<Palette>,
}

impl PaletteCatalog {
    pub fn new() -> Self {
        Self { palettes: Vec::new() }
    }

    /// Tailwind, Radix, Material, Open Color, Chakra and Ant Design
    pub fn builtin() -> Self {
        let palettes = BUILTIN_PALETTES
            .iter()
            .filter_map(|json| match Palette::from_json(json) {
                Ok(palette) => Some(palette),
                Err(e) => {
                    tracing::error!(error = %e, "bundled palette is invalid");
                    None
                }
            })
            .collect();
        Self { palettes }
    }

    /// Append every `*.json` palette in `dir`, sorted by file name.
    ///
    /// Files that do not parse or break the shade invariant are skipped.
    pub fn load_from_dir(dir: &Path) -> Result<Self, PaletteError> {
        let mut catalog = Self::new();
        if !dir.exists() {
            return Ok(catalog);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map_or(false, |e| e == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let loaded = fs::read_to_string(&path)
                .map_err(PaletteError::from)
                .and_then(|content| Palette::from_json(&content));
            match loaded {
                Ok(palette) => catalog.register(palette),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping palette"),
            }
        }
        Ok(catalog)
    }

    /// Case-insensitive lookup by palette name
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn list(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn register(&mut self, palette: Palette) {
        self.palettes.push(palette);
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
