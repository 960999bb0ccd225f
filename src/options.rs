//! Edit and export options

use serde::{Deserialize, Serialize};

use crate::gradient::GradientSpec;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FillSpec {
    Solid { color: String },
    Gradient(GradientSpec),
}

/// One pass over an icon: recover it from `source`, then recolor and resize
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub source: String,
    #[serde(default)]
    pub fill: Option<FillSpec>,
    #[serde(default)]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_size")]
    pub size: u32,
    /// File stem; the extension follows `format`
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_size() -> u32 { 512 }
fn default_filename() -> String { "icon".to_string() }

impl ExportOptions {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.format.extension())
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            size: default_size(),
            filename: default_filename(),
        }
    }
}
