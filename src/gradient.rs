//! Gradient Applicator - synthesize a `<defs>` gradient and rewire fills
//!
//! Every application writes a fresh gradient with a new id. Gradients left
//! behind by earlier applications are removed so they never pile up. Other
//! definitions that shared their `<defs>` block (masks, clip paths, filters)
//! are carried over into the single new block.

use std::collections::HashSet;
use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::{set_root_fill, ROOT_TAG};
use crate::color::FILL_CURRENT_COLOR;

static SELF_CLOSING_DEFS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<defs\b[^>]*/>").unwrap());

static DEFS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<defs\b[^>]*>(.*?)</defs>").unwrap());

static GRADIENT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<(?:linear|radial)Gradient\b[^>]*?/>|<(?:linear|radial)Gradient\b.*?</(?:linear|radial)Gradient>",
    )
    .unwrap()
});

static ID_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bid=["']([^"']+)["']"#).unwrap());

static FILL_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)fill=["']#[0-9a-f]{3,6}["']"#).unwrap());

static FILL_RGB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)fill=["']rgb[^"']*["']"#).unwrap());

static PAINT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(fill|stroke)=["']url\(#([^)"']+)\)["']"#).unwrap()
});

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradientSpec {
    #[serde(default)]
    pub kind: GradientKind,
    pub start_color: String,
    pub end_color: String,
    /// Degrees, compass style: 0 points up, 90 right, 180 down. Radial
    /// gradients ignore it.
    #[serde(default = "default_angle")]
    pub angle: f64,
}

fn default_angle() -> f64 { 180.0 }

impl GradientSpec {
    pub fn linear(start_color: impl Into<String>, end_color: impl Into<String>) -> Self {
        Self {
            kind: GradientKind::Linear,
            start_color: start_color.into(),
            end_color: end_color.into(),
            angle: default_angle(),
        }
    }

    pub fn radial(start_color: impl Into<String>, end_color: impl Into<String>) -> Self {
        Self {
            kind: GradientKind::Radial,
            ..Self::linear(start_color, end_color)
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Endpoints of a linear gradient in percent of the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearAxis {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LinearAxis {
    /// The end point sits on the circle inscribed in the 0..100 box at
    /// `angle`. The start point is its mirror through the center.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_angle(angle: f64) -> Self {
        let rad = (angle - 90.0).to_radians();
        let at = |theta: f64| {
            (
                (50.0 + theta.cos() * 50.0).round() as i32,
                (50.0 + theta.sin() * 50.0).round() as i32,
            )
        };
        let (x1, y1) = at(rad + PI);
        let (x2, y2) = at(rad);
        Self { x1, y1, x2, y2 }
    }
}

/// Fresh gradient id: `grad-` followed by seven lowercase alphanumerics.
///
/// Stateless; uniqueness is probabilistic.
pub fn generate_gradient_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("grad-{}", &suffix[..7])
}

/// Fill `svg` with the gradient described by `spec` under a new id.
pub fn apply_gradient(svg: &str, spec: &GradientSpec) -> String {
    apply_gradient_with_id(svg, spec, &generate_gradient_id())
}

/// [`apply_gradient`] taking the gradient parameters directly.
pub fn apply_gradient_with(
    svg: &str,
    kind: GradientKind,
    start_color: &str,
    end_color: &str,
    angle: f64,
) -> String {
    let spec = GradientSpec {
        kind,
        start_color: start_color.to_string(),
        end_color: end_color.to_string(),
        angle,
    };
    apply_gradient(svg, &spec)
}

/// Same as [`apply_gradient`] with a caller-chosen id.
pub fn apply_gradient_with_id(svg: &str, spec: &GradientSpec, id: &str) -> String {
    let (body, retired, kept_defs) = strip_gradient_defs(svg);

    let reference = format!("url(#{id})");
    let fill = format!(r#"fill="{reference}""#);

    let body = FILL_CURRENT_COLOR.replace_all(&body, NoExpand(&fill));
    let body = FILL_HEX.replace_all(&body, NoExpand(&fill));
    let body = FILL_RGB.replace_all(&body, NoExpand(&fill));
    let body = PAINT_URL
        .replace_all(&body, |caps: &Captures| {
            if retired.contains(&caps[2]) {
                format!(r#"{}="{reference}""#, &caps[1])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    let body = if body.contains(&reference) {
        body
    } else {
        set_root_fill(&body, &reference)
    };

    let defs = format!("<defs>{}{}</defs>", gradient_element(spec, id), kept_defs);
    tracing::debug!(id, kind = ?spec.kind, retired = retired.len(), "applied gradient");

    ROOT_TAG
        .replace(&body, |caps: &Captures| format!("<svg{}>{}", &caps[1], defs))
        .into_owned()
}

/// Remove every `<defs>` block. Returns the remaining markup, the ids of the
/// gradients that were dropped, and the non-gradient definitions to carry
/// over.
fn strip_gradient_defs(svg: &str) -> (String, HashSet<String>, String) {
    let mut retired = HashSet::new();
    let mut kept = String::new();

    let without_empty = SELF_CLOSING_DEFS.replace_all(svg, "");
    let body = DEFS_BLOCK
        .replace_all(&without_empty, |caps: &Captures| {
            let remaining = GRADIENT_ELEMENT.replace_all(&caps[1], |gradient: &Captures| {
                let element = &gradient[0];
                let open_tag = &element[..element.find('>').unwrap_or(element.len())];
                if let Some(id) = ID_ATTRIBUTE.captures(open_tag) {
                    retired.insert(id[1].to_string());
                }
                String::new()
            });
            if !remaining.trim().is_empty() {
                kept.push_str(&remaining);
            }
            String::new()
        })
        .into_owned();

    (body, retired, kept)
}

fn gradient_element(spec: &GradientSpec, id: &str) -> String {
    let stops = format!(
        r#"<stop offset="0%" stop-color="{}" /><stop offset="100%" stop-color="{}" />"#,
        spec.start_color, spec.end_color
    );

    match spec.kind {
        GradientKind::Linear => {
            let axis = LinearAxis::from_angle(spec.angle);
            format!(
                r#"<linearGradient id="{id}" x1="{}%" y1="{}%" x2="{}%" y2="{}%">{stops}</linearGradient>"#,
                axis.x1, axis.y1, axis.x2, axis.y2
            )
        }
        GradientKind::Radial => format!(
            r#"<radialGradient id="{id}" cx="50%" cy="50%" r="50%" fx="50%" fy="50%">{stops}</radialGradient>"#
        ),
    }
}
