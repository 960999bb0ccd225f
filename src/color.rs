//! Color Applicator - solid recoloring

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::attributes::set_root_fill;

pub(crate) static FILL_CURRENT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)fill=["']currentColor["']"#).unwrap());

static STROKE_CURRENT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)stroke=["']currentColor["']"#).unwrap());

static ANY_FILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)fill=["'][^"']*["']"#).unwrap());

/// Recolor `svg` with a single solid `color`.
///
/// `currentColor` fills and strokes take the literal color. Icons that carry
/// no explicit fill at all get `fill` on the root tag so their shapes inherit
/// it.
pub fn apply_solid_color(svg: &str, color: &str) -> String {
    let fill = format!(r#"fill="{color}""#);
    let stroke = format!(r#"stroke="{color}""#);

    let result = FILL_CURRENT_COLOR.replace_all(svg, NoExpand(&fill));
    let result = STROKE_CURRENT_COLOR
        .replace_all(&result, NoExpand(&stroke))
        .into_owned();

    if ANY_FILL.is_match(&result) {
        result
    } else {
        set_root_fill(&result, color)
    }
}
