//! Content Normalizer - recover an SVG fragment from pasted text
//!
//! The match is greedy: it spans from the first `<svg` to the last `</svg>`.
//! Multiple or nested documents in one input are not told apart.

use std::sync::LazyLock;

use regex::Regex;

static SVG_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg.*</svg>").unwrap());

/// Locate the SVG fragment inside `raw`.
///
/// Returns `None` when the input holds no `<svg>...</svg>` pair. Absence is an
/// expected outcome for free text, so it is not reported as an error.
pub fn parse_svg_content(raw: &str) -> Option<&str> {
    SVG_FRAGMENT.find(raw.trim()).map(|m| m.as_str())
}
