//! Attribute Extractor - read view over the root `<svg>` tag
//!
//! Nothing here builds a tree. The root tag is located with a pattern match
//! and its `name="value"` tokens are collected into a map.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Root tag attributes keyed by name (`stroke-width`, `viewBox`, ...)
pub type AttributeMap = HashMap<String, String>;

pub(crate) static ROOT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg([^>]*)>").unwrap());

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+(?:-\w+)*)=["']([^"']*)["']"#).unwrap());

static ROOT_FILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(\s)fill=["'][^"']*["']"#).unwrap());

static INNER_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<svg[^>]*>(.*)</svg>").unwrap());

/// Attributes of the root `<svg>` tag.
///
/// Tokens that do not look like `name="value"` are skipped. Markup without an
/// opening tag yields an empty map.
pub fn svg_attributes(svg: &str) -> AttributeMap {
    let Some(tag) = ROOT_TAG.captures(svg) else {
        return AttributeMap::new();
    };

    ATTRIBUTE
        .captures_iter(&tag[1])
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Everything between the end of the opening tag and the final `</svg>`.
pub fn svg_inner_content(svg: &str) -> &str {
    INNER_CONTENT
        .captures(svg)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Set `fill` on the root tag. An existing root `fill` (often `"none"` on
/// stroke icons) has its value replaced; otherwise the attribute is appended.
pub(crate) fn set_root_fill(svg: &str, value: &str) -> String {
    let fill = format!(r#"fill="{value}""#);
    ROOT_TAG
        .replace(svg, |caps: &Captures| {
            let attrs = &caps[1];
            if ROOT_FILL.is_match(attrs) {
                let attrs = ROOT_FILL.replace(attrs, |fill_caps: &Captures| {
                    format!("{}{}", &fill_caps[1], fill)
                });
                format!("<svg{attrs}>")
            } else {
                format!("<svg{attrs} {fill}>")
            }
        })
        .into_owned()
}
