//! Dimension Setter - force the root tag to a square pixel size

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::attributes::ROOT_TAG;

static WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(\s)width=["'][^"']*["']"#).unwrap());

static HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)(\s)height=["'][^"']*["']"#).unwrap());

/// Set `width` and `height` on the root `<svg>` tag to `size`.
///
/// An existing attribute keeps its position and only its value changes. A
/// missing one is inserted right after `<svg`. Attributes of inner elements
/// and `stroke-width` are left alone. Markup without a root tag is returned
/// as is.
pub fn set_svg_size(svg: &str, size: u32) -> String {
    let Some(tag) = ROOT_TAG.find(svg) else {
        return svg.to_string();
    };

    let sized = set_dimension(tag.as_str(), &WIDTH, "width", size);
    let sized = set_dimension(&sized, &HEIGHT, "height", size);

    let mut result = String::with_capacity(svg.len() + 32);
    result.push_str(&svg[..tag.start()]);
    result.push_str(&sized);
    result.push_str(&svg[tag.end()..]);
    result
}

fn set_dimension(tag: &str, pattern: &Regex, name: &str, size: u32) -> String {
    if pattern.is_match(tag) {
        pattern
            .replace(tag, |caps: &Captures| format!(r#"{}{}="{}""#, &caps[1], name, size))
            .into_owned()
    } else {
        // `<svg` is always the first four bytes of a root tag match.
        format!(r#"{} {}="{}"{}"#, &tag[..4], name, size, &tag[4..])
    }
}
