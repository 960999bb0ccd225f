//! Contract Invariant Tests
//!
//! These tests pin down the guarantees of the transform pipeline, using
//! scripted host capabilities in place of a real surface and disk.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use base64::Engine;
use iconsmith_core::{
    apply_gradient, apply_solid_color, parse_svg_content, set_svg_size, svg_attributes,
    svg_to_png_data_uri, EditRequest, ExportFormat, ExportOptions, ExportPayload, FileSink,
    FillSpec, GradientSpec, IconPipeline, ImageRenderer, PaletteCatalog, PipelineError,
    RenderError, ResvgRenderer, SvgPayload,
};

const FAKE_PNG: &[u8] = b"\x89PNG fake";

/// Renderer double with a fixed outcome
struct ScriptedRenderer {
    fail: Option<fn(String) -> RenderError>,
    seen: Rc<RefCell<Vec<String>>>,
}

impl ScriptedRenderer {
    fn succeeding() -> Self {
        Self { fail: None, seen: Rc::default() }
    }

    fn failing(kind: fn(String) -> RenderError) -> Self {
        Self { fail: Some(kind), seen: Rc::default() }
    }
}

impl ImageRenderer for ScriptedRenderer {
    fn render(&self, payload: &SvgPayload, _size: u32) -> Result<Vec<u8>, RenderError> {
        let svg = String::from_utf8(payload.data().to_vec()).unwrap();
        self.seen.borrow_mut().push(svg);
        match self.fail {
            Some(kind) => Err(kind("scripted".into())),
            None => Ok(FAKE_PNG.to_vec()),
        }
    }
}

/// Sink double that keeps every saved file in memory
#[derive(Default, Clone)]
struct MemorySink {
    saved: Rc<RefCell<Vec<(String, ExportPayload)>>>,
    calls: Rc<Cell<usize>>,
}

impl FileSink for MemorySink {
    fn save(&self, payload: ExportPayload, filename: &str) {
        self.calls.set(self.calls.get() + 1);
        self.saved.borrow_mut().push((filename.to_string(), payload));
    }
}

fn pipeline_with(renderer: ScriptedRenderer) -> (IconPipeline, MemorySink) {
    let sink = MemorySink::default();
    let pipeline = IconPipeline::new(Box::new(renderer), Box::new(sink.clone()));
    (pipeline, sink)
}

fn root_tag(svg: &str) -> &str {
    &svg[..=svg.find('>').unwrap()]
}

fn gradient_id(svg: &str) -> String {
    let start = svg.find(r#"Gradient id=""#).unwrap() + r#"Gradient id=""#.len();
    let end = start + svg[start..].find('"').unwrap();
    svg[start..end].to_string()
}

#[test]
fn invariant_normalizer_idempotent() {
    let inputs = [
        "  <svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg>  ",
        "prefix text\n<SVG>\n  <g>\n  </g>\n</SVG>\ntrailing",
        "<svg a='1'></svg><svg b='2'></svg>",
    ];
    for raw in inputs {
        let once = parse_svg_content(raw).unwrap();
        assert_eq!(parse_svg_content(once), Some(once));
    }
    assert_eq!(parse_svg_content("no markup here"), None);
}

#[test]
fn invariant_solid_color_scenarios() {
    let out = apply_solid_color(r#"<svg><path fill="currentColor"/></svg>"#, "#ff0000");
    assert!(out.contains(r##"fill="#ff0000""##));
    assert_eq!(root_tag(&out), "<svg>");

    let out = apply_solid_color(r#"<svg><path d="M0 0"/></svg>"#, "#00ff00");
    assert_eq!(root_tag(&out), r##"<svg fill="#00ff00">"##);
    assert!(out.contains(r#"<path d="M0 0"/>"#));
}

#[test]
fn invariant_solid_color_idempotent() {
    let svg = r##"<svg viewBox="0 0 16 16"><path fill="#334155" d="M0 0h16v16z"/></svg>"##;
    let once = apply_solid_color(svg, "#e11d48");
    assert_eq!(once, svg);
    assert_eq!(apply_solid_color(&once, "#e11d48"), once);
}

#[test]
fn invariant_set_size_single_pair_on_root() {
    let inputs = [
        r#"<svg viewBox="0 0 24 24"><path/></svg>"#,
        r#"<svg width="10" height="20" viewBox="0 0 24 24"><path/></svg>"#,
        r#"<svg height='5'><rect width="3" height="3"/></svg>"#,
    ];
    for svg in inputs {
        for size in [1, 32, 1024] {
            let out = set_svg_size(svg, size);
            let root = root_tag(&out);
            assert_eq!(root.matches(&format!(r#" width="{size}""#)).count(), 1, "{out}");
            assert_eq!(root.matches(&format!(r#" height="{size}""#)).count(), 1, "{out}");
            assert_eq!(root.matches("width=").count(), 1);
            assert_eq!(root.matches("height=").count(), 1);
        }
    }

    let out = set_svg_size(r#"<svg viewBox="0 0 24 24"><path/></svg>"#, 32);
    assert_eq!(svg_attributes(&out)["viewBox"], "0 0 24 24");
}

#[test]
fn invariant_gradient_single_defs_and_fill_reference() {
    let inputs = [
        r#"<svg><path fill="currentColor"/></svg>"#,
        r#"<svg><path d="M0 0"/></svg>"#,
        r##"<svg><defs><linearGradient id="x"/></defs><path fill="#123456"/></svg>"##,
        r#"<svg><defs><mask id="m"/></defs><defs></defs><path fill="url(#x)"/></svg>"#,
    ];
    for svg in inputs {
        for spec in [GradientSpec::linear("#000", "#fff"), GradientSpec::radial("#f00", "#00f")] {
            let out = apply_gradient(svg, &spec);
            let id = gradient_id(&out);

            assert_eq!(out.matches("<defs>").count(), 1, "{out}");
            assert_eq!(out.matches("</defs>").count(), 1, "{out}");
            assert!(out.contains(&format!(r#"fill="url(#{id})""#)), "{out}");
            assert!(out.starts_with("<svg") && out.ends_with("</svg>"));
        }
    }
}

#[test]
fn invariant_gradient_on_stroke_icon_stays_renderable() {
    let svg = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" "#,
        r#"fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/></svg>"#,
    );
    let out = apply_gradient(svg, &GradientSpec::linear("#000000", "#ffffff"));
    let id = gradient_id(&out);

    let root = root_tag(&out);
    assert_eq!(root.matches("fill=").count(), 1, "{root}");
    assert_eq!(svg_attributes(&out)["fill"], format!("url(#{id})"));

    let uri = svg_to_png_data_uri(&ResvgRenderer::new(), &out, 32).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[test]
fn invariant_gradient_stop_colors() {
    let out = apply_gradient(
        r#"<svg><path fill="currentColor"/></svg>"#,
        &GradientSpec::linear("#000000", "#ffffff").with_angle(180.0),
    );
    assert!(out.contains("<linearGradient"));
    assert!(out.contains(r#"x1="50%" y1="0%" x2="50%" y2="100%""#));

    let stops: Vec<_> = out
        .match_indices(r#"stop-color=""#)
        .map(|(i, m)| {
            let value = &out[i + m.len()..];
            &value[..value.find('"').unwrap()]
        })
        .collect();
    assert_eq!(stops, ["#000000", "#ffffff"]);
}

#[test]
fn invariant_gradient_ids_distinct() {
    let svg = r#"<svg><path fill="currentColor"/></svg>"#;
    let spec = GradientSpec::linear("#000", "#fff");
    let ids: HashSet<_> = (0..200).map(|_| gradient_id(&apply_gradient(svg, &spec))).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn invariant_rasterizer_sizes_before_rendering() {
    let renderer = ScriptedRenderer::succeeding();
    let seen = renderer.seen.clone();

    let uri = svg_to_png_data_uri(&renderer, r#"<svg viewBox="0 0 24 24"></svg>"#, 48).unwrap();

    let expected = base64::engine::general_purpose::STANDARD.encode(FAKE_PNG);
    assert_eq!(uri, format!("data:image/png;base64,{expected}"));
    assert_eq!(
        seen.borrow().as_slice(),
        [r#"<svg height="48" width="48" viewBox="0 0 24 24"></svg>"#]
    );
}

#[test]
fn invariant_render_failures_surface() {
    let (pipeline, sink) = pipeline_with(ScriptedRenderer::failing(RenderError::RenderFailure));
    let options = ExportOptions { format: ExportFormat::Png, ..Default::default() };

    let err = pipeline.export("<svg></svg>", &options).unwrap_err();
    assert!(matches!(err, PipelineError::Render(RenderError::RenderFailure(_))));
    assert_eq!(sink.calls.get(), 0);

    let (pipeline, _) = pipeline_with(ScriptedRenderer::failing(RenderError::ContextUnavailable));
    let err = pipeline.export("<svg></svg>", &options).unwrap_err();
    assert!(err.to_string().contains("Rendering surface unavailable"));
}

#[test]
fn invariant_edit_then_export() {
    let (pipeline, sink) = pipeline_with(ScriptedRenderer::succeeding());

    let request = EditRequest {
        source: "pasted:\n<svg viewBox=\"0 0 24 24\"><path fill=\"currentColor\"/></svg>\n".into(),
        fill: Some(FillSpec::Solid { color: "#64748b".into() }),
        size: Some(24),
    };
    let svg = pipeline.edit(&request).unwrap();
    assert_eq!(
        svg,
        r##"<svg height="24" width="24" viewBox="0 0 24 24"><path fill="#64748b"/></svg>"##
    );
    assert_eq!(pipeline.inspect(&svg)["width"], "24");

    pipeline
        .export(&svg, &ExportOptions { size: 64, filename: "slate".into(), ..Default::default() })
        .unwrap();
    pipeline
        .export(&svg, &ExportOptions { format: ExportFormat::Png, size: 64, filename: "slate".into() })
        .unwrap();

    let saved = sink.saved.borrow();
    assert_eq!(saved.len(), 2);

    assert_eq!(saved[0].0, "slate.svg");
    match &saved[0].1 {
        ExportPayload::Text { content, mime } => {
            assert!(content.starts_with(r#"<svg height="64" width="64""#));
            assert_eq!(mime, "image/svg+xml;charset=utf-8");
        }
        other => panic!("expected text payload, got {other:?}"),
    }

    assert_eq!(saved[1].0, "slate.png");
    assert_eq!(saved[1].1.to_bytes().unwrap(), FAKE_PNG);
}

#[test]
fn invariant_edit_errors() {
    let (pipeline, _) = pipeline_with(ScriptedRenderer::succeeding());

    let request = EditRequest { source: "nothing to see".into(), fill: None, size: None };
    assert!(matches!(pipeline.edit(&request), Err(PipelineError::NoMatchFound)));

    let request = EditRequest { source: "<svg></svg>".into(), fill: None, size: Some(0) };
    assert!(matches!(pipeline.edit(&request), Err(PipelineError::InvalidSize(0))));
}

#[test]
fn invariant_edit_request_from_json() {
    let (pipeline, _) = pipeline_with(ScriptedRenderer::succeeding());
    let request: EditRequest = serde_json::from_str(
        r##"{
            "source": "<svg><path d='M0 0'/></svg>",
            "fill": {"type": "gradient", "startColor": "#000", "endColor": "#fff", "angle": 90}
        }"##,
    )
    .unwrap();

    let svg = pipeline.edit(&request).unwrap();
    let id = gradient_id(&svg);
    assert!(svg.starts_with(&format!(r#"<svg fill="url(#{id})"><defs>"#)));
    assert!(svg.contains(r#"x1="0%" y1="50%" x2="100%" y2="50%""#));
}

#[test]
fn invariant_palette_feeds_transforms() {
    let catalog = PaletteCatalog::builtin();
    let radix = catalog.get("Radix").unwrap();
    let start = radix.groups[0].colors[0].hex.clone();
    let end = radix.groups[0].colors.last().unwrap().hex.clone();

    let out = apply_gradient(r#"<svg><path fill="currentColor"/></svg>"#, &GradientSpec::linear(&*start, &*end));
    assert!(out.contains(&format!(r#"stop-color="{start}""#)));
    assert!(out.contains(&format!(r#"stop-color="{end}""#)));
}
