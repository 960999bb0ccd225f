//! Icon Smith Core - SVG icon editing engine
//!
//! # Ground Rules
//! 1. Markup Stays Text (no DOM; unrelated bytes survive untouched)
//! 2. Transforms Are Pure (string in, string out)
//! 3. Absence Is Not Failure (only rasterization reports errors)
//! 4. Hosts Are Capabilities (rendering and saving sit behind traits)

pub mod normalize;
pub mod attributes;
pub mod color;
pub mod gradient;
pub mod dimensions;
pub mod render;
pub mod export;
pub mod palette;
pub mod options;
pub mod pipeline;

pub use normalize::parse_svg_content;
pub use attributes::{svg_attributes, svg_inner_content, AttributeMap};
pub use color::apply_solid_color;
pub use gradient::{apply_gradient, apply_gradient_with, apply_gradient_with_id, generate_gradient_id, GradientKind, GradientSpec, LinearAxis};
pub use dimensions::set_svg_size;
pub use render::{svg_to_png_data_uri, ImageRenderer, RenderError, ResvgRenderer, SvgPayload};
pub use export::{download_data_uri, download_svg, DirectorySink, ExportPayload, FileSink};
pub use palette::{ColorGroup, ColorShade, Palette, PaletteCatalog, PaletteError, ShadeLabel};
pub use options::{EditRequest, ExportFormat, ExportOptions, FillSpec};
pub use pipeline::{IconPipeline, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
