//! Edit Pipeline - normalize, recolor, resize, export
//!
//! Every stage is a pure string transform. The pipeline only owns the two
//! host capabilities that export needs.

use std::path::PathBuf;
use thiserror::Error;

use crate::attributes::{svg_attributes, AttributeMap};
use crate::color::apply_solid_color;
use crate::dimensions::set_svg_size;
use crate::export::{download_data_uri, download_svg, DirectorySink, FileSink};
use crate::gradient::apply_gradient;
use crate::normalize::parse_svg_content;
use crate::options::{EditRequest, ExportFormat, ExportOptions, FillSpec};
use crate::render::{svg_to_png_data_uri, ImageRenderer, RenderError, ResvgRenderer};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No SVG found in input")]
    NoMatchFound,

    #[error("Invalid size: {0}")]
    InvalidSize(u32),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub struct IconPipeline {
    renderer: Box<dyn ImageRenderer>,
    sink: Box<dyn FileSink>,
}

impl IconPipeline {
    pub fn new(renderer: Box<dyn ImageRenderer>, sink: Box<dyn FileSink>) -> Self {
        Self { renderer, sink }
    }

    /// `resvg` rendering with files written into `dir`
    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(ResvgRenderer::new()), Box::new(DirectorySink::new(dir)))
    }

    /// Root tag attributes of `svg`
    pub fn inspect(&self, svg: &str) -> AttributeMap {
        svg_attributes(svg)
    }

    /// Recover the icon from `request.source` and apply the requested fill and size.
    pub fn edit(&self, request: &EditRequest) -> Result<String, PipelineError> {
        let svg = parse_svg_content(&request.source).ok_or(PipelineError::NoMatchFound)?;

        let svg = match &request.fill {
            Some(FillSpec::Solid { color }) => apply_solid_color(svg, color),
            Some(FillSpec::Gradient(spec)) => apply_gradient(svg, spec),
            None => svg.to_string(),
        };

        match request.size {
            Some(0) => Err(PipelineError::InvalidSize(0)),
            Some(size) => Ok(set_svg_size(&svg, size)),
            None => Ok(svg),
        }
    }

    /// Save `svg` through the sink in the format and size of `options`.
    ///
    /// Only rasterization can fail here. Once the payload reaches the sink,
    /// save errors are the sink's to report.
    pub fn export(&self, svg: &str, options: &ExportOptions) -> Result<(), PipelineError> {
        if options.size == 0 {
            return Err(PipelineError::InvalidSize(0));
        }

        let filename = options.file_name();
        match options.format {
            ExportFormat::Svg => {
                download_svg(self.sink.as_ref(), &set_svg_size(svg, options.size), &filename);
            }
            ExportFormat::Png => {
                let uri = svg_to_png_data_uri(self.renderer.as_ref(), svg, options.size)?;
                download_data_uri(self.sink.as_ref(), &uri, &filename);
            }
        }

        tracing::debug!(filename = %filename, format = ?options.format, "export handed to sink");
        Ok(())
    }
}
