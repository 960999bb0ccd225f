//! Exporter - one-shot saves of SVG text or data URIs
//!
//! Saving is fire-and-forget: a sink logs its failures and never reports them
//! back to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::render::SVG_MIME;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    Text { content: String, mime: String },
    DataUri(String),
}

impl ExportPayload {
    /// Raw bytes to write, decoding base64 data URIs.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        match self {
            ExportPayload::Text { content, .. } => Ok(content.as_bytes().to_vec()),
            ExportPayload::DataUri(uri) => decode_data_uri(uri),
        }
    }
}

/// Destination for exported files
pub trait FileSink {
    fn save(&self, payload: ExportPayload, filename: &str);
}

/// Save `svg` as `filename`.
pub fn download_svg(sink: &dyn FileSink, svg: &str, filename: &str) {
    sink.save(
        ExportPayload::Text {
            content: svg.to_string(),
            mime: SVG_MIME.to_string(),
        },
        filename,
    );
}

/// Save the content of a data URI as `filename`.
pub fn download_data_uri(sink: &dyn FileSink, data_uri: &str, filename: &str) {
    sink.save(ExportPayload::DataUri(data_uri.to_string()), filename);
}

fn decode_data_uri(uri: &str) -> io::Result<Vec<u8>> {
    let invalid = |msg: &str| io::Error::new(io::ErrorKind::InvalidData, msg.to_string());

    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| invalid("not a data URI"))?;
    let (header, body) = rest
        .split_once(',')
        .ok_or_else(|| invalid("data URI has no payload"))?;

    if header.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|e| invalid(&e.to_string()))
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

/// Writes exports as files inside one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write(&self, payload: &ExportPayload, filename: &str) -> io::Result<PathBuf> {
        // Only the final component is honoured; the file always lands in `dir`
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty filename"))?;
        let path = self.dir.join(name);

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, payload.to_bytes()?)?;
        Ok(path)
    }
}

impl FileSink for DirectorySink {
    fn save(&self, payload: ExportPayload, filename: &str) {
        match self.write(&payload, filename) {
            Ok(path) => tracing::info!(path = %path.display(), "exported file"),
            Err(e) => tracing::warn!(filename, error = %e, "export failed"),
        }
    }
}
