use std::path::PathBuf;
use thiserror::Error;

/// The main error type for lanelet2xodr operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse Lanelet2 OSM XML from {path}: {message}")]
    OsmXmlParse { path: PathBuf, message: String },

    #[error("Failed to write OpenDRIVE to {path}: {source}")]
    XodrWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[from] serde_json::Error),

    #[error("Strict mode: {skipped} lanelet relation(s) were skipped")]
    StrictSkipped { skipped: usize },
}
