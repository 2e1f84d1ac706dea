use thiserror::Error;

use crate::canvas::ShapeId;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Box content is neither a `line_<n>` map nor a list of lines.
    #[error("box with style `{style}` has content that is neither keyed lines nor a line list")]
    MalformedContent { style: String },

    #[error("paragraph added to {0}, which this canvas does not own")]
    UnknownShape(ShapeId),

    #[error("invalid chart document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to rasterize chart: {0}")]
    Raster(String),
}
