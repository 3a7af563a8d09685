use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartRenderError {
    #[error("not enough points to render")]
    NotEnoughPoints,
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("png encoding failure: {0}")]
    PngEncoding(String),
    #[error("render task join failure: {0}")]
    Join(String),
    #[error("failed to write chart image {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

impl ChartRenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotEnoughPoints => "CHART_NOT_ENOUGH_POINTS",
            Self::Backend(_) => "CHART_BACKEND_ERROR",
            Self::PngEncoding(_) => "CHART_PNG_ENCODING_ERROR",
            Self::Join(_) => "CHART_TASK_JOIN_ERROR",
            Self::Write { .. } => "CHART_WRITE_ERROR",
        }
    }
}
