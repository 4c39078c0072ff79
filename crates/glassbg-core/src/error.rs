use thiserror::Error;

/// Failures surfaced by the renderer core and its GPU backends.
///
/// Everything except `Surface` is a start-up condition: the pipeline cannot
/// run without both programs and a device, so hosts treat those as fatal.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("device request failed: {0}")]
    DeviceRequest(String),
    #[error("shader program failed to build: {0}")]
    ShaderCompilation(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("backend used before prepare()")]
    NotPrepared,
    #[error("backend has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
