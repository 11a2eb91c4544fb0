use lumen_math::MathError;
use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
///
/// A ray missing everything, or a light contributing nothing, is not an
/// error; those are ordinary outcomes of the per-ray queries.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
