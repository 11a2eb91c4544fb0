use thiserror::Error;

/// Errors raised when constructing geometric objects.
///
/// These are always construction-time failures; nothing in the per-ray path
/// returns a `MathError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("transform is not invertible (determinant {0})")]
    NonInvertibleTransform(f32),

    #[error("degenerate basis: {0}")]
    DegenerateBasis(&'static str),

    #[error("degenerate direction: {0}")]
    DegenerateDirection(&'static str),
}

pub type MathResult<T> = Result<T, MathError>;
