use thiserror::Error;

/// Errors raised when configuring a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both dimensions must be non-zero")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Resolution {width}x{height} is too large to allocate")]
    ResolutionTooLarge { width: u32, height: u32 },
}

pub type RenderResult<T> = Result<T, RenderError>;
