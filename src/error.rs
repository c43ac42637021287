use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
