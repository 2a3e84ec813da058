//! Top-level error type and exit status mapping

use jzgpio_physmap::PhysMapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Gpio(#[from] jzgpio_core::Error),

    #[error(transparent)]
    PhysMap(#[from] PhysMapError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status after reporting this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Gpio(e) if !e.is_fatal() => 0,
            _ => 2,
        }
    }
}
