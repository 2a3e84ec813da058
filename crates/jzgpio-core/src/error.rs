//! Error types for jzgpio-core

use thiserror::Error;

/// Errors raised while interpreting arguments or touching registers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pin designator failed syntactic validation
    #[error("Bad pin specification `{0}'")]
    InvalidDesignator(String),

    /// A valid pin was given without a command
    #[error("no command specified")]
    MissingCommand,

    /// Command requires a value argument that was not supplied
    #[error("value not specified for `{0}'")]
    MissingValue(&'static str),

    /// Value argument is not a base-10 integer
    #[error("invalid value `{value}' for `{command}'")]
    InvalidValue {
        command: &'static str,
        value: String,
    },

    /// Command token not recognised
    #[error("Bad command `{0}'")]
    UnknownCommand(String),

    /// Drive strength code outside 0-3
    #[error("Invalid drive strength {0}. Must be 0-3.")]
    InvalidDriveStrength(u32),

    /// Port index outside the controller's A-G range
    #[error("port index {0} out of range")]
    PortOutOfRange(usize),

    /// Configured stride addresses registers beyond the mapped window
    #[error("mapped window of {size:#x} bytes is too small, need {needed:#x}")]
    MappingTooSmall { needed: usize, size: usize },
}

impl Error {
    /// Whether the tool should still exit successfully after reporting this
    ///
    /// An unknown command and a rejected drive strength leave the hardware
    /// untouched and have always been reported without failing the process.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownCommand(_) | Self::InvalidDriveStrength(_))
    }
}

/// Result type for jzgpio-core operations
pub type Result<T> = core::result::Result<T, Error>;
