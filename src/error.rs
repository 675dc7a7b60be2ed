use thiserror;

/// The Result type for slide48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("{source}")]
    EngineError {
        #[from]
        source: crate::engine::error::EngineError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal too small, required minimum size {0} x {1}")]
    TerminalTooSmall(usize, usize),
}
