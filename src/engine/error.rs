use thiserror;

use super::cell::Idx;

/// The Result type for board operations.
pub(crate) type Result<T> = std::result::Result<T, EngineError>;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub(crate) enum EngineError {
    #[error("invalid target edge {to} for line of length {len}")]
    InvalidEdge { to: usize, len: usize },

    #[error("line of length {0} is too short to shift or merge")]
    LineTooShort(usize),

    #[error("could not determine grid size")]
    NoGrid,

    #[error("column index {col} out of bounds for board of width {width}")]
    ColumnOutOfBounds { col: usize, width: usize },

    #[error("no empty cells found")]
    BoardFull,

    #[error("step called on already finished animation at {0}")]
    AnimationFinished(Idx),
}

impl EngineError {
    /// Stepping a finished animation means the commit-and-detach step was skipped. Every other
    /// variant can be absorbed by treating the operation as a no-op.
    pub(crate) fn is_contract_violation(&self) -> bool {
        matches!(self, Self::AnimationFinished(_))
    }

    pub(crate) fn is_structural(&self) -> bool {
        matches!(self, Self::NoGrid | Self::ColumnOutOfBounds { .. })
    }
}
