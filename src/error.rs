use thiserror::Error;

use crate::EntityKind;

pub type MirrorResult<T> = Result<T, MirrorError>;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("no live {kind} matches '{name}' by id or name")]
    NotFound { kind: EntityKind, name: String },
    #[error("characteristic '{characteristic}' has no usable value")]
    MissingValue { characteristic: String },
    #[error("room '{room}' customization expects {expected} scenes but found {found}")]
    StructuralAssumptionViolated {
        room: String,
        expected: usize,
        found: usize,
    },
    #[error("Invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Snapshot codec error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl MirrorError {
    /// Errors of this kind degrade a single display field and never abort a refresh.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::MissingValue { .. } | Self::StructuralAssumptionViolated { .. }
        )
    }
}
