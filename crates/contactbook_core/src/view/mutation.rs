//! Per-operation mutation lifecycle.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle of one mutating operation against persisted state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: MutationState,
    pub to: MutationState,
}

impl Display for InvalidTransition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid mutation transition {:?} -> {:?}", self.from, self.to)
    }
}

impl Error for InvalidTransition {}

impl MutationState {
    /// Starts a mutation. Allowed from any settled state.
    pub fn begin(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Pending => Err(self.reject(Self::Pending)),
            _ => Ok(Self::Pending),
        }
    }

    pub fn commit(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Pending => Ok(Self::Committed),
            _ => Err(self.reject(Self::Committed)),
        }
    }

    pub fn roll_back(self) -> Result<Self, InvalidTransition> {
        match self {
            Self::Pending => Ok(Self::RolledBack),
            _ => Err(self.reject(Self::RolledBack)),
        }
    }

    fn reject(self, to: Self) -> InvalidTransition {
        InvalidTransition { from: self, to }
    }
}
