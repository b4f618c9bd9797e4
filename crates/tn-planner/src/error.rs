use thiserror::Error;

use tn_network::NetworkError;

use crate::ActionKind;

#[derive(Debug, Error)]
pub enum PlanError {
    /// A commit was rejected by the network: the planner tried to apply an
    /// action it had not validated.
    #[error("commit rejected by network: {0}")]
    Network(#[from] NetworkError),

    /// A commit was attempted past a cap or beyond the remaining budget.
    #[error("{kind} costing {cost} not admitted (remaining budget {remaining})")]
    NotAdmitted { kind: ActionKind, cost: u64, remaining: u64 },

    /// Post-commit audit failed (debug builds only).
    #[error("network invariant violated after commit: {0}")]
    Invariant(NetworkError),
}

pub type PlanResult<T> = Result<T, PlanError>;
