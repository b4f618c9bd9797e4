use thiserror::Error;

use tn_core::CoreError;
use tn_planner::PlanError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("planning failed on turn {turn}: {source}")]
    Plan {
        turn:   u32,
        #[source]
        source: PlanError,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
