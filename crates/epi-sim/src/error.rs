use epi_core::AgentUuid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("duplicate agent {0} in population")]
    DuplicateAgent(AgentUuid),

    #[error("event addressed to unknown agent {0}")]
    UnknownAgent(AgentUuid),
}

pub type SimResult<T> = Result<T, SimError>;
