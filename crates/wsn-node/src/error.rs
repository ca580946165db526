use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("network configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match node count {expected}")]
    NodeCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type NodeResult<T> = Result<T, NodeError>;
