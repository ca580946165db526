use thiserror::Error;
use wsn_core::WsnError;
use wsn_node::NodeError;
use wsn_protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] WsnError),

    #[error("network setup failed: {0}")]
    Network(#[from] NodeError),

    #[error("protocol setup failed: {0}")]
    Protocol(#[from] ProtocolError),
}

pub type SimResult<T> = Result<T, SimError>;
