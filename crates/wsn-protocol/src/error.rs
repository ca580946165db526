use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("{protocol}: parameter `{name}` = {value} is out of range ({expected})")]
    InvalidParam {
        protocol: &'static str,
        name:     &'static str,
        value:    f64,
        expected: &'static str,
    },

    #[error("unknown protocol `{0}`")]
    UnknownProtocol(String),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Check that `value` lies in `[lo, hi]`.
pub(crate) fn check_range(
    protocol: &'static str,
    name:     &'static str,
    value:    f64,
    lo:       f64,
    hi:       f64,
    expected: &'static str,
) -> ProtocolResult<()> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(ProtocolError::InvalidParam { protocol, name, value, expected })
    }
}
