/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding or accepting connections failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// A local socket query failed.
    #[error("socket error: {0}")]
    Io(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_operation() {
        let io = || std::io::Error::other("boom");
        assert!(TransportError::SendFailed(io()).to_string().starts_with("send failed"));
        assert!(TransportError::AcceptFailed(io()).to_string().starts_with("accept failed"));
        assert!(TransportError::Io(io()).to_string().starts_with("socket error"));
    }
}
