//! Error types for the input layer
//!
//! Absent devices, unknown raw bits and unknown physical codes are normal
//! operating conditions and never surface here.

use thiserror::Error;

/// Failures that can occur while setting up the input layer
#[derive(Debug, Error)]
pub enum InputError {
    /// The raw sample source could not be opened; no driver is constructed
    #[error("failed to initialize raw sample source: {0}")]
    SourceInit(String),

    /// A port index outside `0..MAX_PORTS`
    #[error("invalid port {0} (expected 0..{max})", max = crate::input::MAX_PORTS)]
    InvalidPort(u8),

    /// The same port was configured twice
    #[error("port {0} configured more than once")]
    DuplicatePort(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InputError::InvalidPort(7).to_string(),
            "invalid port 7 (expected 0..4)"
        );
        assert_eq!(
            InputError::DuplicatePort(1).to_string(),
            "port 1 configured more than once"
        );
        assert!(InputError::SourceInit("no pads".into())
            .to_string()
            .contains("no pads"));
    }
}
