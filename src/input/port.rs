//! Controller port identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InputError;

/// Number of controller ports, fixed at process start
pub const MAX_PORTS: usize = 4;

/// A controller port in `0..MAX_PORTS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Port(u8);

impl Port {
    /// Create a port, returning `None` when out of range
    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < MAX_PORTS).then_some(Self(index))
    }

    /// Zero-based index, usable for array access
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate every port in order
    pub fn all() -> impl Iterator<Item = Port> {
        (0..MAX_PORTS as u8).map(Port)
    }
}

impl TryFrom<u8> for Port {
    type Error = InputError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Port::new(index).ok_or(InputError::InvalidPort(index))
    }
}

impl From<Port> for u8 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl fmt::Display for Port {
    /// Ports are shown 1-based, the way players count them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port{}", self.0 + 1)
    }
}
