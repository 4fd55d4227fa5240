use std::fmt;

use super::error::NetworkIdError;

/// Identity of a replicated entity, shared by the authority and every observer.
/// Always positive; only the authority's registry creates new ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(u32);

impl NetworkId {
    pub const FIRST: NetworkId = NetworkId(1);

    pub fn new(value: u32) -> Result<Self, NetworkIdError> {
        if value == 0 {
            return Err(NetworkIdError::Zero);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The id following this one, or None once the id space is used up
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u32> for NetworkId {
    type Error = NetworkIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
