use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A player (or bot) taking part in the match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub i32);

impl TeamId {
    pub const UNKNOWN: TeamId = TeamId(-1);

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

/// Who is holding the interact action this tick
pub trait InteractInput {
    fn is_holding_interact(&self, participant: ParticipantId) -> bool;
}

impl InteractInput for HashSet<ParticipantId> {
    fn is_holding_interact(&self, participant: ParticipantId) -> bool {
        self.contains(&participant)
    }
}

impl InteractInput for BTreeSet<ParticipantId> {
    fn is_holding_interact(&self, participant: ParticipantId) -> bool {
        self.contains(&participant)
    }
}
