use rampart_serde::Vec3;

use super::participant::{ParticipantId, TeamId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectiveEventType {
    BombPlanted,
    BombDefused,
    BombExploded,
}

/// Record of one completed objective transition. Built once by the
/// authority and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectiveEventData {
    event_type: ObjectiveEventType,
    player_id: ParticipantId,
    team_id: TeamId,
    objective_id: i32,
    position: Vec3,
}

impl ObjectiveEventData {
    pub fn new(
        event_type: ObjectiveEventType,
        player_id: ParticipantId,
        team_id: TeamId,
        objective_id: i32,
        position: Vec3,
    ) -> Self {
        Self {
            event_type,
            player_id,
            team_id,
            objective_id,
            position,
        }
    }

    pub fn event_type(&self) -> ObjectiveEventType {
        self.event_type
    }

    pub fn player_id(&self) -> ParticipantId {
        self.player_id
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Index of the site the objective belongs to
    pub fn objective_id(&self) -> i32 {
        self.objective_id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// Why an in-progress plant or defuse stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The policy no longer approves the action or role
    PolicyDenied,
    InteractReleased,
    LeftZone,
    /// Another defender took over the defuse
    Replaced,
    /// A bomb is already live somewhere else
    BombAlreadyActive,
}

/// Emitted by a BombSite
#[derive(Clone, Debug, PartialEq)]
pub enum SiteSignal {
    PlantStarted {
        participant: ParticipantId,
    },
    PlantCancelled {
        participant: ParticipantId,
        reason: CancelReason,
    },
    BombPlanted(ObjectiveEventData),
}

/// Emitted by a PlantedBomb
#[derive(Clone, Debug, PartialEq)]
pub enum BombSignal {
    DefuseStarted {
        participant: ParticipantId,
    },
    DefuseCancelled {
        participant: ParticipantId,
        reason: CancelReason,
    },
    Defused(ObjectiveEventData),
    Exploded(ObjectiveEventData),
    ExplosionEffect {
        scene: String,
        position: Vec3,
    },
}
