use rampart_serde::Vec3;

use super::{event::ObjectiveEventData, participant::{ParticipantId, TeamId}};

/// Identity of a bomb site, handed to the policy and carried by the bomb
/// planted there
#[derive(Clone, Debug, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    /// -1 until assigned
    pub index: i32,
    pub position: Vec3,
}

/// The game mode's rules, as seen by the objectives. Sites and bombs only
/// check presence and input themselves; every rule decision lives here.
pub trait ObjectivePolicy {
    fn can_plant(&self, participant: ParticipantId, site: &SiteInfo) -> bool;

    fn is_attacker(&self, participant: ParticipantId) -> bool;

    fn is_defender(&self, participant: ParticipantId) -> bool;

    fn on_plant_completed(&self, participant: ParticipantId, site: &SiteInfo);

    /// Receives each completed objective transition exactly once
    fn notify_objective_event(&self, event: ObjectiveEventData);

    /// `TeamId::UNKNOWN` if the participant has no team
    fn team_for_participant(&self, participant: ParticipantId) -> TeamId;
}
