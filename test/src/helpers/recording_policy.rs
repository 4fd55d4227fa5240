use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use rampart_shared::{
    ObjectiveEventData, ObjectiveEventType, ObjectivePolicy, ParticipantId, SiteInfo, TeamId,
};

pub const ATTACKERS: TeamId = TeamId(0);
pub const DEFENDERS: TeamId = TeamId(1);

/// Policy double with fixed team rosters. Records every plant completion
/// and objective event it is handed.
#[derive(Default)]
pub struct RecordingPolicy {
    teams: RefCell<HashMap<ParticipantId, TeamId>>,
    deny_plant: Cell<bool>,
    completed_plants: RefCell<Vec<(ParticipantId, String)>>,
    events: RefCell<Vec<ObjectiveEventData>>,
}

impl RecordingPolicy {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_roster(attackers: &[u64], defenders: &[u64]) -> Rc<Self> {
        let policy = Self::default();
        for id in attackers {
            policy.set_team(ParticipantId(*id), ATTACKERS);
        }
        for id in defenders {
            policy.set_team(ParticipantId(*id), DEFENDERS);
        }
        Rc::new(policy)
    }

    pub fn set_team(&self, participant: ParticipantId, team: TeamId) {
        self.teams.borrow_mut().insert(participant, team);
    }

    pub fn set_deny_plant(&self, deny: bool) {
        self.deny_plant.set(deny);
    }

    pub fn events(&self) -> Vec<ObjectiveEventData> {
        self.events.borrow().clone()
    }

    pub fn event_count(&self, event_type: ObjectiveEventType) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.event_type() == event_type)
            .count()
    }

    pub fn completed_plants(&self) -> Vec<(ParticipantId, String)> {
        self.completed_plants.borrow().clone()
    }
}

impl ObjectivePolicy for RecordingPolicy {
    fn can_plant(&self, _participant: ParticipantId, _site: &SiteInfo) -> bool {
        !self.deny_plant.get()
    }

    fn is_attacker(&self, participant: ParticipantId) -> bool {
        self.team_for_participant(participant) == ATTACKERS
    }

    fn is_defender(&self, participant: ParticipantId) -> bool {
        self.team_for_participant(participant) == DEFENDERS
    }

    fn on_plant_completed(&self, participant: ParticipantId, site: &SiteInfo) {
        self.completed_plants
            .borrow_mut()
            .push((participant, site.name.clone()));
    }

    fn notify_objective_event(&self, event: ObjectiveEventData) {
        self.events.borrow_mut().push(event);
    }

    fn team_for_participant(&self, participant: ParticipantId) -> TeamId {
        self.teams
            .borrow()
            .get(&participant)
            .copied()
            .unwrap_or(TeamId::UNKNOWN)
    }
}
