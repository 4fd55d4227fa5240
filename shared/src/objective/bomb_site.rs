use std::rc::Rc;

use log::{debug, info, warn};

use rampart_serde::Vec3;

use super::{
    active_bomb::ActiveBombSlot,
    config::ObjectiveConfig,
    event::{CancelReason, ObjectiveEventData, ObjectiveEventType, SiteSignal},
    participant::{InteractInput, ParticipantId},
    planted_bomb::PlantedBomb,
    policy::{ObjectivePolicy, SiteInfo},
    timer::{has_elapsed, sanitize_delta},
};
use crate::{
    signal::Signal,
    types::HostType,
    world::{
        component::{
            property::ReplicatedProperty,
            property_set::PropertySet,
            schema::{FieldSpec, SnapshotSchema},
        },
        replicate::Replica,
    },
};

const SITE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::int("is_planting"),
    FieldSpec::int("has_bomb"),
    FieldSpec::float("plant_progress"),
];
pub static SITE_SCHEMA: SnapshotSchema = SnapshotSchema::new("BombSite", 1, &SITE_FIELDS);

/// The replicated part of a BombSite
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteState {
    pub is_planting: i32,
    pub has_bomb: i32,
    pub plant_progress: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SitePhase {
    Idle,
    Planting,
    /// Terminal until the round is reset
    Planted,
}

/// A plantable location.
///
/// Idle -> Planting while exactly one tracked attacker holds interact and
/// the policy approves; Planting -> Idle the moment either stops being
/// true; Planting -> Planted once PlantTime has accumulated, on the
/// authority only. Observers run the same machine to predict progress for
/// display, and their state is overwritten by every authoritative snapshot.
pub struct BombSite {
    host_type: HostType,
    info: SiteInfo,
    spawn_point: Option<Vec3>,
    config: ObjectiveConfig,
    policy: Rc<dyn ObjectivePolicy>,
    state: SiteState,
    properties: PropertySet<SiteState>,
    occupant: Option<ParticipantId>,
    planter: Option<ParticipantId>,
    signals: Signal<SiteSignal>,
}

impl BombSite {
    pub fn new(
        host_type: HostType,
        name: &str,
        position: Vec3,
        config: ObjectiveConfig,
        policy: Rc<dyn ObjectivePolicy>,
    ) -> Self {
        let properties = PropertySet::builder(&SITE_SCHEMA)
            .field(ReplicatedProperty::always(
                "is_planting",
                |state: &SiteState| state.is_planting,
                |state: &mut SiteState, value| state.is_planting = value,
            ))
            .field(ReplicatedProperty::always(
                "has_bomb",
                |state: &SiteState| state.has_bomb,
                |state: &mut SiteState, value| state.has_bomb = value,
            ))
            .field(ReplicatedProperty::on_change(
                "plant_progress",
                |state: &SiteState| state.plant_progress,
                |state: &mut SiteState, value| state.plant_progress = value,
                0.05,
            ))
            .build();

        Self {
            host_type,
            info: SiteInfo {
                name: name.to_string(),
                index: -1,
                position,
            },
            spawn_point: None,
            config,
            policy,
            state: SiteState::default(),
            properties,
            occupant: None,
            planter: None,
            signals: Signal::new(),
        }
    }

    pub fn with_spawn_point(mut self, spawn_point: Vec3) -> Self {
        self.spawn_point = Some(spawn_point);
        self
    }

    /// Level data may carry a fixed index; it is kept by index assignment
    pub fn with_index(mut self, index: i32) -> Self {
        self.info.index = index;
        self
    }

    pub fn set_spawn_point(&mut self, spawn_point: Option<Vec3>) {
        self.spawn_point = spawn_point;
    }

    // Accessors

    pub fn info(&self) -> &SiteInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn index(&self) -> i32 {
        self.info.index
    }

    pub fn position(&self) -> Vec3 {
        self.info.position
    }

    /// Where a bomb planted here appears
    pub fn bomb_spawn_position(&self) -> Vec3 {
        self.spawn_point.unwrap_or(self.info.position)
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn plant_progress(&self) -> f32 {
        self.state.plant_progress
    }

    pub fn plant_time(&self) -> f32 {
        self.config.plant_time
    }

    pub fn is_planting(&self) -> bool {
        self.state.is_planting != 0
    }

    pub fn has_bomb(&self) -> bool {
        self.state.has_bomb != 0
    }

    pub fn phase(&self) -> SitePhase {
        if self.has_bomb() {
            SitePhase::Planted
        } else if self.is_planting() {
            SitePhase::Planting
        } else {
            SitePhase::Idle
        }
    }

    pub fn occupant(&self) -> Option<ParticipantId> {
        self.occupant
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn signals_mut(&mut self) -> &mut Signal<SiteSignal> {
        &mut self.signals
    }

    /// Returns false if an index was already assigned; it never changes
    /// once set
    pub(crate) fn assign_index(&mut self, index: i32) -> bool {
        if self.info.index >= 0 {
            return false;
        }
        self.info.index = index;
        true
    }

    // Occupancy

    /// Only attackers are tracked, and only the first one in
    pub fn on_participant_entered(&mut self, participant: ParticipantId) {
        if self.occupant.is_some() {
            return;
        }
        if !self.policy.is_attacker(participant) {
            return;
        }
        debug!("BombSite {}: tracking {}", self.info.name, participant);
        self.occupant = Some(participant);
    }

    pub fn on_participant_exited(&mut self, participant: ParticipantId) {
        if self.occupant != Some(participant) {
            return;
        }
        debug!("BombSite {}: {} left the zone", self.info.name, participant);
        self.occupant = None;
        if self.is_planting() {
            self.cancel(CancelReason::LeftZone);
        }
    }

    // Simulation

    pub fn tick(&mut self, delta: f32, input: &dyn InteractInput, bomb_slot: &mut ActiveBombSlot) {
        if self.has_bomb() {
            return;
        }

        let Some(occupant) = self.occupant else {
            if self.is_planting() {
                self.cancel(CancelReason::LeftZone);
            }
            return;
        };

        if !input.is_holding_interact(occupant) {
            if self.is_planting() {
                self.cancel(CancelReason::InteractReleased);
            }
            return;
        }
        if !self.policy.is_attacker(occupant) || !self.policy.can_plant(occupant, &self.info) {
            if self.is_planting() {
                self.cancel(CancelReason::PolicyDenied);
            }
            return;
        }

        if !self.is_planting() {
            self.start(occupant);
        } else if self.planter.is_none() {
            // plant started by an authoritative snapshot, keep its progress
            self.planter = Some(occupant);
        } else if self.planter != Some(occupant) {
            self.start(occupant);
        }

        self.state.plant_progress =
            (self.state.plant_progress + sanitize_delta(delta)).min(self.config.plant_time);

        if has_elapsed(self.state.plant_progress, self.config.plant_time) {
            self.complete(occupant, bomb_slot);
        }
    }

    /// Back to Idle with no bomb. Called between rounds.
    pub fn reset(&mut self) {
        self.state = SiteState::default();
        self.occupant = None;
        self.planter = None;
    }

    fn start(&mut self, participant: ParticipantId) {
        debug!("BombSite {}: {} started planting", self.info.name, participant);
        self.state.is_planting = 1;
        self.state.plant_progress = 0.0;
        self.planter = Some(participant);
        self.signals.emit(&SiteSignal::PlantStarted { participant });
    }

    fn cancel(&mut self, reason: CancelReason) {
        let participant = self.planter.take();
        self.state.is_planting = 0;
        self.state.plant_progress = 0.0;
        if let Some(participant) = participant {
            debug!(
                "BombSite {}: plant by {} cancelled ({:?})",
                self.info.name, participant, reason
            );
            self.signals
                .emit(&SiteSignal::PlantCancelled { participant, reason });
        }
    }

    fn complete(&mut self, planter: ParticipantId, bomb_slot: &mut ActiveBombSlot) {
        if !self.host_type.is_authority() {
            // prediction got there first, wait for the authoritative snapshot
            self.state.is_planting = 0;
            self.state.plant_progress = 0.0;
            self.planter = None;
            return;
        }

        if bomb_slot.is_active() {
            warn!(
                "BombSite {}: {} finished planting while another bomb is live",
                self.info.name, planter
            );
            self.cancel(CancelReason::BombAlreadyActive);
            return;
        }

        let position = self.bomb_spawn_position();
        let bomb = PlantedBomb::new(
            self.host_type,
            self.config.clone(),
            self.policy.clone(),
            planter,
            self.info.clone(),
            position,
        );
        bomb_slot.spawn(bomb);

        self.state.is_planting = 0;
        self.state.has_bomb = 1;
        self.state.plant_progress = self.config.plant_time;
        self.planter = None;

        info!("BombSite {}: bomb planted by {}", self.info.name, planter);

        self.policy.on_plant_completed(planter, &self.info);
        let event = ObjectiveEventData::new(
            ObjectiveEventType::BombPlanted,
            planter,
            self.policy.team_for_participant(planter),
            self.info.index,
            position,
        );
        self.signals.emit(&SiteSignal::BombPlanted(event.clone()));
        self.policy.notify_objective_event(event);
    }
}

impl Replica for BombSite {
    type State = SiteState;

    fn replica(&self) -> (&SiteState, &PropertySet<SiteState>) {
        (&self.state, &self.properties)
    }

    fn replica_mut(&mut self) -> (&mut SiteState, &mut PropertySet<SiteState>) {
        (&mut self.state, &mut self.properties)
    }
}
