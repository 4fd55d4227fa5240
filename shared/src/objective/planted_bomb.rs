use std::{collections::BTreeSet, rc::Rc};

use log::{debug, info};

use rampart_serde::{Quat, Transform, Vec3};

use super::{
    config::ObjectiveConfig,
    event::{BombSignal, CancelReason, ObjectiveEventData, ObjectiveEventType},
    participant::{InteractInput, ParticipantId},
    policy::{ObjectivePolicy, SiteInfo},
    timer::{has_elapsed, has_run_out, sanitize_delta},
};
use crate::{
    signal::Signal,
    types::HostType,
    world::{
        component::{
            property::{ReplicatedProperty, TransformThreshold},
            property_set::PropertySet,
            schema::{FieldSpec, SnapshotSchema},
        },
        replicate::Replica,
    },
};

const BOMB_FIELDS: [FieldSpec; 5] = [
    FieldSpec::int("state"),
    FieldSpec::int("is_being_defused"),
    FieldSpec::float("fuse_remaining"),
    FieldSpec::float("defuse_progress"),
    FieldSpec::transform("transform"),
];
pub static BOMB_SCHEMA: SnapshotSchema = SnapshotSchema::new("PlantedBomb", 1, &BOMB_FIELDS);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BombPhase {
    Armed = 0,
    Exploded = 1,
    Defused = 2,
}

impl BombPhase {
    /// Unknown wire values read as Armed
    pub fn from_wire(value: i32) -> Self {
        match value {
            1 => BombPhase::Exploded,
            2 => BombPhase::Defused,
            _ => BombPhase::Armed,
        }
    }

    pub fn to_wire(self) -> i32 {
        self as i32
    }

    pub fn is_terminal(self) -> bool {
        self != BombPhase::Armed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BombState {
    pub state: i32,
    pub is_being_defused: i32,
    pub fuse_remaining: f32,
    pub defuse_progress: f32,
    pub transform: Transform,
}

/// The live bomb. Armed until the fuse runs out or a defender finishes
/// defusing it; both outcomes are terminal and decided by the authority.
pub struct PlantedBomb {
    host_type: HostType,
    config: ObjectiveConfig,
    policy: Rc<dyn ObjectivePolicy>,
    planter: ParticipantId,
    site: SiteInfo,
    state: BombState,
    properties: PropertySet<BombState>,
    in_range: BTreeSet<ParticipantId>,
    defuser: Option<ParticipantId>,
    signals: Signal<BombSignal>,
}

impl PlantedBomb {
    pub fn new(
        host_type: HostType,
        config: ObjectiveConfig,
        policy: Rc<dyn ObjectivePolicy>,
        planter: ParticipantId,
        site: SiteInfo,
        position: Vec3,
    ) -> Self {
        let properties = PropertySet::builder(&BOMB_SCHEMA)
            .field(ReplicatedProperty::always(
                "state",
                |state: &BombState| state.state,
                |state: &mut BombState, value| state.state = value,
            ))
            .field(ReplicatedProperty::always(
                "is_being_defused",
                |state: &BombState| state.is_being_defused,
                |state: &mut BombState, value| state.is_being_defused = value,
            ))
            .field(ReplicatedProperty::on_change(
                "fuse_remaining",
                |state: &BombState| state.fuse_remaining,
                |state: &mut BombState, value| state.fuse_remaining = value,
                0.1,
            ))
            .field(ReplicatedProperty::on_change(
                "defuse_progress",
                |state: &BombState| state.defuse_progress,
                |state: &mut BombState, value| state.defuse_progress = value,
                0.05,
            ))
            .field(ReplicatedProperty::on_change(
                "transform",
                |state: &BombState| state.transform,
                |state: &mut BombState, value| state.transform = value,
                TransformThreshold::new(0.01, 0.01),
            ))
            .build();

        let fuse_remaining = sanitize_delta(config.fuse_time);

        Self {
            host_type,
            config,
            policy,
            planter,
            site,
            state: BombState {
                state: BombPhase::Armed.to_wire(),
                is_being_defused: 0,
                fuse_remaining,
                defuse_progress: 0.0,
                transform: Transform::new(position, Quat::IDENTITY),
            },
            properties,
            in_range: BTreeSet::new(),
            defuser: None,
            signals: Signal::new(),
        }
    }

    // Accessors

    pub fn phase(&self) -> BombPhase {
        BombPhase::from_wire(self.state.state)
    }

    pub fn is_exploded(&self) -> bool {
        self.phase() == BombPhase::Exploded
    }

    pub fn is_defused(&self) -> bool {
        self.phase() == BombPhase::Defused
    }

    pub fn is_being_defused(&self) -> bool {
        self.state.is_being_defused != 0
    }

    pub fn fuse_remaining(&self) -> f32 {
        self.state.fuse_remaining
    }

    pub fn defuse_progress(&self) -> f32 {
        self.state.defuse_progress
    }

    pub fn defuse_time(&self) -> f32 {
        self.config.defuse_time
    }

    pub fn planter(&self) -> ParticipantId {
        self.planter
    }

    pub fn defuser(&self) -> Option<ParticipantId> {
        self.defuser
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    pub fn position(&self) -> Vec3 {
        self.state.transform.position
    }

    pub fn state(&self) -> &BombState {
        &self.state
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn participants_in_range(&self) -> impl Iterator<Item = &ParticipantId> {
        self.in_range.iter()
    }

    pub fn signals_mut(&mut self) -> &mut Signal<BombSignal> {
        &mut self.signals
    }

    // Range tracking

    pub fn on_participant_entered(&mut self, participant: ParticipantId) {
        if self.in_range.insert(participant) {
            debug!("PlantedBomb: {} in defuse range", participant);
        }
    }

    pub fn on_participant_exited(&mut self, participant: ParticipantId) {
        if !self.in_range.remove(&participant) {
            return;
        }
        debug!("PlantedBomb: {} left defuse range", participant);
        if self.defuser == Some(participant) {
            self.cancel_defuse(CancelReason::LeftZone);
        }
    }

    // Simulation

    /// Advances the fuse, then the defuse. Returns the phase after the tick.
    pub fn tick(&mut self, delta: f32, input: &dyn InteractInput) -> BombPhase {
        if self.phase().is_terminal() {
            return self.phase();
        }
        let delta = sanitize_delta(delta);

        self.state.fuse_remaining = (self.state.fuse_remaining - delta).max(0.0);
        if has_run_out(self.state.fuse_remaining) && self.host_type.is_authority() {
            self.explode();
            return self.phase();
        }

        self.tick_defuse(delta, input);
        self.phase()
    }

    fn tick_defuse(&mut self, delta: f32, input: &dyn InteractInput) {
        let Some(candidate) = self.find_defuser(input) else {
            if self.defuser.is_some() {
                let reason = match self.defuser {
                    Some(defuser) if !input.is_holding_interact(defuser) => {
                        CancelReason::InteractReleased
                    }
                    _ => CancelReason::PolicyDenied,
                };
                self.cancel_defuse(reason);
            }
            return;
        };

        match self.defuser {
            Some(defuser) if defuser == candidate => {}
            Some(_) => {
                self.cancel_defuse(CancelReason::Replaced);
                self.start_defuse(candidate);
            }
            // defuse started by an authoritative snapshot, keep its progress
            None if self.is_being_defused() => self.defuser = Some(candidate),
            None => self.start_defuse(candidate),
        }

        self.state.defuse_progress =
            (self.state.defuse_progress + delta).min(self.config.defuse_time);

        if has_elapsed(self.state.defuse_progress, self.config.defuse_time) {
            self.complete_defuse(candidate);
        }
    }

    /// The current defuser keeps the defuse while still valid, otherwise the
    /// lowest in-range defender holding interact takes over
    fn find_defuser(&self, input: &dyn InteractInput) -> Option<ParticipantId> {
        let is_valid = |participant: ParticipantId| {
            input.is_holding_interact(participant) && self.policy.is_defender(participant)
        };

        if let Some(defuser) = self.defuser {
            if self.in_range.contains(&defuser) && is_valid(defuser) {
                return Some(defuser);
            }
        }
        self.in_range
            .iter()
            .copied()
            .find(|participant| is_valid(*participant))
    }

    fn start_defuse(&mut self, participant: ParticipantId) {
        debug!("PlantedBomb: {} started defusing", participant);
        self.defuser = Some(participant);
        self.state.is_being_defused = 1;
        self.state.defuse_progress = 0.0;
        self.signals.emit(&BombSignal::DefuseStarted { participant });
    }

    fn cancel_defuse(&mut self, reason: CancelReason) {
        let participant = self.defuser.take();
        self.state.is_being_defused = 0;
        self.state.defuse_progress = 0.0;
        if let Some(participant) = participant {
            debug!(
                "PlantedBomb: defuse by {} cancelled ({:?})",
                participant, reason
            );
            self.signals
                .emit(&BombSignal::DefuseCancelled { participant, reason });
        }
    }

    fn complete_defuse(&mut self, defuser: ParticipantId) {
        if !self.host_type.is_authority() {
            self.state.is_being_defused = 0;
            self.state.defuse_progress = 0.0;
            self.defuser = None;
            return;
        }

        self.state.state = BombPhase::Defused.to_wire();
        self.state.is_being_defused = 0;
        self.defuser = None;

        info!("PlantedBomb at site {}: defused by {}", self.site.name, defuser);

        let event = self.event(ObjectiveEventType::BombDefused, defuser);
        self.signals.emit(&BombSignal::Defused(event.clone()));
        self.policy.notify_objective_event(event);
    }

    fn explode(&mut self) {
        self.state.state = BombPhase::Exploded.to_wire();
        self.state.fuse_remaining = 0.0;
        self.state.is_being_defused = 0;
        self.state.defuse_progress = 0.0;
        self.defuser = None;

        info!(
            "PlantedBomb at site {}: exploded (planted by {})",
            self.site.name, self.planter
        );

        let event = self.event(ObjectiveEventType::BombExploded, self.planter);
        self.signals.emit(&BombSignal::Exploded(event.clone()));
        self.policy.notify_objective_event(event);

        if let Some(scene) = &self.config.explosion_effect {
            self.signals.emit(&BombSignal::ExplosionEffect {
                scene: scene.clone(),
                position: self.position(),
            });
        }
    }

    fn event(&self, event_type: ObjectiveEventType, participant: ParticipantId) -> ObjectiveEventData {
        ObjectiveEventData::new(
            event_type,
            participant,
            self.policy.team_for_participant(participant),
            self.site.index,
            self.position(),
        )
    }
}

impl Replica for PlantedBomb {
    type State = BombState;

    fn replica(&self) -> (&BombState, &PropertySet<BombState>) {
        (&self.state, &self.properties)
    }

    fn replica_mut(&mut self) -> (&mut BombState, &mut PropertySet<BombState>) {
        (&mut self.state, &mut self.properties)
    }
}
