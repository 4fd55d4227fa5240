//! BombSite plant state machine: occupancy, cancellation, authority-only
//! completion

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use rampart_shared::{
    ActiveBombSlot, BombSite, CancelReason, HostType, ObjectiveConfig, ObjectiveEventType,
    ParticipantId, PlantedBomb, Replicate, SitePhase, SiteSignal, SnapshotReader, Vec3,
};
use rampart_test::{tick_for, RecordingPolicy, ATTACKERS};

const ATTACKER: ParticipantId = ParticipantId(1);
const SECOND_ATTACKER: ParticipantId = ParticipantId(2);
const DEFENDER: ParticipantId = ParticipantId(10);
const DELTA: f32 = 0.125;

struct Fixture {
    policy: Rc<RecordingPolicy>,
    site: BombSite,
    slot: ActiveBombSlot,
    signals: Rc<RefCell<Vec<SiteSignal>>>,
}

impl Fixture {
    fn new(host_type: HostType) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let policy = RecordingPolicy::with_roster(&[1, 2], &[10, 11]);
        let mut site = BombSite::new(
            host_type,
            "A",
            Vec3::new(5.0, 0.0, 5.0),
            ObjectiveConfig::default(),
            policy.clone(),
        )
        .with_index(0);

        let signals = Rc::new(RefCell::new(Vec::new()));
        let recorder = signals.clone();
        site.signals_mut()
            .subscribe(move |signal: &SiteSignal| recorder.borrow_mut().push(signal.clone()));

        Self {
            policy,
            site,
            slot: ActiveBombSlot::new(),
            signals,
        }
    }

    fn tick(&mut self, delta: f32, holding: &HashSet<ParticipantId>) {
        self.site.tick(delta, holding, &mut self.slot);
    }

    fn tick_for(&mut self, seconds: f32, holding: &HashSet<ParticipantId>) {
        tick_for(seconds, DELTA, |delta| self.tick(delta, holding));
    }

    fn signals(&self) -> Vec<SiteSignal> {
        self.signals.borrow().clone()
    }
}

fn holding(participants: &[ParticipantId]) -> HashSet<ParticipantId> {
    participants.iter().copied().collect()
}

#[test]
fn attacker_exit_resets_progress_in_the_same_tick() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.tick_for(1.0, &holding(&[ATTACKER]));

    assert!(fixture.site.is_planting());
    assert_eq!(fixture.site.plant_progress(), 1.0);

    fixture.site.on_participant_exited(ATTACKER);

    assert_eq!(fixture.site.plant_progress(), 0.0);
    assert!(!fixture.site.is_planting());
    assert_eq!(fixture.site.occupant(), None);
    assert_eq!(
        fixture.signals().last(),
        Some(&SiteSignal::PlantCancelled {
            participant: ATTACKER,
            reason: CancelReason::LeftZone,
        })
    );
}

#[test]
fn plant_completes_exactly_once() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick_for(3.0, &holding(&[ATTACKER]));

    assert_eq!(fixture.site.phase(), SitePhase::Planted);
    assert!(fixture.slot.is_active());

    // keep holding well past completion
    fixture.tick_for(2.0, &holding(&[ATTACKER]));

    assert_eq!(fixture.policy.event_count(ObjectiveEventType::BombPlanted), 1);
    assert_eq!(fixture.policy.events().len(), 1);
    assert_eq!(
        fixture.policy.completed_plants(),
        vec![(ATTACKER, "A".to_string())]
    );
    let planted_signals = fixture
        .signals()
        .iter()
        .filter(|signal| matches!(signal, SiteSignal::BombPlanted(_)))
        .count();
    assert_eq!(planted_signals, 1);
}

#[test]
fn planted_event_describes_the_plant() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick_for(3.0, &holding(&[ATTACKER]));

    let events = fixture.policy.events();
    let event = &events[0];
    assert_eq!(event.event_type(), ObjectiveEventType::BombPlanted);
    assert_eq!(event.player_id(), ATTACKER);
    assert_eq!(event.team_id(), ATTACKERS);
    assert_eq!(event.objective_id(), 0);
    assert_eq!(event.position(), Vec3::new(5.0, 0.0, 5.0));

    let bomb = fixture.slot.get().unwrap();
    assert_eq!(bomb.planter(), ATTACKER);
    assert_eq!(bomb.site().name, "A");
    assert_eq!(bomb.position(), Vec3::new(5.0, 0.0, 5.0));
}

#[test]
fn bomb_spawns_at_the_configured_spawn_point() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.set_spawn_point(Some(Vec3::new(6.0, 1.0, 4.0)));
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick_for(3.0, &holding(&[ATTACKER]));

    assert_eq!(
        fixture.slot.get().map(|bomb| bomb.position()),
        Some(Vec3::new(6.0, 1.0, 4.0))
    );
    assert_eq!(fixture.policy.events()[0].position(), Vec3::new(6.0, 1.0, 4.0));
}

#[test]
fn releasing_interact_cancels_the_plant() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.tick_for(2.0, &holding(&[ATTACKER]));

    fixture.tick(DELTA, &holding(&[]));

    assert_eq!(fixture.site.phase(), SitePhase::Idle);
    assert_eq!(fixture.site.plant_progress(), 0.0);
    assert_eq!(
        fixture.signals().last(),
        Some(&SiteSignal::PlantCancelled {
            participant: ATTACKER,
            reason: CancelReason::InteractReleased,
        })
    );
}

#[test]
fn policy_flap_cancels_immediately() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.tick_for(2.0, &holding(&[ATTACKER]));

    fixture.policy.set_deny_plant(true);
    fixture.tick(DELTA, &holding(&[ATTACKER]));

    assert_eq!(fixture.site.phase(), SitePhase::Idle);
    assert_eq!(fixture.site.plant_progress(), 0.0);

    // approval coming back starts over from zero
    fixture.policy.set_deny_plant(false);
    fixture.tick(DELTA, &holding(&[ATTACKER]));

    assert_eq!(fixture.site.plant_progress(), DELTA);
    assert_eq!(fixture.policy.events().len(), 0);
}

#[test]
fn first_attacker_in_keeps_the_site() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.site.on_participant_entered(SECOND_ATTACKER);

    assert_eq!(fixture.site.occupant(), Some(ATTACKER));

    // the untracked attacker leaving changes nothing
    fixture.tick_for(1.0, &holding(&[ATTACKER]));
    fixture.site.on_participant_exited(SECOND_ATTACKER);

    assert!(fixture.site.is_planting());
    assert_eq!(fixture.site.plant_progress(), 1.0);
}

#[test]
fn untracked_attacker_holding_interact_does_not_plant() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.site.on_participant_entered(SECOND_ATTACKER);

    fixture.tick_for(1.0, &holding(&[SECOND_ATTACKER]));

    assert_eq!(fixture.site.phase(), SitePhase::Idle);
}

#[test]
fn defenders_are_not_tracked() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(DEFENDER);

    fixture.tick_for(3.0, &holding(&[DEFENDER]));

    assert_eq!(fixture.site.occupant(), None);
    assert_eq!(fixture.site.phase(), SitePhase::Idle);
}

#[test]
fn observer_prediction_never_completes() {
    let mut fixture = Fixture::new(HostType::Client);
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick_for(3.0, &holding(&[ATTACKER]));

    assert!(!fixture.site.has_bomb());
    assert!(!fixture.site.is_planting());
    assert_eq!(fixture.site.plant_progress(), 0.0);
    assert!(!fixture.slot.is_active());
    assert!(fixture.policy.events().is_empty());
    assert!(fixture.policy.completed_plants().is_empty());
}

#[test]
fn observer_continues_from_the_replicated_progress() {
    let mut server = Fixture::new(HostType::Server);
    server.site.on_participant_entered(ATTACKER);
    server.tick_for(1.5, &holding(&[ATTACKER]));
    let payload = server.site.to_snapshot();

    let mut client = Fixture::new(HostType::Client);
    client
        .site
        .read_snapshot(&mut SnapshotReader::new(&payload))
        .unwrap();
    assert!(client.site.is_planting());
    assert_eq!(client.site.plant_progress(), 1.5);

    client.site.on_participant_entered(ATTACKER);
    client.tick(DELTA, &holding(&[ATTACKER]));

    assert!(client.site.is_planting());
    assert_eq!(client.site.plant_progress(), 1.5 + DELTA);
    assert!(client.signals().is_empty());
}

#[test]
fn live_bomb_blocks_a_second_plant() {
    let mut fixture = Fixture::new(HostType::Server);
    let other_site = fixture.site.info().clone();
    fixture.slot.spawn(PlantedBomb::new(
        HostType::Server,
        ObjectiveConfig::default(),
        fixture.policy.clone(),
        SECOND_ATTACKER,
        other_site,
        Vec3::ZERO,
    ));
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick_for(3.0, &holding(&[ATTACKER]));

    assert!(!fixture.site.has_bomb());
    assert_eq!(fixture.slot.get().map(|bomb| bomb.planter()), Some(SECOND_ATTACKER));
    assert!(fixture.policy.events().is_empty());
    assert_eq!(
        fixture.signals().last(),
        Some(&SiteSignal::PlantCancelled {
            participant: ATTACKER,
            reason: CancelReason::BombAlreadyActive,
        })
    );
}

#[test]
fn huge_delta_completes_once() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);

    fixture.tick(100.0, &holding(&[ATTACKER]));
    fixture.tick(100.0, &holding(&[ATTACKER]));

    assert_eq!(fixture.site.plant_progress(), 3.0);
    assert_eq!(fixture.policy.event_count(ObjectiveEventType::BombPlanted), 1);
}

#[test]
fn reset_returns_the_site_to_idle() {
    let mut fixture = Fixture::new(HostType::Server);
    fixture.site.on_participant_entered(ATTACKER);
    fixture.tick_for(3.0, &holding(&[ATTACKER]));
    assert!(fixture.site.has_bomb());

    fixture.site.reset();

    assert_eq!(fixture.site.phase(), SitePhase::Idle);
    assert_eq!(fixture.site.plant_progress(), 0.0);
    assert_eq!(fixture.site.occupant(), None);
    assert_eq!(fixture.site.index(), 0);
}
