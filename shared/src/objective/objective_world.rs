use std::rc::Rc;

use log::info;

use rampart_serde::Vec3;

use super::{
    active_bomb::ActiveBombSlot,
    bomb_site::BombSite,
    config::ObjectiveConfig,
    participant::{InteractInput, ParticipantId},
    planted_bomb::{BombPhase, PlantedBomb},
    policy::ObjectivePolicy,
    site_index,
};
use crate::types::HostType;

/// Handle to a site owned by an [`ObjectiveWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteKey(usize);

impl SiteKey {
    pub fn to_usize(&self) -> usize {
        self.0
    }
}

/// What changed during one [`ObjectiveWorld::tick`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectiveTick {
    /// The site whose plant completed this tick
    pub planted: Option<SiteKey>,
    /// The terminal phase of a bomb that finished this tick
    pub finished: Option<BombPhase>,
}

/// Every objective of one match: the sites created at level load and the
/// slot holding the live bomb. Ticked once per simulation step.
pub struct ObjectiveWorld {
    host_type: HostType,
    config: ObjectiveConfig,
    policy: Rc<dyn ObjectivePolicy>,
    sites: Vec<BombSite>,
    bomb_slot: ActiveBombSlot,
}

impl ObjectiveWorld {
    pub fn new(host_type: HostType, config: ObjectiveConfig, policy: Rc<dyn ObjectivePolicy>) -> Self {
        Self {
            host_type,
            config,
            policy,
            sites: Vec::new(),
            bomb_slot: ActiveBombSlot::new(),
        }
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    // Sites

    /// Creates a site sharing this world's config and policy
    pub fn add_site(&mut self, name: &str, position: Vec3) -> SiteKey {
        let site = BombSite::new(
            self.host_type,
            name,
            position,
            self.config.clone(),
            self.policy.clone(),
        );
        self.insert_site(site)
    }

    /// Adopts a site built elsewhere, e.g. one with a spawn point or a fixed
    /// index from level data
    pub fn insert_site(&mut self, site: BombSite) -> SiteKey {
        let key = SiteKey(self.sites.len());
        self.sites.push(site);
        key
    }

    pub fn site(&self, key: &SiteKey) -> Option<&BombSite> {
        self.sites.get(key.0)
    }

    pub fn site_mut(&mut self, key: &SiteKey) -> Option<&mut BombSite> {
        self.sites.get_mut(key.0)
    }

    pub fn site_by_name(&self, name: &str) -> Option<SiteKey> {
        self.sites
            .iter()
            .position(|site| site.name() == name)
            .map(SiteKey)
    }

    pub fn sites(&self) -> impl Iterator<Item = (SiteKey, &BombSite)> {
        self.sites
            .iter()
            .enumerate()
            .map(|(index, site)| (SiteKey(index), site))
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// See [`assign_site_indices`](super::assign_site_indices)
    pub fn assign_site_indices(&mut self) -> usize {
        site_index::assign_site_indices(&mut self.sites)
    }

    // Occupancy routing

    pub fn enter_site(&mut self, key: &SiteKey, participant: ParticipantId) {
        if let Some(site) = self.sites.get_mut(key.0) {
            site.on_participant_entered(participant);
        }
    }

    pub fn exit_site(&mut self, key: &SiteKey, participant: ParticipantId) {
        if let Some(site) = self.sites.get_mut(key.0) {
            site.on_participant_exited(participant);
        }
    }

    pub fn enter_bomb_range(&mut self, participant: ParticipantId) {
        if let Some(bomb) = self.bomb_slot.get_mut() {
            bomb.on_participant_entered(participant);
        }
    }

    pub fn exit_bomb_range(&mut self, participant: ParticipantId) {
        if let Some(bomb) = self.bomb_slot.get_mut() {
            bomb.on_participant_exited(participant);
        }
    }

    // Bomb

    pub fn active_bomb(&self) -> Option<&PlantedBomb> {
        self.bomb_slot.get()
    }

    pub fn active_bomb_mut(&mut self) -> Option<&mut PlantedBomb> {
        self.bomb_slot.get_mut()
    }

    pub fn bomb_slot_mut(&mut self) -> &mut ActiveBombSlot {
        &mut self.bomb_slot
    }

    pub fn destroy_active_bomb(&mut self) -> Option<PlantedBomb> {
        self.bomb_slot.destroy()
    }

    // Simulation

    /// Ticks the live bomb, then every site in insertion order. Sites run
    /// one at a time, so only the first site to complete in a tick gets to
    /// spawn a bomb.
    pub fn tick(&mut self, delta: f32, input: &dyn InteractInput) -> ObjectiveTick {
        let mut result = ObjectiveTick {
            finished: self.bomb_slot.tick(delta, input),
            ..Default::default()
        };

        for (index, site) in self.sites.iter_mut().enumerate() {
            let had_bomb = site.has_bomb();
            site.tick(delta, input, &mut self.bomb_slot);
            if !had_bomb && site.has_bomb() {
                result.planted = Some(SiteKey(index));
            }
        }

        result
    }

    /// Clears every site and removes the live bomb. Site indices are kept.
    pub fn reset_round(&mut self) {
        info!("ObjectiveWorld: resetting round");
        self.bomb_slot.destroy();
        for site in self.sites.iter_mut() {
            site.reset();
        }
    }
}
