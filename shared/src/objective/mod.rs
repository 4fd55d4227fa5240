mod active_bomb;
mod bomb_site;
mod config;
mod event;
mod objective_world;
mod participant;
mod planted_bomb;
mod policy;
mod site_index;
mod timer;

pub use active_bomb::ActiveBombSlot;
pub use bomb_site::{BombSite, SitePhase, SiteState, SITE_SCHEMA};
pub use config::ObjectiveConfig;
pub use event::{BombSignal, CancelReason, ObjectiveEventData, ObjectiveEventType, SiteSignal};
pub use objective_world::{ObjectiveTick, ObjectiveWorld, SiteKey};
pub use participant::{InteractInput, ParticipantId, TeamId};
pub use planted_bomb::{BombPhase, BombState, PlantedBomb, BOMB_SCHEMA};
pub use policy::{ObjectivePolicy, SiteInfo};
pub use site_index::assign_site_indices;
pub(crate) use timer::sanitize_delta;
