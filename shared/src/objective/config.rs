use std::default::Default;

/// Contains timing properties used by BombSites and PlantedBombs
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectiveConfig {
    /// Seconds an attacker must hold interact on a site to plant
    pub plant_time: f32,
    /// Seconds a defender must hold interact on the bomb to defuse it
    pub defuse_time: f32,
    /// Seconds from plant until the bomb explodes
    pub fuse_time: f32,
    /// Visual effect scene spawned on explosion, if any
    pub explosion_effect: Option<String>,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            plant_time: 3.0,
            defuse_time: 5.0,
            fuse_time: 40.0,
            explosion_effect: None,
        }
    }
}
