use log::{info, warn};

use super::{
    participant::InteractInput,
    planted_bomb::{BombPhase, PlantedBomb},
};

/// Holds the single live bomb of a round. At most one bomb exists at any
/// tick; a finished bomb is removed by the tick that finished it.
#[derive(Default)]
pub struct ActiveBombSlot {
    bomb: Option<PlantedBomb>,
}

impl ActiveBombSlot {
    pub fn new() -> Self {
        Self { bomb: None }
    }

    /// Installs `bomb` as the live bomb, returning any bomb it replaced
    pub fn spawn(&mut self, bomb: PlantedBomb) -> Option<PlantedBomb> {
        let previous = self.bomb.replace(bomb);
        if previous.is_some() {
            warn!("ActiveBombSlot: a live bomb was replaced by a new plant");
        }
        previous
    }

    /// Removes the live bomb without resolving it, e.g. on round reset
    pub fn destroy(&mut self) -> Option<PlantedBomb> {
        let bomb = self.bomb.take();
        if bomb.is_some() {
            info!("ActiveBombSlot: live bomb destroyed");
        }
        bomb
    }

    pub fn get(&self) -> Option<&PlantedBomb> {
        self.bomb.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut PlantedBomb> {
        self.bomb.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.bomb.is_some()
    }

    /// Ticks the live bomb. Returns the terminal phase if the bomb finished
    /// this tick, in which case it has already been removed.
    pub fn tick(&mut self, delta: f32, input: &dyn InteractInput) -> Option<BombPhase> {
        let phase = self.bomb.as_mut()?.tick(delta, input);
        if !phase.is_terminal() {
            return None;
        }
        self.bomb = None;
        Some(phase)
    }
}
