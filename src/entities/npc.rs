use crate::entities::actor::{Actor, ActorKind};
use crate::entities::mob::Mob;
use crate::world::position::Position;
use crate::world::wander::WanderBounds;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub key: String,
    pub spawn: Position,
    /// Square radius around `spawn`. `None` lets the npc roam freely.
    pub movement_radius: Option<u16>,
    mob: Mob,
}

impl Npc {
    pub fn new(key: impl Into<String>, spawn: Position, movement_radius: Option<u16>) -> Self {
        Self {
            key: key.into(),
            spawn,
            movement_radius,
            mob: Mob::new(spawn),
        }
    }
}

impl Actor for Npc {
    fn mob(&self) -> &Mob {
        &self.mob
    }

    fn mob_mut(&mut self) -> &mut Mob {
        &mut self.mob
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Npc
    }

    fn is_autonomous(&self) -> bool {
        true
    }

    fn wander_bounds(&self) -> Option<WanderBounds> {
        self.movement_radius.map(|radius| WanderBounds {
            anchor: self.spawn,
            radius,
        })
    }
}
