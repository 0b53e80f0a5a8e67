use crate::entities::actor::{Actor, ActorKind};
use crate::entities::mob::Mob;
use crate::world::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub username: String,
    mob: Mob,
}

impl Player {
    pub fn new(username: impl Into<String>, position: Position) -> Self {
        Self {
            username: username.into(),
            mob: Mob::new(position),
        }
    }
}

impl Actor for Player {
    fn mob(&self) -> &Mob {
        &self.mob
    }

    fn mob_mut(&mut self) -> &mut Mob {
        &mut self.mob
    }

    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }
}
