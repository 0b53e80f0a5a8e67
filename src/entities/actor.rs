use crate::entities::mob::Mob;
use crate::entities::npc::Npc;
use crate::entities::player::Player;
use crate::world::wander::WanderBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Npc,
}

/// Behaviour every concrete actor type provides on top of its [`Mob`].
pub trait Actor {
    fn mob(&self) -> &Mob;

    fn mob_mut(&mut self) -> &mut Mob;

    fn kind(&self) -> ActorKind;

    /// Two actors are the same when they share kind and an assigned world
    /// index. Unregistered actors are never the same as anything.
    fn same_actor(&self, other: &dyn Actor) -> bool {
        self.kind() == other.kind()
            && self.mob().world_index().is_some()
            && self.mob().world_index() == other.mob().world_index()
    }

    /// Whether the world should run a wander timer for this actor.
    fn is_autonomous(&self) -> bool {
        false
    }

    fn wander_bounds(&self) -> Option<WanderBounds> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldActor {
    Player(Player),
    Npc(Npc),
}

impl WorldActor {
    pub fn as_player(&self) -> Option<&Player> {
        match self {
            WorldActor::Player(player) => Some(player),
            WorldActor::Npc(_) => None,
        }
    }

    pub fn as_npc(&self) -> Option<&Npc> {
        match self {
            WorldActor::Npc(npc) => Some(npc),
            WorldActor::Player(_) => None,
        }
    }
}

impl Actor for WorldActor {
    fn mob(&self) -> &Mob {
        match self {
            WorldActor::Player(player) => player.mob(),
            WorldActor::Npc(npc) => npc.mob(),
        }
    }

    fn mob_mut(&mut self) -> &mut Mob {
        match self {
            WorldActor::Player(player) => player.mob_mut(),
            WorldActor::Npc(npc) => npc.mob_mut(),
        }
    }

    fn kind(&self) -> ActorKind {
        match self {
            WorldActor::Player(player) => player.kind(),
            WorldActor::Npc(npc) => npc.kind(),
        }
    }

    fn is_autonomous(&self) -> bool {
        match self {
            WorldActor::Player(player) => player.is_autonomous(),
            WorldActor::Npc(npc) => npc.is_autonomous(),
        }
    }

    fn wander_bounds(&self) -> Option<WanderBounds> {
        match self {
            WorldActor::Player(player) => player.wander_bounds(),
            WorldActor::Npc(npc) => npc.wander_bounds(),
        }
    }
}

impl From<Player> for WorldActor {
    fn from(player: Player) -> Self {
        WorldActor::Player(player)
    }
}

impl From<Npc> for WorldActor {
    fn from(npc: Npc) -> Self {
        WorldActor::Npc(npc)
    }
}
