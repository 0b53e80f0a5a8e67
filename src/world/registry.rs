use crate::entities::actor::{Actor, ActorKind, WorldActor};
use crate::entities::update_flags::UpdateFlags;
use crate::entities::walking_queue::QueueStep;
use crate::world::cron::{WanderHandle, WanderTimers};
use crate::world::position::Position;
use crate::world::time::{GameClock, GameTick};
use crate::world::wander::{wander, WanderRng, WANDER_INTERVAL};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_WORLD_CAPACITY: u16 = 2048;

/// World shared between the tick driver and anything that mutates actors.
/// Holding the lock for a whole tick keeps step and flag reads atomic.
pub type SharedWorld = Arc<Mutex<World>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("world is full ({0} actors)")]
    Full(u16),
    #[error("actor is already registered at index {0}")]
    AlreadyRegistered(u16),
    #[error("no actor at world index {0}")]
    UnknownIndex(u16),
}

#[derive(Debug, Clone)]
pub struct WorldSettings {
    pub capacity: u16,
    pub tick_length: Duration,
    pub wander_interval: Duration,
    /// Fixed seed for wander rolls; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_WORLD_CAPACITY,
            tick_length: Duration::from_millis(600),
            wander_interval: WANDER_INTERVAL,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub world_index: u16,
    pub wander: Option<WanderHandle>,
}

/// Everything the synchronization stage needs about one actor for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobUpdate {
    pub world_index: u16,
    pub kind: ActorKind,
    pub position: Position,
    pub step: Option<QueueStep>,
    pub flags: UpdateFlags,
}

#[derive(Debug)]
struct Slot {
    actor: WorldActor,
    wander: Option<WanderHandle>,
}

#[derive(Debug)]
pub struct World {
    actors: BTreeMap<u16, Slot>,
    capacity: u16,
    clock: GameClock,
    wander_interval: Duration,
    timers: WanderTimers,
    rng: WanderRng,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl World {
    pub fn new(settings: WorldSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => WanderRng::from_seed(seed),
            None => WanderRng::from_entropy(),
        };
        Self {
            actors: BTreeMap::new(),
            capacity: settings.capacity,
            clock: GameClock::new(settings.tick_length),
            wander_interval: settings.wander_interval,
            timers: WanderTimers::new(),
            rng,
        }
    }

    pub fn into_shared(self) -> SharedWorld {
        Arc::new(Mutex::new(self))
    }

    pub fn now(&self) -> GameTick {
        self.clock.now()
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, world_index: u16) -> Option<&WorldActor> {
        self.actors.get(&world_index).map(|slot| &slot.actor)
    }

    pub fn get_mut(&mut self, world_index: u16) -> Option<&mut WorldActor> {
        self.actors.get_mut(&world_index).map(|slot| &mut slot.actor)
    }

    pub fn actors(&self) -> impl Iterator<Item = (u16, &WorldActor)> {
        self.actors.iter().map(|(index, slot)| (*index, &slot.actor))
    }

    pub fn wander_handle(&self, world_index: u16) -> Option<WanderHandle> {
        self.actors.get(&world_index).and_then(|slot| slot.wander)
    }

    pub fn active_wander_timers(&self) -> usize {
        self.timers.len()
    }

    /// Gives the actor the lowest free world index and, for autonomous
    /// actors, starts its wander timer.
    pub fn register(&mut self, actor: impl Into<WorldActor>) -> Result<Registration, WorldError> {
        let mut actor = actor.into();
        if let Some(index) = actor.mob().world_index() {
            return Err(WorldError::AlreadyRegistered(index));
        }
        let world_index = (1..=self.capacity)
            .find(|index| !self.actors.contains_key(index))
            .ok_or(WorldError::Full(self.capacity))?;
        actor.mob_mut().set_world_index(world_index);

        let wander = if actor.is_autonomous() {
            Some(
                self.timers
                    .schedule(world_index, self.wander_interval, self.clock.elapsed()),
            )
        } else {
            None
        };
        info!(
            target: "mobstate::world",
            world_index,
            kind = ?actor.kind(),
            wander = wander.is_some(),
            "actor registered"
        );
        self.actors.insert(world_index, Slot { actor, wander });
        Ok(Registration {
            world_index,
            wander,
        })
    }

    /// Removes the actor, stops its wander timer and clears its index.
    pub fn unregister(&mut self, world_index: u16) -> Result<WorldActor, WorldError> {
        let mut slot = self
            .actors
            .remove(&world_index)
            .ok_or(WorldError::UnknownIndex(world_index))?;
        if let Some(handle) = slot.wander {
            self.timers.cancel(handle);
        }
        slot.actor.mob_mut().clear_world_index();
        info!(target: "mobstate::world", world_index, "actor removed");
        Ok(slot.actor)
    }

    /// Advances the world by one tick.
    ///
    /// Due wander timers run first, then every actor in index order has its
    /// walking queue stepped and its update flags drained. Actors with no
    /// step and no flags are left out of the result.
    pub fn tick(&mut self) -> Vec<MobUpdate> {
        self.clock.advance(1);
        let elapsed = self.clock.elapsed();
        self.run_wander_timers(elapsed);

        let mut updates = Vec::new();
        for (world_index, slot) in self.actors.iter_mut() {
            let kind = slot.actor.kind();
            let mob = slot.actor.mob_mut();
            let step = mob.process_movement();
            let flags = mob.take_update_flags();
            if step.is_none() && !flags.is_update_required() {
                continue;
            }
            updates.push(MobUpdate {
                world_index: *world_index,
                kind,
                position: mob.position,
                step,
                flags,
            });
        }
        updates
    }

    fn run_wander_timers(&mut self, elapsed: Duration) {
        while let Some((handle, world_index)) = self.timers.pop_due(elapsed) {
            match self.actors.get_mut(&world_index) {
                Some(slot) if slot.wander == Some(handle) => {
                    if let Some(destination) = wander(&mut slot.actor, &mut self.rng) {
                        debug!(
                            target: "mobstate::world",
                            world_index,
                            x = destination.x,
                            y = destination.y,
                            "wander queued"
                        );
                    }
                }
                _ => {
                    self.timers.cancel(handle);
                }
            }
        }
    }
}
