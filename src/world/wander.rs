use crate::entities::actor::Actor;
use crate::world::position::{Position, PositionDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::debug;

/// Period between two wander rolls of the same actor.
pub const WANDER_INTERVAL: Duration = Duration::from_millis(1000);

/// A roll in `0..10` at or above this value starts a wander attempt.
const WANDER_TRIGGER: u32 = 7;
/// Same scale, per axis: at or above this value the axis gets an offset.
const AXIS_MOVE_TRIGGER: u32 = 7;
const MAX_AXIS_OFFSET: i16 = 4;
/// Candidate samples per wander attempt before giving up for this period.
pub const WANDER_ATTEMPTS: usize = 32;

/// Square area an actor may wander in, centred on its anchor tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WanderBounds {
    pub anchor: Position,
    pub radius: u16,
}

impl WanderBounds {
    pub fn contains(&self, position: Position) -> bool {
        let dx = i32::from(position.x) - i32::from(self.anchor.x);
        let dy = i32::from(position.y) - i32::from(self.anchor.y);
        let radius = i32::from(self.radius);
        (-radius..=radius).contains(&dx) && (-radius..=radius).contains(&dy)
    }
}

#[derive(Debug, Clone)]
pub struct WanderRng {
    rng: StdRng,
}

impl WanderRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    fn roll_tenths(&mut self) -> u32 {
        self.rng.gen_range(0..10)
    }

    fn roll_axis_offset(&mut self) -> i16 {
        if self.roll_tenths() < AXIS_MOVE_TRIGGER {
            return 0;
        }
        let amount = self.rng.gen_range(0..=MAX_AXIS_OFFSET);
        if self.rng.gen_bool(0.5) {
            amount
        } else {
            -amount
        }
    }
}

fn roll_candidate(position: Position, rng: &mut WanderRng) -> Option<Position> {
    let dx = rng.roll_axis_offset();
    let dy = rng.roll_axis_offset();
    position.offset(PositionDelta { dx, dy, dz: 0 })
}

/// Rolls one wander period for an actor standing at `position`.
///
/// Returns the tile to walk to, or `None` when the roll does not trigger,
/// the sampled tile is the current one, or no candidate inside `bounds`
/// turns up within [`WANDER_ATTEMPTS`] samples.
pub fn pick_wander_destination(
    position: Position,
    bounds: Option<WanderBounds>,
    rng: &mut WanderRng,
) -> Option<Position> {
    if rng.roll_tenths() < WANDER_TRIGGER {
        return None;
    }
    for _ in 0..WANDER_ATTEMPTS {
        let Some(candidate) = roll_candidate(position, rng) else {
            continue;
        };
        if bounds.is_some_and(|bounds| !bounds.contains(candidate)) {
            continue;
        }
        if candidate == position {
            return None;
        }
        return Some(candidate);
    }
    debug!(
        target: "mobstate::world",
        x = position.x,
        y = position.y,
        ?bounds,
        "wander gave up, no candidate in bounds"
    );
    None
}

/// Runs one wander period for `actor`. A chosen tile replaces the actor's
/// pending path in one step.
pub fn wander<A: Actor + ?Sized>(actor: &mut A, rng: &mut WanderRng) -> Option<Position> {
    let bounds = actor.wander_bounds();
    let destination = pick_wander_destination(actor.mob().position, bounds, rng)?;
    actor.mob_mut().walk_to(destination);
    Some(destination)
}
