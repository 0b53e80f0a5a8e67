use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameTick(pub u64);

/// Monotonic tick counter for the world driver.
#[derive(Debug, Clone)]
pub struct GameClock {
    tick_length: Duration,
    tick: GameTick,
}

impl GameClock {
    pub fn new(tick_length: Duration) -> Self {
        let tick_length = if tick_length.is_zero() {
            Duration::from_millis(1)
        } else {
            tick_length
        };
        Self {
            tick_length,
            tick: GameTick(0),
        }
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    pub fn now(&self) -> GameTick {
        self.tick
    }

    pub fn advance(&mut self, ticks: u64) -> GameTick {
        self.tick.0 = self.tick.0.saturating_add(ticks);
        self.tick
    }

    /// Simulated time since tick zero.
    pub fn elapsed(&self) -> Duration {
        self.duration_for_ticks(self.tick.0)
    }

    pub fn duration_for_ticks(&self, ticks: u64) -> Duration {
        let nanos = self
            .tick_length
            .as_nanos()
            .saturating_mul(ticks as u128)
            .min(u64::MAX as u128) as u64;
        Duration::from_nanos(nanos)
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tick_length_is_clamped() {
        let clock = GameClock::new(Duration::ZERO);
        assert_eq!(clock.tick_length(), Duration::from_millis(1));
    }

    #[test]
    fn elapsed_tracks_advanced_ticks() {
        let mut clock = GameClock::new(Duration::from_millis(600));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        clock.advance(3);
        assert_eq!(clock.now(), GameTick(3));
        assert_eq!(clock.elapsed(), Duration::from_millis(1800));
    }
}
