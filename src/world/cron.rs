use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle returned when a periodic timer is scheduled; cancel it when the
/// actor leaves the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WanderHandle(u64);

#[derive(Clone, Copy, Debug)]
struct TimerEntry {
    handle: WanderHandle,
    world_index: u16,
    due_ms: u64,
    period_ms: u64,
}

/// Min-heap by due time, then by handle for a stable firing order.
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.handle.0.cmp(&self.handle.0))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle && self.due_ms == other.due_ms
    }
}

impl Eq for TimerEntry {}

/// Periodic per-actor timers driven by simulated world time.
///
/// Cancelled or rescheduled entries stay in the heap and are skipped when
/// they surface.
#[derive(Debug, Default)]
pub struct WanderTimers {
    heap: BinaryHeap<TimerEntry>,
    active: HashMap<WanderHandle, TimerEntry>,
    next_handle: u64,
}

impl WanderTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// First firing is one full period after `now`.
    pub fn schedule(&mut self, world_index: u16, period: Duration, now: Duration) -> WanderHandle {
        self.next_handle += 1;
        let handle = WanderHandle(self.next_handle);
        let period_ms = millis(period).max(1);
        let entry = TimerEntry {
            handle,
            world_index,
            due_ms: millis(now).saturating_add(period_ms),
            period_ms,
        };
        self.active.insert(handle, entry);
        self.heap.push(entry);
        handle
    }

    /// Returns false when the handle was unknown or already cancelled.
    pub fn cancel(&mut self, handle: WanderHandle) -> bool {
        self.active.remove(&handle).is_some()
    }

    pub fn is_active(&self, handle: WanderHandle) -> bool {
        self.active.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Pops the next timer due at or before `now` and books its following
    /// period. Call repeatedly until it returns `None`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(WanderHandle, u16)> {
        let now_ms = millis(now);
        loop {
            let entry = *self.heap.peek()?;
            match self.active.get(&entry.handle) {
                Some(active) if active.due_ms == entry.due_ms => {
                    if entry.due_ms > now_ms {
                        return None;
                    }
                    self.heap.pop();
                    let next = TimerEntry {
                        due_ms: entry.due_ms.saturating_add(entry.period_ms),
                        ..entry
                    };
                    self.active.insert(entry.handle, next);
                    self.heap.push(next);
                    return Some((entry.handle, entry.world_index));
                }
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(timers: &mut WanderTimers, now: Duration) -> Vec<u16> {
        let mut fired = Vec::new();
        while let Some((_, index)) = timers.pop_due(now) {
            fired.push(index);
        }
        fired
    }

    #[test]
    fn fires_once_per_period() {
        let mut timers = WanderTimers::new();
        timers.schedule(1, ms(1000), ms(0));
        assert!(drain(&mut timers, ms(999)).is_empty());
        assert_eq!(drain(&mut timers, ms(1000)), vec![1]);
        assert!(drain(&mut timers, ms(1800)).is_empty());
        assert_eq!(drain(&mut timers, ms(2400)), vec![1]);
    }

    #[test]
    fn late_poll_catches_up_missed_periods() {
        let mut timers = WanderTimers::new();
        timers.schedule(4, ms(1000), ms(0));
        assert_eq!(drain(&mut timers, ms(3000)), vec![4, 4, 4]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = WanderTimers::new();
        let first = timers.schedule(1, ms(1000), ms(0));
        timers.schedule(2, ms(1000), ms(0));
        assert!(timers.cancel(first));
        assert!(!timers.cancel(first));
        assert!(!timers.is_active(first));
        assert_eq!(drain(&mut timers, ms(1000)), vec![2]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn earlier_timers_fire_first() {
        let mut timers = WanderTimers::new();
        timers.schedule(7, ms(1000), ms(200));
        timers.schedule(3, ms(1000), ms(0));
        assert_eq!(drain(&mut timers, ms(1200)), vec![3, 7]);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(millis(Duration::MAX), u64::MAX);
        let mut timers = WanderTimers::new();
        timers.schedule(1, Duration::MAX, ms(5));
        assert!(drain(&mut timers, ms(u64::MAX - 1)).is_empty());
        assert_eq!(timers.pop_due(Duration::MAX).map(|(_, index)| index), Some(1));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut timers = WanderTimers::new();
        timers.schedule(1, Duration::ZERO, ms(0));
        assert_eq!(drain(&mut timers, ms(3)), vec![1, 1, 1]);
    }
}
