use crate::world::position::{Direction, Position};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    Idle,
    Queued,
    Moving,
}

/// Result of releasing one waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStep {
    pub from: Position,
    pub to: Position,
    pub direction: Option<Direction>,
}

/// Pending path of one mob. Waypoints are released one per tick, in the
/// order they were added, and only while the queue is marked valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkingQueue {
    waypoints: VecDeque<Waypoint>,
    valid: bool,
}

impl WalkingQueue {
    /// Appends a waypoint. Tiles are not checked here.
    pub fn add(&mut self, x: u16, y: u16) {
        self.waypoints.push_back(Waypoint { x, y });
    }

    /// Drops all pending waypoints. The valid flag is left alone.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn peek(&self) -> Option<Waypoint> {
        self.waypoints.front().copied()
    }

    pub fn state(&self) -> MovementState {
        match (self.waypoints.is_empty(), self.valid) {
            (true, _) => MovementState::Idle,
            (false, false) => MovementState::Queued,
            (false, true) => MovementState::Moving,
        }
    }

    /// Releases at most one waypoint, which becomes the mob's next position
    /// on its current level. Draining the last waypoint drops the valid flag
    /// so freshly staged paths have to be armed again.
    pub fn step(&mut self, current: Position) -> Option<QueueStep> {
        if !self.valid {
            return None;
        }
        let waypoint = self.waypoints.pop_front()?;
        if self.waypoints.is_empty() {
            self.valid = false;
        }
        let to = current.with_xy(waypoint.x, waypoint.y);
        Some(QueueStep {
            from: current,
            to,
            direction: Direction::between(current, to),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Position {
        Position::new(3222, 3218, 0)
    }

    #[test]
    fn staged_waypoints_wait_for_valid() {
        let mut queue = WalkingQueue::default();
        assert_eq!(queue.state(), MovementState::Idle);
        queue.add(3223, 3218);
        assert_eq!(queue.state(), MovementState::Queued);
        assert_eq!(queue.step(origin()), None);
        assert_eq!(queue.len(), 1);

        queue.set_valid(true);
        assert_eq!(queue.state(), MovementState::Moving);
        let step = queue.step(origin()).expect("step");
        assert_eq!(step.to, Position::new(3223, 3218, 0));
        assert_eq!(step.direction, Some(Direction::East));
        assert_eq!(queue.state(), MovementState::Idle);
        assert!(!queue.is_valid());
    }

    #[test]
    fn one_waypoint_per_step_in_insertion_order() {
        for count in 1..=12u16 {
            let mut queue = WalkingQueue::default();
            for offset in 1..=count {
                queue.add(3222 + offset, 3218);
            }
            queue.set_valid(true);

            let mut position = origin();
            for taken in 1..=count {
                let step = queue.step(position).expect("step");
                assert_eq!(step.from, position);
                assert_eq!(step.to.x, 3222 + taken);
                assert_eq!(usize::from(count - taken), queue.len());
                position = step.to;
            }
            assert!(queue.is_empty());
            assert_eq!(queue.step(position), None);
        }
    }

    #[test]
    fn clear_keeps_valid_flag() {
        let mut queue = WalkingQueue::default();
        queue.add(1, 1);
        queue.add(2, 2);
        queue.set_valid(true);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.is_valid());
        assert_eq!(queue.state(), MovementState::Idle);
    }

    #[test]
    fn step_keeps_level() {
        let mut queue = WalkingQueue::default();
        queue.add(10, 10);
        queue.set_valid(true);
        let step = queue.step(Position::new(10, 11, 2)).expect("step");
        assert_eq!(step.to, Position::new(10, 10, 2));
        assert_eq!(step.direction, Some(Direction::South));
    }

    #[test]
    fn waypoint_on_current_tile_has_no_direction() {
        let mut queue = WalkingQueue::default();
        queue.add(3222, 3218);
        queue.set_valid(true);
        let step = queue.step(origin()).expect("step");
        assert_eq!(step.direction, None);
    }
}
