#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

/// Compass directions. The y axis grows northwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Northwest,
    North,
    Northeast,
    West,
    East,
    Southwest,
    South,
    Southeast,
}

/// Wire value used for "no direction" in walk/run/face fields.
pub const NO_DIRECTION: i8 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDelta {
    pub dx: i16,
    pub dy: i16,
    pub dz: i8,
}

impl Position {
    pub fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    pub fn with_xy(self, x: u16, y: u16) -> Self {
        Self { x, y, z: self.z }
    }

    pub fn offset(self, delta: PositionDelta) -> Option<Self> {
        let x = i32::from(self.x) + i32::from(delta.dx);
        let y = i32::from(self.y) + i32::from(delta.dy);
        let z = i16::from(self.z) + i16::from(delta.dz);

        if x < 0 || y < 0 || z < 0 {
            return None;
        }

        if x > i32::from(u16::MAX) || y > i32::from(u16::MAX) || z > i16::from(u8::MAX) {
            return None;
        }

        Some(Self {
            x: x as u16,
            y: y as u16,
            z: z as u8,
        })
    }

    pub fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction.delta())
    }

    /// Chebyshev distance on the x/y plane, ignoring the level.
    pub fn axis_distance(self, other: Position) -> u32 {
        let dx = i32::from(self.x) - i32::from(other.x);
        let dy = i32::from(self.y) - i32::from(other.y);
        dx.unsigned_abs().max(dy.unsigned_abs())
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
        Direction::West,
        Direction::East,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
    ];

    pub fn delta(self) -> PositionDelta {
        match self {
            Direction::Northwest => PositionDelta { dx: -1, dy: 1, dz: 0 },
            Direction::North => PositionDelta { dx: 0, dy: 1, dz: 0 },
            Direction::Northeast => PositionDelta { dx: 1, dy: 1, dz: 0 },
            Direction::West => PositionDelta { dx: -1, dy: 0, dz: 0 },
            Direction::East => PositionDelta { dx: 1, dy: 0, dz: 0 },
            Direction::Southwest => PositionDelta { dx: -1, dy: -1, dz: 0 },
            Direction::South => PositionDelta { dx: 0, dy: -1, dz: 0 },
            Direction::Southeast => PositionDelta { dx: 1, dy: -1, dz: 0 },
        }
    }

    /// Direction of travel from `from` towards `to`, using only the sign of
    /// each axis. Returns `None` when both tiles share x and y.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let dx = i32::from(to.x) - i32::from(from.x);
        let dy = i32::from(to.y) - i32::from(from.y);
        match (dx.signum(), dy.signum()) {
            (-1, 1) => Some(Direction::Northwest),
            (0, 1) => Some(Direction::North),
            (1, 1) => Some(Direction::Northeast),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            (-1, -1) => Some(Direction::Southwest),
            (0, -1) => Some(Direction::South),
            (1, -1) => Some(Direction::Southeast),
            _ => None,
        }
    }

    pub fn code(self) -> i8 {
        match self {
            Direction::Northwest => 0,
            Direction::North => 1,
            Direction::Northeast => 2,
            Direction::West => 3,
            Direction::East => 4,
            Direction::Southwest => 5,
            Direction::South => 6,
            Direction::Southeast => 7,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        Direction::ALL.get(usize::try_from(code).ok()?).copied()
    }
}

/// Encodes an optional direction with the `-1` sentinel.
pub fn direction_code(direction: Option<Direction>) -> i8 {
    direction.map(Direction::code).unwrap_or(NO_DIRECTION)
}
