use crate::error::ConfigError;

// A unit grid step `(dx, dy)`: dx moves along columns, dy along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const DOWN_RIGHT: Direction = Direction { dx: 1, dy: 1 };
    pub const DOWN_LEFT: Direction = Direction { dx: -1, dy: 1 };
    pub const UP_LEFT: Direction = Direction { dx: -1, dy: -1 };
    pub const UP_RIGHT: Direction = Direction { dx: 1, dy: -1 };

    // The eight principal and diagonal sweeps, in bake order
    pub const PRINCIPAL: [Direction; 8] = [
        Direction::DOWN,
        Direction::UP,
        Direction::RIGHT,
        Direction::LEFT,
        Direction::DOWN_RIGHT,
        Direction::DOWN_LEFT,
        Direction::UP_LEFT,
        Direction::UP_RIGHT,
    ];

    // Axis-aligned sweeps only
    pub const AXIS: [Direction; 4] = [
        Direction::DOWN,
        Direction::UP,
        Direction::RIGHT,
        Direction::LEFT,
    ];

    // Checked constructor: both components in {-1, 0, 1} and not both zero
    pub fn new(dx: i32, dy: i32) -> Result<Self, ConfigError> {
        let unit = |v: i32| (-1..=1).contains(&v);
        if !unit(dx) || !unit(dy) || (dx == 0 && dy == 0) {
            return Err(ConfigError::InvalidDirection { dx, dy });
        }
        Ok(Self { dx, dy })
    }

    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }
}
