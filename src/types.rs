//! # Exoplan Types Module
//!
//! Core value types shared by every part of the simulator: grid positions,
//! the four compass directions a vehicle can be ordered to take, and the
//! fixed tuning constants of the movement and recharge rules.
//!
//! ## Key Components
//!
//! - **Position**: integer grid cell, `(x, y)` with north towards `+y`
//! - **Direction**: symbolic compass heading parsed from `N`/`S`/`E`/`W`
//! - **Constants**: battery cap, solar recharge, drone costs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// NOTE - Grid cell as `(x, y)`; may be negative before validation
pub type Position = (i32, i32);

/// NOTE - Soft cap applied by solar recharge
pub const BATTERY_CAP: f64 = 100.0;

/// NOTE - Battery gained per recharge during daylight
pub const SOLAR_RECHARGE: f64 = 2.0;

/// NOTE - Flat battery cost of one flown grid move
pub const DRONE_MOVE_COST: f64 = 2.0;

/// NOTE - Altitude deltas above this magnitude cost the steep rate
pub const STEEP_CLIMB_THRESHOLD: i32 = 5;
pub const STEEP_CLIMB_COST: f64 = 3.0;
pub const GENTLE_CLIMB_COST: f64 = 1.0;

/// NOTE - Defaults for freshly built vehicles
pub const DEFAULT_BATTERY: f64 = 100.0;
pub const DEFAULT_MAX_ALTITUDE: i32 = 100;

/// NOTE - Probability that a mission step reveals a new obstacle
pub const DEFAULT_OBSTACLE_CHANCE: f64 = 0.3;

pub const HOURS_PER_DAY: u32 = 24;

/// Compass heading for a one-cell move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit displacement for this heading.
    pub fn delta(self) -> Position {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Cell reached from `from` after one step.
    ///
    /// Saturates at the `i32` limits; a saturated cell is never inside a grid.
    pub fn apply(self, from: Position) -> Position {
        let (dx, dy) = self.delta();
        (from.0.saturating_add(dx), from.1.saturating_add(dy))
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Direction {
    type Err = ActionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "N" => Ok(Direction::North),
            "S" => Ok(Direction::South),
            "E" => Ok(Direction::East),
            "W" => Ok(Direction::West),
            other => Err(ActionError::InvalidDirection(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_steps() {
        assert_eq!(Direction::North.delta(), (0, 1));
        assert_eq!(Direction::South.delta(), (0, -1));
        assert_eq!(Direction::East.delta(), (1, 0));
        assert_eq!(Direction::West.delta(), (-1, 0));
    }

    #[test]
    fn symbols_round_trip_through_parse() {
        for dir in Direction::ALL {
            assert_eq!(dir.symbol().parse::<Direction>().unwrap(), dir);
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        for token in ["n", "NE", "", "Up"] {
            let err = token.parse::<Direction>().unwrap_err();
            assert_eq!(err, ActionError::InvalidDirection(token.to_string()));
        }
    }

    #[test]
    fn apply_can_leave_the_grid() {
        assert_eq!(Direction::West.apply((0, 0)), (-1, 0));
        assert_eq!(Direction::South.apply((3, 0)), (3, -1));
    }

    #[test]
    fn apply_saturates_at_integer_limits() {
        assert_eq!(Direction::East.apply((i32::MAX, 2)), (i32::MAX, 2));
        assert_eq!(Direction::South.apply((2, i32::MIN)), (2, i32::MIN));
    }
}
