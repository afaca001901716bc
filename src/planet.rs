use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ActionError, CatalogueError};
use crate::types::{Position, HOURS_PER_DAY};

/// One explorable world: its grid, known hazards, clock and sunlight.
///
/// Obstacles keep the order in which they became known so status reports
/// list them the way they were discovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub terrain_type: String,
    /// `(width, height)`; valid cells are `[0, width) x [0, height)`.
    pub grid_size: (i32, i32),
    pub obstacles: Vec<Position>,
    #[serde(default)]
    pub resources: BTreeMap<String, u32>,
    /// Local hour, 0 to 23.
    #[serde(default)]
    pub planet_time: u32,
    pub terrain_difficulty: f64,
    /// `(sunrise, sunset)`, both inclusive.
    pub sunlight_hours: (u32, u32),
    #[serde(default)]
    pub color: String,
}

impl Planet {
    pub fn width(&self) -> i32 {
        self.grid_size.0
    }

    pub fn height(&self) -> i32 {
        self.grid_size.1
    }

    pub fn in_bounds(&self, (x, y): Position) -> bool {
        (0..self.width()).contains(&x) && (0..self.height()).contains(&y)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_obstacle(pos)
    }

    /// Ground validation of a move target: bounds first, then obstacles.
    pub fn check_ground_target(&self, pos: Position) -> Result<(), ActionError> {
        if !self.in_bounds(pos) {
            return Err(ActionError::OutOfBounds(pos));
        }
        if self.is_obstacle(pos) {
            return Err(ActionError::BlockedByObstacle(pos));
        }
        Ok(())
    }

    /// True while the local hour sits inside the sunlight window.
    pub fn is_daylight(&self) -> bool {
        let (sunrise, sunset) = self.sunlight_hours;
        (sunrise..=sunset).contains(&self.planet_time)
    }

    /// Moves the local clock forward, wrapping at midnight.
    pub fn advance_time(&mut self, hours: u32) -> u32 {
        self.planet_time = (self.planet_time + hours % HOURS_PER_DAY) % HOURS_PER_DAY;
        self.planet_time
    }

    /// Records an obstacle unless it is already known.
    pub fn add_obstacle(&mut self, pos: Position) -> bool {
        if self.is_obstacle(pos) {
            return false;
        }
        self.obstacles.push(pos);
        true
    }

    /// Draws `count` random cells and records the new ones.
    ///
    /// Draws landing on a known obstacle are skipped, not retried, so fewer
    /// than `count` cells may be added. An empty grid adds nothing.
    pub fn add_obstacles<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Vec<Position> {
        let mut added = Vec::new();
        if self.width() <= 0 || self.height() <= 0 {
            debug!(planet = %self.name, grid = ?self.grid_size, "no cells to place obstacles on");
            return added;
        }
        for _ in 0..count {
            let pos = (
                rng.gen_range(0..self.width()),
                rng.gen_range(0..self.height()),
            );
            if self.add_obstacle(pos) {
                added.push(pos);
            } else {
                debug!(planet = %self.name, ?pos, "obstacle draw collided with a known one");
            }
        }
        added
    }

    /// Checks the data model constraints of a catalogue entry.
    pub fn validate(&self) -> Result<(), CatalogueError> {
        if self.width() <= 0 || self.height() <= 0 {
            return Err(CatalogueError::invalid_planet(
                &self.name,
                format!("grid size {:?} must be positive", self.grid_size),
            ));
        }
        if !(self.terrain_difficulty > 0.0) {
            return Err(CatalogueError::invalid_planet(
                &self.name,
                format!("terrain difficulty {} must be positive", self.terrain_difficulty),
            ));
        }
        if let Some(pos) = self
            .obstacles
            .iter()
            .enumerate()
            .find_map(|(i, pos)| self.obstacles[..i].contains(pos).then_some(pos))
        {
            return Err(CatalogueError::invalid_planet(
                &self.name,
                format!("obstacle {:?} listed twice", pos),
            ));
        }
        let (sunrise, sunset) = self.sunlight_hours;
        if sunrise >= HOURS_PER_DAY || sunset >= HOURS_PER_DAY || sunrise > sunset {
            return Err(CatalogueError::invalid_planet(
                &self.name,
                format!("sunlight window {:?} is not a daytime range", self.sunlight_hours),
            ));
        }
        Ok(())
    }
}
