//! # Mission Snapshot
//!
//! Machine-readable picture of a mission at one instant, for tools that
//! want the state without scraping the status report.
//!
//! ## Structure
//!
//! - planet data: name, clock, grid size, known obstacles
//! - one entry per vehicle with its position, battery and optional parts
//! - the recent tail of the mission journal

use serde::{Deserialize, Serialize};

use crate::mission::Mission;
use crate::types::Position;
use crate::vehicle::ExperimentRecord;

/// Serializable view of the mission planet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlanetData {
    pub name: String,
    /// Local hour, 0 to 23
    pub planet_time: u32,
    pub grid_size: (i32, i32),
    /// Known obstacles in discovery order
    pub obstacles: Vec<Position>,
    pub daylight: bool,
}

/// Serializable view of a single vehicle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VehicleData {
    pub name: String,
    /// `rover`, `experiment rover` or `drone`
    pub kind: String,
    pub position: Position,
    pub battery: f64,
    /// Present for drones only
    pub altitude: Option<i32>,
    pub instruments: Vec<String>,
    /// Readings taken so far; empty for vehicles without a log
    pub experiments: Vec<ExperimentRecord>,
}

/// Complete mission state at one point in simulated time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MissionSnapshot {
    pub planet: PlanetData,
    pub vehicles: Vec<VehicleData>,
    /// Hours advanced since the mission started
    pub elapsed_hours: u64,
    pub recent_events: Vec<String>,
}

/// Builds a snapshot from the live mission.
pub fn create_snapshot(mission: &Mission) -> MissionSnapshot {
    let planet = mission.planet();

    MissionSnapshot {
        planet: PlanetData {
            name: planet.name.clone(),
            planet_time: planet.planet_time,
            grid_size: planet.grid_size,
            obstacles: planet.obstacles.clone(),
            daylight: planet.is_daylight(),
        },
        vehicles: mission
            .vehicles()
            .iter()
            .map(|v| VehicleData {
                name: v.name.clone(),
                kind: v.kind().to_string(),
                position: v.position,
                battery: v.battery,
                altitude: v.altitude(),
                instruments: v.instruments.clone(),
                experiments: v.experiments.clone().unwrap_or_default(),
            })
            .collect(),
        elapsed_hours: mission.elapsed_hours(),
        recent_events: mission.log().recent().map(str::to_string).collect(),
    }
}
