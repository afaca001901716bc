use std::fmt::Write as _;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::ActionError;
use crate::events::EventLog;
use crate::planet::Planet;
use crate::types::{Direction, Position, DEFAULT_OBSTACLE_CHANCE};
use crate::vehicle::{ExperimentRecord, Recharge, Vehicle};

/// A planet, the vehicles deployed on it and the mission clock.
///
/// Every action goes through the mission so its outcome, success or
/// failure, lands in the event log. Failed actions are returned to the
/// caller as values; none of them stop the mission.
pub struct Mission {
    planet: Planet,
    vehicles: Vec<Vehicle>,
    rng: ChaCha8Rng,
    log: EventLog,
    elapsed_hours: u64,
    obstacle_chance: f64,
}

impl Mission {
    /// Starts a mission on `planet`. Catalogue planets are already
    /// validated; a hand-built one should pass [`Planet::validate`] first.
    pub fn new(planet: Planet, seed: u64) -> Self {
        Self {
            planet,
            vehicles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: EventLog::in_memory(),
            elapsed_hours: 0,
            obstacle_chance: DEFAULT_OBSTACLE_CHANCE,
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn with_obstacle_chance(mut self, chance: f64) -> Self {
        self.obstacle_chance = chance;
        self
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, name: &str) -> Result<&Vehicle, ActionError> {
        self.index_of(name).map(|i| &self.vehicles[i])
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn elapsed_hours(&self) -> u64 {
        self.elapsed_hours
    }

    pub fn obstacle_chance(&self) -> f64 {
        self.obstacle_chance
    }

    /// Ends the mission, handing back the planet as it now stands.
    pub fn into_planet(self) -> Planet {
        self.planet
    }

    /// Writes the opening lines of the journal.
    pub fn announce(&mut self) {
        let planet = self.planet.name.clone();
        let hour = self.planet.planet_time;
        self.log.record(format!("Planet: {}", planet));
        self.log.record(format!("Time: {}h", hour));
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.log.record(format!(
            "{} added to mission on {}",
            vehicle.name, self.planet.name
        ));
        self.vehicles.push(vehicle);
    }

    /// Orders a ground move; `direction` is the raw compass token.
    pub fn drive(&mut self, name: &str, direction: &str) -> Result<Position, ActionError> {
        let outcome = self.with_direction(name, direction, |vehicle, dir, planet| {
            vehicle.drive(dir, planet)
        });
        match &outcome {
            Ok(pos) => {
                let line = format!(
                    "{} moved {} to {:?}. Battery left: {:.1}",
                    name,
                    direction,
                    pos,
                    self.battery_of(name)
                );
                self.log.record(line);
            }
            Err(e) => self.log.record(format!("{} cannot move: {}", name, e)),
        }
        outcome
    }

    /// Orders a flown move; only drones can take it.
    pub fn fly(&mut self, name: &str, direction: &str) -> Result<Position, ActionError> {
        let outcome = self.with_direction(name, direction, |vehicle, dir, planet| {
            vehicle.fly(dir, planet)
        });
        match &outcome {
            Ok(pos) => {
                let vehicle = self.vehicle(name)?;
                let line = format!(
                    "{} flew {} to {:?} at altitude {}. Battery: {:.1}",
                    name,
                    direction,
                    pos,
                    vehicle.altitude().unwrap_or_default(),
                    vehicle.battery
                );
                self.log.record(line);
            }
            Err(e) => self.log.record(format!("{} cannot fly: {}", name, e)),
        }
        outcome
    }

    pub fn change_altitude(&mut self, name: &str, delta: i32) -> Result<i32, ActionError> {
        let outcome = self
            .index_of(name)
            .and_then(|i| self.vehicles[i].change_altitude(delta));
        match &outcome {
            Ok(altitude) => {
                let line = format!(
                    "{} changed altitude to {}. Battery: {:.1}",
                    name,
                    altitude,
                    self.battery_of(name)
                );
                self.log.record(line);
            }
            Err(e) => self
                .log
                .record(format!("{} cannot change altitude: {}", name, e)),
        }
        outcome
    }

    pub fn perform_experiment(&mut self, name: &str) -> Result<ExperimentRecord, ActionError> {
        let outcome = match self.index_of(name) {
            Ok(i) => self.vehicles[i].perform_experiment(&self.planet, &mut self.rng),
            Err(e) => Err(e),
        };
        match &outcome {
            Ok(record) => self.log.record(format!(
                "{} performed an experiment at {:?} on {}: {}",
                name, record.position, record.planet, record.reading
            )),
            Err(e) => self
                .log
                .record(format!("{} cannot run an experiment: {}", name, e)),
        }
        outcome
    }

    /// Advances the planet clock, wrapping at 24h.
    pub fn update_time(&mut self, hours: u32) -> u32 {
        let hour = self.planet.advance_time(hours);
        self.elapsed_hours += u64::from(hours);
        self.log
            .record(format!("Time on {} is now {}h", self.planet.name, hour));
        hour
    }

    /// Solar recharge pass over every vehicle.
    pub fn recharge_all(&mut self) {
        for vehicle in &mut self.vehicles {
            match vehicle.recharge(&self.planet) {
                Recharge::Charged(battery) => self.log.record(format!(
                    "{} is recharging. Battery: {:.1}",
                    vehicle.name, battery
                )),
                Recharge::Dark => {
                    debug!(vehicle = %vehicle.name, "no recharge in the dark");
                }
            }
        }
    }

    /// Rolls for a newly spotted obstacle; on success one random cell is
    /// drawn and kept if it was not already known.
    pub fn random_obstacle(&mut self, chance: f64) -> Option<Position> {
        if !(self.rng.r#gen::<f64>() < chance) {
            return None;
        }
        let added = self.planet.add_obstacles(&mut self.rng, 1).pop();
        match added {
            Some(pos) => self
                .log
                .record(format!("Unknown obstacle detected at {:?}", pos)),
            None => debug!(planet = %self.planet.name, "spotted obstacle was already known"),
        }
        added
    }

    /// One simulated hour: clock, recharge, obstacle roll.
    pub fn step(&mut self) -> Option<Position> {
        self.step_with_chance(self.obstacle_chance)
    }

    pub fn step_with_chance(&mut self, chance: f64) -> Option<Position> {
        self.update_time(1);
        self.recharge_all();
        let spotted = self.random_obstacle(chance);
        info!(
            planet = %self.planet.name,
            hour = self.planet.planet_time,
            elapsed = self.elapsed_hours,
            "mission step"
        );
        spotted
    }

    /// Console status block: planet, hour, obstacles and every vehicle.
    pub fn status_report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n=== Mission Status Report ===");
        let _ = writeln!(out, "Planet: {}", self.planet.name);
        let _ = writeln!(out, "Time: {}h", self.planet.planet_time);
        let _ = writeln!(out, "Known obstacles: {:?}", self.planet.obstacles);
        let _ = writeln!(out, "\nVehicles:");
        for v in &self.vehicles {
            let _ = write!(
                out,
                "  - {}: position={:?}, battery={:.1}",
                v.name, v.position, v.battery
            );
            if let Some(altitude) = v.altitude() {
                let _ = write!(out, ", altitude={}", altitude);
            }
            out.push('\n');
        }
        let _ = writeln!(out, "=============================");
        out
    }

    fn index_of(&self, name: &str) -> Result<usize, ActionError> {
        self.vehicles
            .iter()
            .position(|v| v.name == name)
            .ok_or_else(|| ActionError::UnknownVehicle(name.to_string()))
    }

    fn battery_of(&self, name: &str) -> f64 {
        self.vehicle(name).map(|v| v.battery).unwrap_or_default()
    }

    /// Resolves the vehicle, then the direction token, then runs `action`.
    fn with_direction<T>(
        &mut self,
        name: &str,
        direction: &str,
        action: impl FnOnce(&mut Vehicle, Direction, &Planet) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        let index = self.index_of(name)?;
        let dir: Direction = direction.parse()?;
        action(&mut self.vehicles[index], dir, &self.planet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    fn mars_mission() -> Mission {
        let mars = Catalogue::builtin().get("Mars").unwrap().clone();
        let mut mission = Mission::new(mars, 42);
        mission.add_vehicle(Vehicle::rover("Pathfinder").with_instruments(vec!["camera".into()]));
        mission.add_vehicle(Vehicle::drone("SkyScout").with_battery(120.0));
        mission
    }

    #[test]
    fn moves_are_journalled() {
        let mut mission = mars_mission();

        assert_eq!(mission.drive("Pathfinder", "N"), Ok((0, 1)));
        assert_eq!(
            mission.log().last(),
            Some("Pathfinder moved N to (0, 1). Battery left: 98.0")
        );

        assert_eq!(mission.fly("SkyScout", "E"), Ok((1, 0)));
        assert_eq!(
            mission.log().last(),
            Some("SkyScout flew E to (1, 0) at altitude 0. Battery: 118.0")
        );
    }

    #[test]
    fn failures_are_journalled_and_returned() {
        let mut mission = mars_mission();

        assert_eq!(
            mission.drive("Pathfinder", "Q"),
            Err(ActionError::InvalidDirection("Q".into()))
        );
        assert_eq!(
            mission.log().last(),
            Some("Pathfinder cannot move: invalid direction Q")
        );

        assert_eq!(
            mission.drive("Ghost", "N"),
            Err(ActionError::UnknownVehicle("Ghost".into()))
        );
        assert_eq!(
            mission.fly("Pathfinder", "N"),
            Err(ActionError::MissingCapability("flight"))
        );
        assert_eq!(mission.vehicle("Pathfinder").unwrap().position, (0, 0));
    }

    #[test]
    fn update_time_wraps_and_counts() {
        let mut mission = mars_mission();
        mission.update_time(22);
        assert_eq!(mission.update_time(5), 3);
        assert_eq!(mission.elapsed_hours(), 27);
        assert_eq!(mission.log().last(), Some("Time on Mars is now 3h"));
    }

    #[test]
    fn step_recharges_in_daylight() {
        let mut mission = mars_mission();
        mission.drive("Pathfinder", "N").unwrap();
        mission.update_time(5);

        mission.step_with_chance(0.0);
        assert_eq!(mission.planet().planet_time, 6);
        assert_eq!(mission.vehicle("Pathfinder").unwrap().battery, 100.0);
        assert_eq!(mission.vehicle("SkyScout").unwrap().battery, 100.0);
    }

    #[test]
    fn obstacle_roll_respects_chance() {
        let mut mission = mars_mission();
        for _ in 0..10 {
            assert_eq!(mission.random_obstacle(0.0), None);
        }
        assert_eq!(mission.planet().obstacles.len(), 2);

        let mut spotted = 0;
        for _ in 0..10 {
            if mission.random_obstacle(1.0).is_some() {
                spotted += 1;
            }
        }
        assert!(spotted > 0);
        assert_eq!(mission.planet().obstacles.len(), 2 + spotted);
    }

    #[test]
    fn nan_chance_never_spawns() {
        let mut mission = mars_mission().with_obstacle_chance(f64::NAN);
        for _ in 0..20 {
            assert_eq!(mission.step(), None);
        }
        assert_eq!(mission.planet().obstacles.len(), 2);
    }

    #[test]
    fn empty_grid_never_spawns() {
        let mut planet = Catalogue::builtin().get("Mars").unwrap().clone();
        planet.grid_size = (0, 10);
        let mut mission = Mission::new(planet, 3);
        assert_eq!(mission.random_obstacle(1.0), None);
        assert_eq!(mission.planet().obstacles.len(), 2);
    }

    #[test]
    fn same_seed_same_mission() {
        let mut a = mars_mission();
        let mut b = mars_mission();
        for _ in 0..30 {
            assert_eq!(a.step(), b.step());
        }
        assert_eq!(a.planet().obstacles, b.planet().obstacles);
    }

    #[test]
    fn status_report_lists_everything() {
        let mut mission = mars_mission();
        mission.drive("Pathfinder", "N").unwrap();
        mission.update_time(3);

        let report = mission.status_report();
        assert!(report.contains("Planet: Mars"));
        assert!(report.contains("Time: 3h"));
        assert!(report.contains("Known obstacles: [(2, 3), (5, 5)]"));
        assert!(report.contains("  - Pathfinder: position=(0, 1), battery=98.0\n"));
        assert!(report.contains("  - SkyScout: position=(0, 0), battery=120.0, altitude=0\n"));
    }

    #[test]
    fn experiments_flow_through_the_mission_rng() {
        let mars = Catalogue::builtin().get("Mars").unwrap().clone();
        let mut mission = Mission::new(mars, 7);
        mission.add_vehicle(Vehicle::experiment_rover("Curiosity", vec!["drill".into()]));

        let record = mission.perform_experiment("Curiosity").unwrap();
        assert!(record.reading.starts_with("drill measurement: "));
        assert!(mission.log().last().unwrap().starts_with(
            "Curiosity performed an experiment at (0, 0) on Mars: drill measurement: "
        ));
    }
}
