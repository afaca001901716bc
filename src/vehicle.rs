use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::planet::Planet;
use crate::types::{
    Direction, Position, BATTERY_CAP, DEFAULT_BATTERY, DEFAULT_MAX_ALTITUDE, DRONE_MOVE_COST,
    GENTLE_CLIMB_COST, SOLAR_RECHARGE, STEEP_CLIMB_COST, STEEP_CLIMB_THRESHOLD,
};

/// One reading taken by an experiment rover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub planet: String,
    pub position: Position,
    pub reading: String,
}

/// Altitude state of a flying vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub altitude: i32,
    pub max_altitude: i32,
}

/// What a recharge attempt did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recharge {
    /// New battery level, never above the cap.
    Charged(f64),
    /// Local hour outside the sunlight window.
    Dark,
}

/// A ground rover, experiment rover or drone.
///
/// Every vehicle shares the base record (name, position, battery). The
/// optional parts decide which actions are legal: `experiments` enables
/// [`Vehicle::perform_experiment`], `flight` enables [`Vehicle::fly`] and
/// [`Vehicle::change_altitude`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub position: Position,
    pub battery: f64,
    pub instruments: Vec<String>,
    pub experiments: Option<Vec<ExperimentRecord>>,
    pub flight: Option<Flight>,
}

impl Vehicle {
    pub fn rover(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: (0, 0),
            battery: DEFAULT_BATTERY,
            instruments: Vec::new(),
            experiments: None,
            flight: None,
        }
    }

    pub fn experiment_rover(name: impl Into<String>, instruments: Vec<String>) -> Self {
        Self {
            instruments,
            experiments: Some(Vec::new()),
            ..Self::rover(name)
        }
    }

    pub fn drone(name: impl Into<String>) -> Self {
        Self {
            flight: Some(Flight {
                altitude: 0,
                max_altitude: DEFAULT_MAX_ALTITUDE,
            }),
            ..Self::rover(name)
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_battery(mut self, battery: f64) -> Self {
        self.battery = battery.max(0.0);
        self
    }

    pub fn with_instruments(mut self, instruments: Vec<String>) -> Self {
        self.instruments = instruments;
        self
    }

    /// Sets altitude and ceiling; no effect on vehicles that cannot fly.
    pub fn with_altitude(mut self, altitude: i32, max_altitude: i32) -> Self {
        if let Some(flight) = self.flight.as_mut() {
            flight.max_altitude = max_altitude.max(0);
            flight.altitude = altitude.clamp(0, flight.max_altitude);
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match (&self.flight, &self.experiments) {
            (Some(_), _) => "drone",
            (None, Some(_)) => "experiment rover",
            (None, None) => "rover",
        }
    }

    pub fn altitude(&self) -> Option<i32> {
        self.flight.map(|f| f.altitude)
    }

    /// Ground move onto the neighbouring cell.
    ///
    /// Checks run in a fixed order and stop at the first failure: battery,
    /// grid bounds, obstacles. On success the battery drops by the planet's
    /// terrain difficulty, floored at zero.
    pub fn drive(&mut self, direction: Direction, planet: &Planet) -> Result<Position, ActionError> {
        if self.battery <= 0.0 {
            return Err(ActionError::BatteryDepleted);
        }

        let target = direction.apply(self.position);
        planet.check_ground_target(target)?;

        self.position = target;
        self.battery = (self.battery - planet.terrain_difficulty).max(0.0);
        Ok(target)
    }

    /// Flown move: flat cost, no obstacle check.
    pub fn fly(&mut self, direction: Direction, planet: &Planet) -> Result<Position, ActionError> {
        if self.flight.is_none() {
            return Err(ActionError::MissingCapability("flight"));
        }

        let target = direction.apply(self.position);
        if !planet.in_bounds(target) {
            return Err(ActionError::OutOfBounds(target));
        }
        if self.battery < DRONE_MOVE_COST {
            return Err(ActionError::InsufficientBattery {
                required: DRONE_MOVE_COST,
                available: self.battery,
            });
        }

        self.position = target;
        self.battery -= DRONE_MOVE_COST;
        Ok(target)
    }

    /// Climbs (positive delta) or descends (negative delta).
    pub fn change_altitude(&mut self, delta: i32) -> Result<i32, ActionError> {
        let Some(flight) = self.flight.as_mut() else {
            return Err(ActionError::MissingCapability("flight"));
        };

        let Some(requested) = flight.altitude.checked_add(delta) else {
            return Err(if delta > 0 {
                ActionError::AboveCeiling {
                    requested: i32::MAX,
                    max: flight.max_altitude,
                }
            } else {
                ActionError::BelowGround(i32::MIN)
            });
        };
        if requested < 0 {
            return Err(ActionError::BelowGround(requested));
        }
        if requested > flight.max_altitude {
            return Err(ActionError::AboveCeiling {
                requested,
                max: flight.max_altitude,
            });
        }

        let cost = climb_cost(delta);
        if self.battery < cost {
            return Err(ActionError::InsufficientBattery {
                required: cost,
                available: self.battery,
            });
        }

        flight.altitude = requested;
        self.battery -= cost;
        Ok(requested)
    }

    /// Takes a reading with a randomly chosen instrument and files it.
    pub fn perform_experiment<R: Rng + ?Sized>(
        &mut self,
        planet: &Planet,
        rng: &mut R,
    ) -> Result<ExperimentRecord, ActionError> {
        let Some(log) = self.experiments.as_mut() else {
            return Err(ActionError::MissingCapability("experiments"));
        };
        let Some(instrument) = self.instruments.choose(rng) else {
            return Err(ActionError::NoInstruments);
        };

        let record = ExperimentRecord {
            planet: planet.name.clone(),
            position: self.position,
            reading: format!("{} measurement: {}", instrument, rng.gen_range(1..=100)),
        };
        log.push(record.clone());
        Ok(record)
    }

    /// Solar top-up while the planet is in daylight.
    ///
    /// The result is capped at [`BATTERY_CAP`], so a pack charged above it
    /// comes back down to the cap.
    pub fn recharge(&mut self, planet: &Planet) -> Recharge {
        if !planet.is_daylight() {
            return Recharge::Dark;
        }
        self.battery = (self.battery + SOLAR_RECHARGE).min(BATTERY_CAP);
        Recharge::Charged(self.battery)
    }
}

/// Battery cost of an altitude change.
pub fn climb_cost(delta: i32) -> f64 {
    if delta.unsigned_abs() > STEEP_CLIMB_THRESHOLD.unsigned_abs() {
        STEEP_CLIMB_COST
    } else {
        GENTLE_CLIMB_COST
    }
}
