//! Error types for vehicle actions and catalogue loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Position;

/// Expected, recoverable reasons an ordered action does not happen.
///
/// The vehicle is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// Direction token outside `N`, `S`, `E`, `W`.
    #[error("invalid direction {0}")]
    InvalidDirection(String),

    #[error("battery depleted")]
    BatteryDepleted,

    /// Target cell outside the planet grid.
    #[error("out of bounds at {0:?}")]
    OutOfBounds(Position),

    /// Target cell is a known obstacle.
    #[error("blocked by obstacle at {0:?}")]
    BlockedByObstacle(Position),

    /// Battery below the cost of the requested action.
    #[error("insufficient battery: {required:.1} needed, {available:.1} available")]
    InsufficientBattery {
        /// Cost of the action.
        required: f64,
        /// Battery at the time of the request.
        available: f64,
    },

    #[error("cannot go below ground level (requested altitude {0})")]
    BelowGround(i32),

    #[error("cannot exceed a max altitude of {max} (requested altitude {requested})")]
    AboveCeiling {
        /// Altitude that would have been reached.
        requested: i32,
        /// Ceiling of the vehicle.
        max: i32,
    },

    #[error("no instruments on board")]
    NoInstruments,

    /// Vehicle lacks the equipment for this kind of action.
    #[error("not equipped for {0}")]
    MissingCapability(&'static str),

    #[error("no vehicle named {0} in this mission")]
    UnknownVehicle(String),
}

/// Errors raised while building or loading a planet catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalogue: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown planet {0}")]
    UnknownPlanet(String),

    /// Planet entry violates a data model constraint.
    #[error("invalid planet {name}: {reason}")]
    InvalidPlanet { name: String, reason: String },
}

impl CatalogueError {
    pub fn invalid_planet(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPlanet {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
