//! # Planet Catalogue
//!
//! The table of planets a mission can be launched on. The built-in table
//! carries the five worlds of the reference survey; a JSON file with the same
//! shape (an array of planets) can replace it at startup.
//!
//! The catalogue is an ordinary value: build it once, hand a planet to a
//! mission, and write the mutated planet back with [`Catalogue::upsert`] when
//! the run is over.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogueError;
use crate::planet::Planet;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    planets: BTreeMap<String, Planet>,
}

impl Catalogue {
    /// The five reference worlds, all clocks at midnight.
    pub fn builtin() -> Self {
        let entries = [
            planet(
                "Mars",
                "rocky",
                (10, 10),
                &[(2, 3), (5, 5)],
                &[("water_ice", 5), ("minerals", 10)],
                2.0,
                (6, 18),
                "red",
            ),
            planet(
                "Moon",
                "cratered",
                (12, 12),
                &[(6, 6), (8, 8)],
                &[("water_ice", 1), ("minerals", 15)],
                3.0,
                (8, 20),
                "gray",
            ),
            planet(
                "Jupiter",
                "gas",
                (15, 15),
                &[(3, 4), (10, 12), (7, 7)],
                &[("hydrogen", 20), ("helium", 15)],
                1.0,
                (5, 17),
                "orange",
            ),
            planet(
                "Venus",
                "volcanic",
                (8, 8),
                &[(1, 2), (4, 4), (6, 1)],
                &[("sulfur", 10), ("minerals", 8)],
                3.0,
                (10, 16),
                "yellow",
            ),
            planet(
                "Mercury",
                "cratered",
                (6, 6),
                &[(0, 1), (3, 3)],
                &[("iron", 12), ("minerals", 5)],
                2.0,
                (7, 19),
                "darkgray",
            ),
        ];

        Self {
            planets: entries
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    /// Parses a JSON array of planets and validates every entry.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let list: Vec<Planet> = serde_json::from_str(json)?;
        let mut catalogue = Self::default();
        for mut planet in list {
            planet.validate()?;
            planet.planet_time %= crate::types::HOURS_PER_DAY;
            catalogue.planets.insert(planet.name.clone(), planet);
        }
        Ok(catalogue)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalogue = Self::from_json(&json)?;
        info!(path = %path.display(), planets = catalogue.len(), "loaded planet catalogue");
        Ok(catalogue)
    }

    pub fn get(&self, name: &str) -> Result<&Planet, CatalogueError> {
        self.planets
            .get(name)
            .ok_or_else(|| CatalogueError::UnknownPlanet(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Planet, CatalogueError> {
        self.planets
            .get_mut(name)
            .ok_or_else(|| CatalogueError::UnknownPlanet(name.to_string()))
    }

    /// Inserts or replaces a planet, keyed by its name.
    pub fn upsert(&mut self, planet: Planet) -> Option<Planet> {
        self.planets.insert(planet.name.clone(), planet)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.planets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn planet(
    name: &str,
    terrain_type: &str,
    grid_size: (i32, i32),
    obstacles: &[(i32, i32)],
    resources: &[(&str, u32)],
    terrain_difficulty: f64,
    sunlight_hours: (u32, u32),
    color: &str,
) -> Planet {
    Planet {
        name: name.to_string(),
        terrain_type: terrain_type.to_string(),
        grid_size,
        obstacles: obstacles.to_vec(),
        resources: resources
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
        planet_time: 0,
        terrain_difficulty,
        sunlight_hours,
        color: color.to_string(),
    }
}
