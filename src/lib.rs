// Bibliothèque du simulateur d'exploration planétaire
// Expose tous les modules pour utilisation externe (par les binaires)

pub mod types;          // Types de base (Position, Direction, constantes)
pub mod error;          // Erreurs d'action et de catalogue
pub mod planet;         // Grille, obstacles, horloge et ensoleillement
pub mod catalogue;      // Table des planètes (intégrée ou JSON)
pub mod vehicle;        // Rovers, drones et règle de déplacement
pub mod events;         // Journal de mission (fichier + console)
pub mod mission;        // Boucle de mission et pas de temps
pub mod display;        // Affichage terminal de la grille
pub mod snapshot;       // Instantané sérialisable de la mission

// Ré-exportation des types principaux pour faciliter l'importation
pub use types::*;
pub use error::{ActionError, CatalogueError};
pub use planet::Planet;
pub use catalogue::Catalogue;
pub use vehicle::{ExperimentRecord, Flight, Recharge, Vehicle};
pub use events::EventLog;
pub use mission::Mission;
pub use display::Display;
pub use snapshot::{MissionSnapshot, create_snapshot};
