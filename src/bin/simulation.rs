// Boucle de simulation pas à pas
// Un rover d'expérience suit un itinéraire au sol, un drone suit le sien,
// et chaque heure simulée recharge les batteries et peut révéler un obstacle.

use std::io::stdout;
use std::path::PathBuf;
use std::{thread, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::Rng;
use tracing::info;

use exoplan::events::{init_diagnostics, DEFAULT_LOG_FILE};
use exoplan::{
    create_snapshot, Catalogue, Display, EventLog, Mission, Vehicle, DEFAULT_OBSTACLE_CHANCE,
};

#[derive(Parser, Debug)]
#[command(name = "simulation", about = "Hour-by-hour exploration run")]
struct Args {
    #[arg(long, default_value = "Mars")]
    planet: String,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated hours to run
    #[arg(long, default_value_t = 24)]
    steps: u32,

    /// Ground route, one compass letter per hour, repeated
    #[arg(long, default_value = "NNNNNEEEEE")]
    route: String,

    /// Drone route, one compass letter per hour, repeated
    #[arg(long, default_value = "EEENNN")]
    drone_route: String,

    /// Take a reading every this many hours (0 disables)
    #[arg(long, default_value_t = 4)]
    experiment_every: u32,

    #[arg(long, default_value_t = DEFAULT_OBSTACLE_CHANCE)]
    obstacle_chance: f64,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Redraw the grid after every hour
    #[arg(long)]
    watch: bool,

    /// Pause between redraws, in milliseconds
    #[arg(long, default_value_t = 300)]
    delay_ms: u64,

    /// Print a JSON snapshot at the end
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_diagnostics();
    let args = Args::parse();

    if args.route.is_empty() || args.drone_route.is_empty() {
        bail!("routes must contain at least one direction");
    }
    if !(0.0..=1.0).contains(&args.obstacle_chance) {
        bail!("obstacle chance {} is not a probability", args.obstacle_chance);
    }

    let catalogue = match &args.catalogue {
        Some(path) => Catalogue::load(path)?,
        None => Catalogue::builtin(),
    };
    let planet = catalogue.get(&args.planet)?.clone();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    info!(seed, planet = %planet.name, "starting simulation");

    let log = EventLog::to_file(&args.log_file)
        .with_context(|| format!("opening journal {}", args.log_file.display()))?
        .with_echo(!args.watch);

    let mut mission = Mission::new(planet, seed)
        .with_log(log)
        .with_obstacle_chance(args.obstacle_chance);
    mission.announce();

    mission.add_vehicle(Vehicle::experiment_rover(
        "Curiosity",
        vec!["spectrometer".to_string(), "camera".to_string(), "drill".to_string()],
    ));
    mission.add_vehicle(Vehicle::drone("Ingenuity").with_battery(120.0));
    let _ = mission.change_altitude("Ingenuity", 10);

    let route: Vec<String> = args.route.chars().map(String::from).collect();
    let drone_route: Vec<String> = args.drone_route.chars().map(String::from).collect();

    let mut stdout = stdout();
    for hour in 0..args.steps as usize {
        // Les échecs sont journalisés et n'arrêtent pas la mission
        let _ = mission.drive("Curiosity", &route[hour % route.len()]);
        let _ = mission.fly("Ingenuity", &drone_route[hour % drone_route.len()]);

        if args.experiment_every > 0 && (hour as u32 + 1) % args.experiment_every == 0 {
            let _ = mission.perform_experiment("Curiosity");
        }

        mission.step();

        if args.watch {
            Display::render(&mut stdout, &mission)?;
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    print!("{}", mission.status_report());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&create_snapshot(&mission))?);
    }
    Ok(())
}
