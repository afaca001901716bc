// Mission de démonstration
// Rejoue la séquence de référence : un rover et un drone déposés sur une
// planète, un déplacement chacun, trois heures qui passent, puis le rapport.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;

use exoplan::events::{init_diagnostics, DEFAULT_LOG_FILE};
use exoplan::{create_snapshot, Catalogue, EventLog, Mission, Vehicle};

#[derive(Parser, Debug)]
#[command(name = "demo", about = "Scripted rover and drone landing")]
struct Args {
    /// Planet to land on
    #[arg(long, default_value = "Mars")]
    planet: String,

    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Journal file, appended to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// JSON planet catalogue replacing the built-in one
    #[arg(long)]
    catalogue: Option<PathBuf>,

    /// Print a JSON snapshot after the status report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_diagnostics();
    let args = Args::parse();

    let catalogue = match &args.catalogue {
        Some(path) => Catalogue::load(path)?,
        None => Catalogue::builtin(),
    };
    let planet = catalogue.get(&args.planet)?.clone();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let log = EventLog::to_file(&args.log_file)
        .with_context(|| format!("opening journal {}", args.log_file.display()))?
        .with_echo(true);

    let mut mission = Mission::new(planet, seed).with_log(log);
    mission.announce();

    mission.add_vehicle(Vehicle::rover("Pathfinder").with_instruments(vec!["camera".to_string()]));
    mission.add_vehicle(Vehicle::drone("SkyScout").with_battery(120.0));

    // Les échecs sont déjà journalisés par la mission
    let _ = mission.drive("Pathfinder", "N");
    let _ = mission.fly("SkyScout", "E");

    mission.update_time(3);
    print!("{}", mission.status_report());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&create_snapshot(&mission))?);
    }

    Ok(())
}
