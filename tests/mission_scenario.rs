use std::fs;

use exoplan::{ActionError, Catalogue, EventLog, Mission, Vehicle};

fn mars_mission(seed: u64) -> Mission {
    let mars = Catalogue::builtin().get("Mars").unwrap().clone();
    Mission::new(mars, seed)
}

#[test]
fn rover_walks_north_then_east_into_the_crater() {
    let mut mission = mars_mission(1);
    mission.add_vehicle(Vehicle::rover("Pathfinder"));

    assert_eq!(mission.drive("Pathfinder", "N"), Ok((0, 1)));
    assert_eq!(mission.vehicle("Pathfinder").unwrap().battery, 98.0);

    for _ in 0..4 {
        mission.drive("Pathfinder", "N").unwrap();
    }
    assert_eq!(mission.vehicle("Pathfinder").unwrap().position, (0, 5));

    for _ in 0..4 {
        mission.drive("Pathfinder", "E").unwrap();
    }
    assert_eq!(
        mission.drive("Pathfinder", "E"),
        Err(ActionError::BlockedByObstacle((5, 5)))
    );

    let rover = mission.vehicle("Pathfinder").unwrap();
    assert_eq!(rover.position, (4, 5));
    assert_eq!(rover.battery, 100.0 - 9.0 * 2.0);
    assert_eq!(
        mission.log().last(),
        Some("Pathfinder cannot move: blocked by obstacle at (5, 5)")
    );
}

#[test]
fn reference_demo_writes_the_journal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mission_log.txt");

    let mut mission = mars_mission(9).with_log(EventLog::to_file(&path).unwrap());
    mission.announce();
    mission.add_vehicle(Vehicle::rover("Pathfinder").with_instruments(vec!["camera".into()]));
    mission.add_vehicle(Vehicle::drone("SkyScout").with_battery(120.0));
    mission.drive("Pathfinder", "N").unwrap();
    mission.fly("SkyScout", "E").unwrap();
    mission.update_time(3);

    let journal = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = journal.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Planet: Mars",
            "Time: 0h",
            "Pathfinder added to mission on Mars",
            "SkyScout added to mission on Mars",
            "Pathfinder moved N to (0, 1). Battery left: 98.0",
            "SkyScout flew E to (1, 0) at altitude 0. Battery: 118.0",
            "Time on Mars is now 3h",
        ]
    );

    let report = mission.status_report();
    assert!(report.contains("  - SkyScout: position=(1, 0), battery=118.0, altitude=0"));
}

#[test]
fn a_full_day_keeps_batteries_in_range() {
    let mut mission = mars_mission(2024).with_obstacle_chance(0.5);
    mission.add_vehicle(Vehicle::rover("Spirit").with_battery(40.0));
    mission.add_vehicle(Vehicle::drone("SkyScout").with_battery(120.0));

    for hour in 0..48 {
        let dir = ["N", "E", "S", "W"][hour % 4];
        let _ = mission.drive("Spirit", dir);
        let _ = mission.fly("SkyScout", dir);
        mission.step();
    }

    assert_eq!(mission.elapsed_hours(), 48);
    assert_eq!(mission.planet().planet_time, 0);
    for vehicle in mission.vehicles() {
        assert!(vehicle.battery >= 0.0);
        assert!(mission.planet().in_bounds(vehicle.position));
    }
    assert!(mission.vehicle("Spirit").unwrap().battery <= 100.0);
}

#[test]
fn planet_state_survives_the_mission() {
    let mut catalogue = Catalogue::builtin();
    let mut mission = Mission::new(catalogue.get("Moon").unwrap().clone(), 77);
    mission.update_time(30);
    for _ in 0..5 {
        mission.random_obstacle(1.0);
    }
    let discovered = mission.planet().obstacles.clone();

    catalogue.upsert(mission.into_planet());
    let moon = catalogue.get("Moon").unwrap();
    assert_eq!(moon.planet_time, 6);
    assert_eq!(moon.obstacles, discovered);
    assert!(moon.obstacles.len() > 2);
}
