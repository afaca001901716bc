use std::io::{Result, Write};

use crossterm::{
    QueueableCommand,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::mission::Mission;
use crate::planet::Planet;
use crate::vehicle::Vehicle;

pub struct Display;

impl Display {
    /// Draws the planet grid with north at the top, then the recent journal.
    pub fn render<W: Write>(out: &mut W, mission: &Mission) -> Result<()> {
        let planet = mission.planet();
        let ground = planet_color(&planet.color);

        out.queue(Print(format!(
            "\n=== {} ({}) | {}h ===\n",
            planet.name, planet.terrain_type, planet.planet_time
        )))?;
        out.queue(Print(
            "Légende: [R]over | [X]périence | [D]rone | [#]Obstacle | [.]Sol\n\n",
        ))?;

        for y in (0..planet.height()).rev() {
            for x in 0..planet.width() {
                match cell_glyph(planet, mission.vehicles(), (x, y)) {
                    "#" => {
                        out.queue(SetForegroundColor(Color::Black))?;
                        out.queue(SetBackgroundColor(Color::DarkGrey))?;
                        out.queue(Print("#"))?;
                    }
                    "." => {
                        out.queue(SetForegroundColor(ground))?;
                        out.queue(Print("."))?;
                    }
                    vehicle => {
                        out.queue(SetForegroundColor(Color::White))?;
                        out.queue(SetBackgroundColor(Color::DarkBlue))?;
                        out.queue(Print(vehicle))?;
                    }
                }
                out.queue(ResetColor)?;
            }
            out.queue(Print("\n"))?;
        }

        out.queue(Print("\n"))?;
        for line in mission.log().recent() {
            out.queue(SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(format!("  {}\n", line)))?;
        }
        out.queue(ResetColor)?;
        out.flush()
    }
}

fn glyph(vehicle: &Vehicle) -> &'static str {
    match vehicle.kind() {
        "drone" => "D",
        "experiment rover" => "X",
        _ => "R",
    }
}

/// Terminal colour for a catalogue colour label.
pub fn planet_color(label: &str) -> Color {
    match label {
        "red" => Color::Red,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        "orange" => Color::DarkYellow,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "green" => Color::Green,
        _ => Color::White,
    }
}

/// Cell glyph the renderer uses for `pos`, without colour codes.
pub fn cell_glyph(planet: &Planet, vehicles: &[Vehicle], pos: (i32, i32)) -> &'static str {
    match vehicles.iter().find(|v| v.position == pos) {
        Some(vehicle) => glyph(vehicle),
        None if planet.is_obstacle(pos) => "#",
        None => ".",
    }
}
