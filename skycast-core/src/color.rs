use crossterm::style::Color;

use crate::classify::Kind;
use crate::model::TempUnit;

/// Color for the ASCII art, keyed on the classified kind.
///
/// Grey covers everything overcast or murky; precipitation is blue-ish,
/// severe weather pops in magenta.
pub fn kind_color(kind: Kind) -> Color {
    match kind {
        Kind::Sunny => Color::Yellow,
        Kind::Cloudy | Kind::MostlyCloudy | Kind::PartlyCloudy => Color::DarkGrey,
        Kind::Rainy | Kind::LightRain => Color::Blue,
        Kind::Snowy => Color::Cyan,
        Kind::Foggy => Color::DarkGrey,
        Kind::Lightning | Kind::Hail => Color::Magenta,
    }
}

/// Color for the temperature line, banded cold-to-hot per unit.
pub fn temperature_color(value: f64, unit: TempUnit) -> Color {
    let (freezing, cool, mild, warm) = match unit {
        TempUnit::Fahrenheit => (32.0, 60.0, 80.0, 90.0),
        TempUnit::Celsius => (0.0, 15.0, 27.0, 32.0),
    };

    if value <= freezing {
        Color::Blue
    } else if value <= cool {
        Color::Cyan
    } else if value <= mild {
        Color::Green
    } else if value <= warm {
        Color::Yellow
    } else {
        Color::Red
    }
}
