use std::fmt;
use std::str::FromStr;

/// Temperature unit tag. Exactly two units exist; unit tags from the wire
/// that match neither are kept out of the model (see [`TemperatureReading`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempUnit {
    Fahrenheit,
    Celsius,
}

impl TempUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempUnit::Fahrenheit => "F",
            TempUnit::Celsius => "C",
        }
    }

    pub const fn all() -> &'static [TempUnit] {
        &[TempUnit::Fahrenheit, TempUnit::Celsius]
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unit tags that are neither Fahrenheit nor Celsius.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized temperature unit '{0}', expected \"F\" or \"C\"")]
pub struct ParseUnitError(pub String);

impl FromStr for TempUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TempUnit::Fahrenheit),
            "c" | "celsius" => Ok(TempUnit::Celsius),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

/// A temperature value plus its unit tag.
///
/// `unit` is `None` when the upstream feed tagged the value with something
/// other than the two recognized units. Such readings still render, but
/// uncolored and without a unit suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub value: f64,
    pub unit: Option<TempUnit>,
}

impl TemperatureReading {
    pub fn new(value: f64, unit: Option<TempUnit>) -> Self {
        Self { value, unit }
    }
}

/// A latitude/longitude pair, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The forecast period nearest to now, as reported by the forecast
/// collaborator.
#[derive(Debug, Clone)]
pub struct ForecastSnapshot {
    /// Human name of the period, e.g. "This Afternoon".
    pub period: String,
    pub temperature: TemperatureReading,
    /// Short free-text forecast, e.g. "Slight Chance Rain Showers".
    pub short_forecast: String,
}
