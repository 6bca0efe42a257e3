use crate::art::ArtStore;
use crate::classify::{Classifier, Kind};
use crate::color::{kind_color, temperature_color};
use crate::model::TemperatureReading;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// How the renderer emits color: ANSI escape pairs around each colored span,
/// or plain text for pipes and color-averse terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Ansi,
    Plain,
}

/// User-facing color preference, set from the CLI flag or the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        }
    }

    pub const fn all() -> &'static [ColorChoice] {
        &[ColorChoice::Auto, ColorChoice::Always, ColorChoice::Never]
    }

    /// Pick the backend; `auto` colors only when the output is a terminal.
    pub fn resolve(self, is_tty: bool) -> ColorMode {
        match self {
            ColorChoice::Always => ColorMode::Ansi,
            ColorChoice::Never => ColorMode::Plain,
            ColorChoice::Auto => {
                if is_tty {
                    ColorMode::Ansi
                } else {
                    ColorMode::Plain
                }
            }
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ColorChoice {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(anyhow::anyhow!(
                "Unknown color choice '{value}'. Supported values: auto, always, never."
            )),
        }
    }
}

/// Writes classified weather reports to any writer, usually stdout.
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
    mode: ColorMode,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: ColorMode) -> Self {
        Self { out, mode }
    }

    /// Queue `text` in `color` with a trailing reset. A `None` color and
    /// plain mode both queue the bare text.
    fn span(&mut self, color: Option<Color>, text: &str) -> io::Result<()> {
        match (self.mode, color) {
            (ColorMode::Ansi, Some(color)) => {
                queue!(self.out, SetForegroundColor(color), Print(text), ResetColor)
            }
            _ => queue!(self.out, Print(text)),
        }
    }

    /// Write one report.
    ///
    /// With a picture available the art goes out in the kind color and the
    /// description/temperature lines in the temperature color. With no store,
    /// no entry for this kind, or no picture field, the whole report degrades
    /// to two plain uncolored lines. Never fails for rendering reasons, only
    /// for writer I/O.
    pub fn render(
        &mut self,
        kind: Kind,
        reading: TemperatureReading,
        description: &str,
        art: Option<&ArtStore>,
    ) -> io::Result<()> {
        let picture = art.and_then(|store| store.picture(kind.label()));

        let Some(picture) = picture else {
            queue!(
                self.out,
                Print(format!("Weather: {description}\n")),
                Print(format!("Temperature: {}\n", format_temperature(reading))),
            )?;
            return self.out.flush();
        };

        // An unrecognized unit selects no temperature color; those lines
        // then go out uncolored while the art keeps its kind color.
        let temp_color = reading
            .unit
            .map(|unit| temperature_color(reading.value, unit));

        self.span(Some(kind_color(kind)), &format!("{picture}\n"))?;
        queue!(self.out, Print("\n"))?;
        self.span(temp_color, description)?;
        queue!(self.out, Print("\nTemperature: "))?;
        self.span(temp_color, &format_temperature(reading))?;
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }
}

fn format_temperature(reading: TemperatureReading) -> String {
    match reading.unit {
        Some(unit) => format!("{:.0} {unit}", reading.value),
        None => format!("{:.0}", reading.value),
    }
}

/// The whole pipeline in one call: classify `description`, look up its art,
/// pick colors, and write the report to `out`. Returns the classified kind
/// so callers can log it.
pub fn render_report<W: Write>(
    out: W,
    classifier: &Classifier,
    art: Option<&ArtStore>,
    description: &str,
    reading: TemperatureReading,
    mode: ColorMode,
) -> io::Result<Kind> {
    let kind = classifier.classify(description);
    tracing::debug!(kind = %kind.label(), "classified forecast");
    Renderer::new(out, mode).render(kind, reading, description, art)?;
    Ok(kind)
}
