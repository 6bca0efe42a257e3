use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skycast_core::art::{ArtStore, candidate_paths};
use skycast_core::classify::Classifier;
use skycast_core::config::Config;
use skycast_core::model::{TempUnit, TemperatureReading};
use skycast_core::provider::nws::NwsForecast;
use skycast_core::provider::openmeteo::OpenMeteoGeocoder;
use skycast_core::provider::{ForecastSource, Geocoder};
use skycast_core::render::{ColorChoice, ColorMode, render_report};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

const SEPARATOR: &str = "---------------------------------------------------";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Weather in your terminal, classified and drawn"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch today's forecast for a city and draw it.
    City {
        /// Name of the city to get weather information for.
        #[arg(short, long)]
        name: String,

        /// Color output: "auto", "always" or "never". Overrides the config file.
        #[arg(long)]
        color: Option<String>,
    },

    /// Classify a forecast description and draw it, no network involved.
    Render {
        /// Forecast text, e.g. "partly cloudy with a slight chance of showers".
        description: String,

        /// Temperature value.
        #[arg(long, default_value_t = 0.0)]
        temperature: f64,

        /// Temperature unit, "F" or "C".
        #[arg(long, default_value = "F")]
        unit: String,

        /// Color output: "auto", "always" or "never". Overrides the config file.
        #[arg(long)]
        color: Option<String>,
    },

    /// Interactively set the color preference and art directory.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::City { name, color } => city(name, color).await,
            Command::Render {
                description,
                temperature,
                unit,
                color,
            } => render(description, temperature, unit, color),
            Command::Configure => configure(),
        }
    }
}

async fn city(name: String, color: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let mode = resolve_color(color, &config)?;

    println!("Fetching your weather... {name}");
    println!("{SEPARATOR}");

    let geocoder = OpenMeteoGeocoder::new()?;
    let location = geocoder
        .locate(&name)
        .await?
        .ok_or_else(|| anyhow!("No results found for city: {name}"))?;

    let source = NwsForecast::new()?;
    let snapshot = source.forecast(location).await?;
    tracing::debug!(period = %snapshot.period, "rendering forecast");

    let classifier = Classifier::standard()?;
    let art = ArtStore::resolve(&candidate_paths(config.art_dir.as_deref()));
    render_report(
        io::stdout().lock(),
        &classifier,
        art.as_ref(),
        &snapshot.short_forecast,
        snapshot.temperature,
        mode,
    )?;

    println!("{SEPARATOR}");
    Ok(())
}

fn render(
    description: String,
    temperature: f64,
    unit: String,
    color: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let mode = resolve_color(color, &config)?;
    let unit: TempUnit = unit.parse()?;

    let classifier = Classifier::standard()?;
    let art = ArtStore::resolve(&candidate_paths(config.art_dir.as_deref()));
    render_report(
        io::stdout().lock(),
        &classifier,
        art.as_ref(),
        &description,
        TemperatureReading::new(temperature, Some(unit)),
        mode,
    )?;

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let options: Vec<&str> = ColorChoice::all().iter().map(|c| c.as_str()).collect();
    let current = ColorChoice::all()
        .iter()
        .position(|c| *c == config.color)
        .unwrap_or(0);
    let picked = Select::new("Color output:", options)
        .with_starting_cursor(current)
        .prompt()
        .context("Color selection aborted")?;
    config.color = ColorChoice::try_from(picked)?;

    let initial = config
        .art_dir
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let art_dir = Text::new("Art directory (leave empty for the bundled designs):")
        .with_initial_value(&initial)
        .prompt()
        .context("Art directory prompt aborted")?;
    config.art_dir = if art_dir.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(art_dir.trim()))
    };

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

/// The CLI flag wins over the config file; `auto` then checks whether stdout
/// is a terminal.
fn resolve_color(flag: Option<String>, config: &Config) -> Result<ColorMode> {
    let choice = match flag {
        Some(s) => ColorChoice::try_from(s.as_str())?,
        None => config.color,
    };
    Ok(choice.resolve(io::stdout().is_terminal()))
}
