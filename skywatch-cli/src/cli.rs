use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use skywatch_core::{Config, UnitGroup, VisualCrossingClient};

use crate::session::{Session, Startup};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skywatch", version, about = "Hourly weather around now, in your terminal")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Location to look up right away, e.g. "london" or "50.45,30.52".
    /// Without it the session starts from your approximate (IP-based) location.
    pub location: Option<String>,

    /// Unit system for this run ("metric", "us" or "uk"), overriding the configured one.
    #[arg(long)]
    pub units: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key and preferred unit system.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => watch(self.location, self.units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("Visual Crossing API key:")
        .with_help_message("Get one at https://www.visualcrossing.com/weather-api")
        .prompt()
        .context("API key prompt aborted")?;

    let units = Select::new("Unit system:", UnitGroup::all().to_vec())
        .prompt()
        .context("Unit system prompt aborted")?;

    config.api_key = api_key.trim().to_string();
    config.units = units;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn watch(location: Option<String>, units: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let units = match units {
        Some(s) => UnitGroup::try_from(s.as_str())?,
        None => config.units,
    };

    let startup = startup_plan(&config, location);
    if startup == Startup::None {
        println!(
            "No API key configured. Run `skywatch configure` to add your Visual Crossing key."
        );
    }

    let key = config.credential().unwrap_or_default();
    let client = VisualCrossingClient::new(key.to_string(), units);
    let mut session = Session::new(Box::new(client), units);
    session.run(startup).await
}

/// Decide how the session opens. Without a usable key the automatic fetch
/// is suppressed (it could only 401) and a hint printed instead; the menu
/// stays available and a manual search fails into the generic status
/// message like any other fetch error. With a key, an explicit location
/// argument is fetched right away, otherwise geolocation is attempted
/// once.
fn startup_plan(config: &Config, location: Option<String>) -> Startup {
    if config.credential().is_none() {
        return Startup::None;
    }

    match location.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => Startup::Query(query.to_string()),
        _ => Startup::Locate,
    }
}
