//! The interactive session: search, refresh, and geolocation around a
//! single weather source.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skywatch_core::{UnitGroup, WeatherSource};

use crate::geo;
use crate::render;

const FETCH_FAILED_MESSAGE: &str =
    "Couldn't fetch weather. Check the location text and your API key, then try again.";
const GEO_HINT_MESSAGE: &str = "Couldn't determine your location. Enter a location to search.";

/// How the session opens before the first prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Fetch this location right away.
    Query(String),
    /// Try geolocation once, with the hint shown if it fails.
    Locate,
    /// No automatic fetch; the user starts from the menu.
    None,
}

/// Menu actions. Refresh is only offered once a query has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Refresh,
    Locate,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::Search => "Search for a location",
            Action::Refresh => "Refresh",
            Action::Locate => "Use my location",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Owns all session state: the weather source and the last successful
/// query. Nothing else survives between fetches; a failed fetch leaves the
/// previous report untouched in the scrollback.
pub struct Session {
    source: Box<dyn WeatherSource>,
    units: UnitGroup,
    last_query: Option<String>,
}

impl Session {
    pub fn new(source: Box<dyn WeatherSource>, units: UnitGroup) -> Self {
        Self { source, units, last_query: None }
    }

    /// Run the session until the user quits.
    pub async fn run(&mut self, startup: Startup) -> Result<()> {
        self.startup(startup).await;

        loop {
            match self.prompt_action()? {
                Some(Action::Search) => {
                    if let Some(query) = self.prompt_location()? {
                        self.load(&query, false).await;
                    }
                }
                Some(Action::Refresh) => self.refresh().await,
                Some(Action::Locate) => self.locate_and_load(false).await,
                Some(Action::Quit) | None => break,
            }
        }

        Ok(())
    }

    async fn startup(&mut self, startup: Startup) {
        match startup {
            Startup::Query(location) => self.load(&location, false).await,
            Startup::Locate => self.locate_and_load(true).await,
            Startup::None => {}
        }
    }

    /// Re-issue the last successful query, without the fetching status
    /// line a manual search prints.
    async fn refresh(&mut self) {
        if let Some(query) = self.last_query.clone() {
            self.load(&query, true).await;
        }
    }

    async fn load(&mut self, query: &str, silent: bool) {
        if !silent {
            println!("Fetching weather…");
        }

        match self.source.fetch_timeline(query).await {
            Ok(payload) => {
                self.last_query = Some(query.to_string());
                print!("\n{}", render::render_report(&payload, self.units, query));
            }
            Err(err) => {
                // Every fetch-path failure collapses into one generic
                // status line; the details only go to the log.
                tracing::error!(error = %err, query, "weather fetch failed");
                println!("{FETCH_FAILED_MESSAGE}");
            }
        }
    }

    async fn locate_and_load(&mut self, hint_on_failure: bool) {
        println!("Requesting your location…");

        match geo::locate().await {
            Ok(coords) => {
                println!("Using your approximate location: {}", coords.display());
                self.load(&coords.as_query(), true).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                if hint_on_failure {
                    println!("{GEO_HINT_MESSAGE}");
                }
            }
        }
    }

    fn prompt_action(&self) -> Result<Option<Action>> {
        let mut actions = vec![Action::Search];
        if self.last_query.is_some() {
            actions.push(Action::Refresh);
        }
        actions.push(Action::Locate);
        actions.push(Action::Quit);

        match Select::new("What next?", actions).prompt() {
            Ok(action) => Ok(Some(action)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn prompt_location(&self) -> Result<Option<String>> {
        let prompt = Text::new("Location:")
            .with_help_message("City name, address, or \"lat,lon\"")
            .prompt();

        match prompt {
            Ok(raw) => {
                let query = raw.trim();
                if query.is_empty() { Ok(None) } else { Ok(Some(query.to_string())) }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
