use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;

use skycast_core::{
    Config, DashboardView, FetchController, IconTheme, Query, Tab, UnitSystem,
    VisualCrossingProvider,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for UnitSystem {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Metric => UnitSystem::Metric,
            UnitsArg::Imperial => UnitSystem::Imperial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Today,
    Week,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Today => Tab::Today,
            TabArg::Week => Tab::Week,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Visual Crossing API key.
    Configure,

    /// Show the weather dashboard for a city.
    Show {
        /// City or location name.
        city: String,

        /// Measurement system for temperature and wind speed.
        #[arg(long, value_enum, default_value_t = UnitsArg::Metric)]
        units: UnitsArg,

        /// Forecast tab to render.
        #[arg(long, value_enum, default_value_t = TabArg::Today)]
        tab: TabArg,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, tab } => show(&city, units.into(), tab.into()).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("Visual Crossing API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, units: UnitSystem, tab: Tab) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = Arc::new(VisualCrossingProvider::new(config.resolve_api_key()));

    let Some(query) = Query::new(city, units) else {
        anyhow::bail!("City must not be empty");
    };

    let mut controller = FetchController::new(provider, query);
    controller.refresh().await;

    let theme = IconTheme::builtin();
    let view = DashboardView::build(
        controller.state(),
        tab,
        units,
        &theme,
        Local::now().naive_local(),
        controller.query().city(),
    );

    // Fetch failure is a dashboard state, not a process error.
    print!("{}", render::render_dashboard(&view, tab));
    Ok(())
}
