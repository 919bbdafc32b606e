mod app;
mod engine;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use antcourse::config::{SimulationConfig, window_conf};
use antcourse::population::RandomPopulation;
use antcourse::simulation::{CourseMap, EpisodeReport, Runner};
use app::AntCourseApp;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for Ant Course.
#[derive(Parser, Debug)]
#[command(name = "antcourse", version, about = "Ants learning to run a course")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Course image, overriding the configuration.
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Number of generations to run.
    #[arg(short, long)]
    generations: Option<u32>,

    /// Number of ants per generation.
    #[arg(short, long)]
    population: Option<usize>,

    /// Seed for controller sampling.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without opening a window.
    #[arg(long)]
    headless: bool,

    /// Where to save the best controller found.
    #[arg(long)]
    champion: Option<PathBuf>,
}

/// Loads the simulation configuration from a TOML file or uses defaults.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SimulationConfig> {
    let Some(path) = path else {
        info!("No config file provided, using defaults");
        return Ok(SimulationConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

fn apply_overrides(config: &mut SimulationConfig, cli: &Cli) {
    if let Some(map) = &cli.map {
        config.map = map.clone();
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(champion) = &cli.champion {
        config.champion_path = Some(champion.clone());
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn summarize(reports: &[EpisodeReport]) {
    let best = reports
        .iter()
        .filter_map(|report| report.best().map(|(_, agent)| agent.fitness))
        .fold(0.0, f64::max);
    info!(
        generations = reports.len(),
        best_fitness = best,
        "Run finished"
    );
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    apply_overrides(&mut config, &cli);
    debug!(?config, "Effective config");

    let map = CourseMap::load_map(&config.map, config.boundary_color)
        .context("Failed to load course map")?;
    let runner = Runner::new(map, &config);
    let mut population = RandomPopulation::new(config.population_size, config.seed);
    if let Some(path) = &config.champion_path {
        population = population.with_champion_path(path.clone());
    }

    if cli.headless {
        let mut runner = runner;
        let reports = runner.run(&mut population, || false)?;
        summarize(&reports);
        return Ok(());
    }

    macroquad::Window::from_config(window_conf(), async move {
        let app = AntCourseApp::new(runner, population, &config);
        match app.run().await {
            Ok(reports) => summarize(&reports),
            Err(e) => error!("Simulation failed: {:#}", e),
        }
    });
    Ok(())
}
