// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Haptic Patterns CLI
//!
//! Compiles buzz and beat patterns and plays them on the simulated haptic
//! device.
//!
//! # Usage
//!
//! ```bash
//! # Play a buzz and a beat together over 1.5 seconds
//! haptic-patterns play -e 'buzz:---___----' -e 'beat:_|___|____' -d 1.5s
//!
//! # Print the compiled plan as JSON
//! haptic-patterns compile -e 'beat:|_|_|___' -d 250ms --format json
//!
//! # Check a single pattern
//! haptic-patterns check buzz '--__--' --intensity 0.5
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use haptic_patterns::sink::{EngineSink, SimulatedDevice};
use haptic_patterns::{
    Config, PatternEvent, PatternKind, PlaybackDuration, PlaybackPlan, PlaybackPlanner, Result,
    VERSION,
};

/// Haptic pattern compiler and player
#[derive(Parser)]
#[command(name = "haptic-patterns")]
#[command(author = "Haptic Patterns Contributors")]
#[command(version = VERSION)]
#[command(about = "Compile and play textual haptic patterns")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "HAPTIC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile events and play them on the simulated device
    Play {
        /// Event spec KIND:PATTERN[:INTENSITY[:SHARPNESS]] (repeatable)
        #[arg(short, long = "event", required = true)]
        events: Vec<String>,

        /// Playback duration (e.g. 1.5s, 250ms, 2)
        #[arg(short, long)]
        duration: Option<PlaybackDuration>,
    },

    /// Compile events and print the plan
    Compile {
        /// Event spec KIND:PATTERN[:INTENSITY[:SHARPNESS]] (repeatable)
        #[arg(short, long = "event", required = true)]
        events: Vec<String>,

        /// Playback duration (e.g. 1.5s, 250ms, 2)
        #[arg(short, long)]
        duration: Option<PlaybackDuration>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Validate a single pattern
    Check {
        /// Pattern kind (buzz or beat)
        kind: PatternKind,

        /// Pattern string
        #[arg(allow_hyphen_values = true)]
        pattern: String,

        /// Intensity in [0, 1]
        #[arg(long)]
        intensity: Option<f32>,

        /// Sharpness in [0, 1]
        #[arg(long)]
        sharpness: Option<f32>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    match cli.command {
        Commands::Play { events, duration } => {
            config.validate()?;

            let events = parse_events(&events, &config)?;
            let duration = duration.unwrap_or_else(|| default_duration(&config));

            let sink = Arc::new(EngineSink::new(
                "simulated",
                SimulatedDevice::from_config(&config.sink),
                config.sink.idle_timeout(),
            ));
            let planner = PlaybackPlanner::new(sink.clone());

            info!(
                version = VERSION,
                events = events.len(),
                duration = %duration,
                "Starting playback"
            );

            match planner.play(&events, duration) {
                Ok(plan) => {
                    print_summary(&plan);
                    sink.release();
                }
                Err(e) => {
                    error!(error = %e, "Playback failed");
                    eprintln!("Playback failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Compile {
            events,
            duration,
            format,
        } => {
            let events = parse_events(&events, &config)?;
            let duration = duration.unwrap_or_else(|| default_duration(&config));

            // Compiling never touches the device, but the planner needs a sink
            let device = SimulatedDevice::from_config(&config.sink);
            let planner = PlaybackPlanner::new(Arc::new(EngineSink::new(
                "simulated",
                device,
                config.sink.idle_timeout(),
            )));

            let plan = planner.compile(&events, duration)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&plan)?),
            }
        }

        Commands::Check {
            kind,
            pattern,
            intensity,
            sharpness,
        } => {
            let intensity = intensity.unwrap_or(config.playback.default_intensity);
            let sharpness = sharpness.unwrap_or(config.playback.default_sharpness);

            match PatternEvent::new(kind, &pattern, intensity, sharpness) {
                Ok(event) => {
                    println!("{} pattern is valid ({} steps)", event.kind(), event.len());
                }
                Err(e) => {
                    eprintln!("Invalid pattern: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => {
            // Validate configuration
            match config.validate() {
                Ok(()) => {
                    println!("Configuration is valid");
                }
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn parse_events(specs: &[String], config: &Config) -> Result<Vec<PatternEvent>> {
    specs
        .iter()
        .map(|spec| {
            PatternEvent::parse_spec(
                spec,
                config.playback.default_intensity,
                config.playback.default_sharpness,
            )
        })
        .collect()
}

fn default_duration(config: &Config) -> PlaybackDuration {
    PlaybackDuration::milliseconds(config.playback.default_duration_ms as f64)
}

fn print_summary(plan: &PlaybackPlan) {
    println!(
        "Played {} segments over {:.3}s ({} vibrations, {} pulses)",
        plan.len(),
        plan.duration_secs,
        plan.continuous().count(),
        plan.pulses().count()
    );
    for segment in plan.ordered() {
        if segment.is_pulse() {
            println!("  pulse   at {:>8.3}s", segment.start_secs());
        } else {
            println!(
                "  vibrate at {:>8.3}s for {:.3}s",
                segment.start_secs(),
                segment.duration_secs()
            );
        }
    }
}
