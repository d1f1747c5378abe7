use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use skeleton_interact_core::{
    FrameDispatcher, InteractConfig, InteractionEvent, SkeletonFrame,
};
use tracing_subscriber::EnvFilter;

mod cue;
mod sim;

fn main() -> skeleton_interact_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            ticks,
            rate,
            config,
        } => run_simulate(ticks, rate, config.as_deref()),
        Commands::Replay { input, config } => run_replay(&input, config.as_deref()),
    }
}

fn run_simulate(ticks: u64, rate: u32, config: Option<&Path>) -> skeleton_interact_core::Result<()> {
    tracing::info!(ticks, rate, "starting scripted simulation");

    let mut dispatcher = build_dispatcher(config)?;
    let source = sim::ScriptedSource::new();
    let interval = (rate > 0).then(|| Duration::from_millis(1000 / u64::from(rate)));

    let mut event_count = 0usize;
    for tick in 0..ticks {
        let bodies = [source.frame_at(tick)];
        let snapshot = dispatcher.dispatch(&bodies);
        event_count += snapshot.events.len();
        log_tick(tick, snapshot.events.as_slice());
        if let Some(interval) = interval {
            std::thread::sleep(interval);
        }
    }

    let snapshot = dispatcher.latest();
    tracing::info!(
        ticks,
        events = event_count,
        distance = snapshot.distances.first().copied().unwrap_or_default(),
        angle = snapshot.volumes.first().map(|v| v.angle_degrees).unwrap_or_default(),
        "simulation finished"
    );
    Ok(())
}

fn run_replay(input: &PathBuf, config: Option<&Path>) -> skeleton_interact_core::Result<()> {
    tracing::info!(?input, "replaying recorded frames");

    let text = std::fs::read_to_string(input)?;
    let frames: Vec<SkeletonFrame> = serde_json::from_str(&text)?;
    let mut dispatcher = build_dispatcher(config)?;

    let mut event_count = 0usize;
    for (tick, frame) in frames.iter().enumerate() {
        let snapshot = dispatcher.dispatch(std::slice::from_ref(frame));
        event_count += snapshot.events.len();
        log_tick(tick as u64, snapshot.events.as_slice());
    }

    tracing::info!(
        frames = frames.len(),
        events = event_count,
        "replay finished"
    );
    Ok(())
}

/// Builds the detector rig from a JSON config file, or the default live rig
/// when none is given, and wires the MIDI cue sink onto it.
fn build_dispatcher(config: Option<&Path>) -> skeleton_interact_core::Result<FrameDispatcher> {
    let config = match config {
        Some(path) => InteractConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => InteractConfig::live_defaults(),
    };
    let mut dispatcher = FrameDispatcher::from_config(&config)?;
    dispatcher.add_sink(Box::new(cue::MidiCueSink::spawn()));
    Ok(dispatcher)
}

fn log_tick(tick: u64, events: &[InteractionEvent]) {
    for event in events {
        match event {
            InteractionEvent::RegionEntered { button, joint } => {
                tracing::info!(tick, button, ?joint, "button entered");
            }
            InteractionEvent::ProximityEntered {
                pair,
                joint,
                distance,
            } => {
                tracing::info!(tick, pair, ?joint, distance, "joints intersected");
            }
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Skeleton interaction detector rig", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the rig from the built-in scripted skeleton source.
    Simulate {
        /// Number of sensor ticks to simulate.
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,
        /// Tick rate in Hz; 0 runs unpaced.
        #[arg(short, long, default_value_t = 30)]
        rate: u32,
        /// Optional rig configuration file; defaults to the live rig.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Re-run a recorded frame stream, one body per tick.
    Replay {
        /// Path to a JSON recording of skeleton frames.
        input: PathBuf,
        /// Optional rig configuration file; defaults to the live rig.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
