// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider AlgoScene project*
//!
//! Replay a command script without a window: every step is applied to a scene
//! and rendered into a recording surface
//!

use algoscene_core::Script;
use algoscene_renderer::frontends::recorder::{RecordingSurface, monospace_measure};
use algoscene_renderer::{DrawItem, Engine, SceneConfig};
use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;

#[macro_use]
extern crate log;
extern crate simplelog;

/// Replay entry point
fn main() {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("algoscene")
        .add_filter_allow_str("scene_replay")
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]) {
        eprintln!("Error setting up logging: {error}");
    }

    let config = match &args.config {
        Some(path) => match SceneConfig::load(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error loading config: {error}");
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    let script = match Script::load(&args.script) {
        Ok(script) => script,
        Err(error) => {
            eprintln!("Error loading script: {error}");
            std::process::exit(1);
        }
    };

    let mut engine = Engine::with_config(config, monospace_measure);
    let mut surface = RecordingSurface::new(engine.config().surface_size);
    let mut frame_index = 0;

    for (step_index, step) in script.steps().iter().enumerate() {
        for (command_index, command) in step.iter().enumerate() {
            if let Err(error) = engine.apply(command.clone()) {
                eprintln!(
                    "Error at step {step_index}, command {command_index} ({}): {error}",
                    command.name()
                );
                std::process::exit(1);
            }
        }
        engine.set_status(format!("Step {}/{}", step_index + 1, script.step_count()));
        for _ in 0..args.frames_per_step.max(1) {
            engine.render_frame(frame_index, &mut surface);
            frame_index += 1;
        }
        info!(
            "step {step_index}: {} objects, {} edges, {} items drawn",
            engine.object_count(),
            engine.edge_count(),
            surface.items.len()
        );
    }

    if args.json {
        match serde_json::to_string_pretty(&surface.items) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("Error serialising frame: {error}");
                std::process::exit(1);
            }
        }
    } else {
        print_summary(&surface.items);
    }
}

/// One line per item of the final frame
fn print_summary(items: &[DrawItem]) {
    for item in items {
        match item {
            DrawItem::Object(object) => println!(
                "object {} {:?} at ({}, {}){}",
                object.handle,
                object.shape,
                object.centre.x,
                object.centre.y,
                if object.highlight.is_some() {
                    " [highlighted]"
                } else {
                    ""
                }
            ),
            DrawItem::Edge(edge) => println!("edge {} -> {}", edge.from, edge.to),
            DrawItem::Status(status) => println!("status \"{}\"", status.text),
        }
    }
}

/// Replay CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Replay an AlgoScene command script headlessly",
    after_help = "Prints the final frame, or the first command that fails"
)]
pub struct Cli {
    /// Path to the JSON command script
    pub script: PathBuf,

    /// Path to a JSON scene config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How many frames to render after each step
    #[arg(long, default_value_t = 1)]
    pub frames_per_step: u64,

    /// Print the final frame as JSON
    #[arg(long)]
    pub json: bool,

    /// Log at debug level
    #[arg(long, short)]
    pub verbose: bool,
}
