// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The AlgoScene desktop viewer: steps through a command script one step at a
//! time
//!

use algoscene_core::Script;
use algoscene_renderer::SceneConfig;
use algoscene_renderer::frontends::desktop_egui::SceneEgui;
use clap::Parser;
use eframe::egui::{CentralPanel, Color32, Context, TopBottomPanel, ViewportBuilder};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;

#[macro_use]
extern crate log;
extern crate simplelog;

/// The viewer application
struct ViewerApp {
    scene: SceneEgui,
    script: Script,
    config: SceneConfig,

    /// The index of the next step to apply
    next_step: usize,

    /// Drives the highlight pulse
    frame_index: u64,

    /// The error that stopped the script (if any)
    error: Option<String>,
}

impl ViewerApp {
    fn new(ctx: &Context, script: Script, config: SceneConfig) -> Self {
        Self {
            scene: SceneEgui::with_config(ctx, config.clone()),
            script,
            config,
            next_step: 0,
            frame_index: 0,
            error: None,
        }
    }

    fn is_finished(&self) -> bool {
        self.error.is_some() || self.next_step >= self.script.step_count()
    }

    /// Apply the next step of the script
    fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        let step_index = self.next_step;
        for (command_index, command) in self.script.steps()[step_index].iter().enumerate() {
            if let Err(error) = self.scene.apply(command.clone()) {
                let message = format!(
                    "Error at step {step_index}, command {command_index} ({}): {error}",
                    command.name()
                );
                error!("{message}");
                self.error = Some(message);
                return;
            }
        }
        self.next_step += 1;
        self.scene.engine_mut().set_status(format!(
            "Step {}/{}",
            self.next_step,
            self.script.step_count()
        ));
        debug!("applied step {step_index}");
    }

    /// Start the script again from an empty scene
    fn reset(&mut self, ctx: &Context) {
        info!("Resetting the scene");
        self.scene = SceneEgui::with_config(ctx, self.config.clone());
        self.next_step = 0;
        self.error = None;
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.is_finished(), eframe::egui::Button::new("Step"))
                    .clicked()
                {
                    self.step();
                }
                if ui.button("Reset").clicked() {
                    self.reset(ctx);
                }
                ui.label(format!(
                    "{}/{} steps",
                    self.next_step,
                    self.script.step_count()
                ));
                if let Some(error) = &self.error {
                    ui.colored_label(Color32::RED, error);
                }
            });
        });

        CentralPanel::default().show(ctx, |ui| {
            self.scene.draw(ui, self.frame_index);
        });

        // Keep the highlight pulsing
        self.frame_index = self.frame_index.wrapping_add(1);
        ctx.request_repaint();
    }
}

/// Viewer CLI args using [clap]
#[derive(Parser, Debug)]
#[command(version, about = "Step through an AlgoScene command script")]
pub struct Cli {
    /// Path to the JSON command script
    pub script: PathBuf,

    /// Path to a JSON scene config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Entry point for the native desktop viewer
fn main() -> Result<(), eframe::Error> {
    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("algoscene")
        .add_filter_allow_str("scene_viewer")
        .build();

    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Error setting up logging: {error}");
    }

    let args = Cli::parse();
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

    // Setup the eframe options for a native application
    let size = config.surface_size;
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([size.x as f32, size.y as f32 + 40.0]),
        ..Default::default()
    };

    info!("Launching viewer");

    eframe::run_native(
        "AlgoScene",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(&cc.egui_ctx, script, config)))),
    )
}
