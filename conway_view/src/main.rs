// main.rs - Desktop front end: one window per independent simulation

use std::error::Error;

use conway_core::{Simulation, SimulationConfig, WrapMode};
use eframe::egui;
use tracing::{Level, error, info};

mod ui; // Instance windows

use ui::Instance;

/// Grid sizes offered by the "New Instance" menu, 2^7 ..= 2^11
const SIZE_EXPONENTS: std::ops::RangeInclusive<u32> = 7..=11;

fn main() -> Result<(), Box<dyn Error>> {
    let level = std::env::var("LIFE_LOG")
        .ok()
        .and_then(|raw| raw.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let runtime = tokio::runtime::Runtime::new()?;
    let config = SimulationConfig::default()
        .with_wrap(WrapMode::PowerOfTwo)
        .with_cell_editing(true)
        .with_env_overrides();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(GameOfLife::new(runtime, config))),
    )?;
    Ok(())
}

/// Desktop holding any number of simulation windows
pub struct GameOfLife {
    runtime: tokio::runtime::Runtime,
    config: SimulationConfig,
    instances: Vec<Instance>,
    next_id: usize,
    status: Option<String>,
}

impl GameOfLife {
    fn new(runtime: tokio::runtime::Runtime, config: SimulationConfig) -> Self {
        let mut app = Self {
            runtime,
            instances: Vec::new(),
            next_id: 0,
            status: None,
            config,
        };
        app.open_instance(app.config.width, app.config.height);
        app
    }

    fn open_instance(&mut self, width: usize, height: usize) {
        let config = SimulationConfig {
            width,
            height,
            ..self.config.clone()
        };

        // Simulation::new spawns its tick task on the ambient runtime
        let _guard = self.runtime.enter();
        match Simulation::new(config) {
            Ok(sim) => {
                info!(width, height, "opened instance");
                self.instances.push(Instance::new(self.next_id, sim));
                self.next_id += 1;
                self.status = None;
            }
            Err(err) => {
                error!(%err, "could not open instance");
                self.status = Some(err.to_string());
            }
        }
    }

    fn close_finished(&mut self) {
        let runtime = &self.runtime;
        self.instances.retain_mut(|instance| {
            if instance.open {
                return true;
            }
            runtime.block_on(instance.sim.dispose());
            false
        });
    }
}

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("New Instance", |ui| {
                    for exponent in SIZE_EXPONENTS {
                        let side = 1usize << exponent;
                        if ui.button(format!("{side}x{side}")).clicked() {
                            self.open_instance(side, side);
                            ui.close_menu();
                        }
                    }
                });

                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |_ui| {});

        for instance in &mut self.instances {
            instance.show(ctx);
        }
        self.close_finished();

        // Keep frames coming while anything is ticking
        if self.instances.iter().any(|instance| instance.sim.is_running()) {
            ctx.request_repaint();
        }
    }
}

impl Drop for GameOfLife {
    fn drop(&mut self) {
        for instance in &mut self.instances {
            self.runtime.block_on(instance.sim.dispose());
        }
    }
}
