// ui.rs - Window for a single simulation: controls, stats and the board

use std::sync::Arc;

use conway_core::{Generation, Grid, PATTERNS, SeedPolicy, Simulation};
use eframe::egui;
use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, Vec2, pos2};
use tracing::debug;

pub struct Instance {
    id: usize,
    pub sim: Simulation,
    pub open: bool,
    title: String,
    texture: Option<TextureHandle>,
    drawn: Option<Arc<Generation>>,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    min_tick_ms: u64,
    stroke: PaintStroke,
}

/// What the pointer is painting while it stays down
#[derive(Debug, Default)]
struct PaintStroke {
    /// Taken from the first toggle of the stroke
    value: Option<bool>,
    last: Option<(usize, usize)>,
}

impl PaintStroke {
    /// `false` while the pointer is still over the cell painted last
    fn enter(&mut self, cell: (usize, usize)) -> bool {
        if self.last == Some(cell) {
            return false;
        }
        self.last = Some(cell);
        true
    }
}

impl Instance {
    pub fn new(id: usize, sim: Simulation) -> Self {
        let grid = sim.grid();
        Self {
            id,
            title: format!("Game of Life {}x{}", grid.width(), grid.height()),
            min_tick_ms: sim.min_tick_duration().as_millis() as u64,
            sim,
            open: true,
            texture: None,
            drawn: None,
            live_color: Color32::WHITE,
            dead_color: Color32::BLACK,
            selected_pattern: 0,
            stroke: PaintStroke::default(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(self.title.clone())
            .id(egui::Id::new(("instance", self.id)))
            .open(&mut open)
            .default_size([640.0, 720.0])
            .show(ctx, |ui| {
                self.controls(ui);
                ui.separator();
                self.board(ui);
            });
        self.open = open;
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let grid = self.sim.grid();

        ui.horizontal(|ui| {
            let button_text = if self.sim.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.sim.toggle_running();
            }

            if ui.button("⏭ Step").clicked() {
                report(self.sim.step().map(drop));
            }

            if ui.button("⏹ Clear").clicked() {
                report(self.sim.clear());
            }

            if ui.button("🎲 Random").clicked() {
                report(SeedPolicy::random().populate(&grid).and_then(|cells| self.sim.overwrite(&cells)));
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source(("pattern_selector", self.id))
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                let cells = PATTERNS[self.selected_pattern].centered(&grid);
                report(self.sim.overwrite(&cells));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Min tick:");
            if ui
                .add(egui::Slider::new(&mut self.min_tick_ms, 0..=500).suffix(" ms"))
                .changed()
            {
                self.sim.set_min_tick_duration(self.min_tick_ms);
            }

            ui.separator();

            ui.label("Live:");
            if ui.color_edit_button_srgba(&mut self.live_color).changed() {
                self.drawn = None;
            }
            ui.label("Dead:");
            if ui.color_edit_button_srgba(&mut self.dead_color).changed() {
                self.drawn = None;
            }
        });

        let generation = self.sim.current_generation();
        let population = generation.population();
        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", generation.number));
            ui.separator();
            ui.label(format!(
                "Tick Time: {:.2}µs",
                self.sim.average_tick_duration().as_secs_f64() * 1e6
            ));
            ui.separator();
            ui.label(format!("TPS: {:.0}", self.sim.ticks_per_second()));
            ui.separator();
            ui.label(format!(
                "Population: {} ({:.1}%)",
                population,
                population as f64 / grid.size() as f64 * 100.0
            ));
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let generation = self.sim.current_generation();
        let stale = self
            .drawn
            .as_ref()
            .is_none_or(|drawn| !Arc::ptr_eq(drawn, &generation));
        if stale || self.texture.is_none() {
            let image = self.rasterize(&generation);
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        format!("world-{}", self.id),
                        image,
                        TextureOptions::NEAREST,
                    ))
                }
            }
            self.drawn = Some(generation);
        }

        let side = ui.available_width().min(ui.available_height()).max(64.0);
        let sense = if self.sim.cell_editing() {
            egui::Sense::click_and_drag()
        } else {
            egui::Sense::hover()
        };
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), sense);

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), response.rect, uv, Color32::WHITE);
        }

        if self.sim.cell_editing() {
            self.paint(&response);
        }
    }

    /// One pixel per cell; row-major like the cell index
    fn rasterize(&self, generation: &Generation) -> ColorImage {
        let grid = generation.grid;
        let mut image = ColorImage::new([grid.width(), grid.height()], self.dead_color);
        for i in generation.cells.iter_ones() {
            let (x, y) = grid.coords(i);
            image.pixels[y * grid.width() + x] = self.live_color;
        }
        image
    }

    /// Press toggles the cell under the pointer; dragging then paints
    /// every crossed cell with that same value. Frames where the pointer
    /// has not left its cell do nothing.
    fn paint(&mut self, response: &egui::Response) {
        if !response.is_pointer_button_down_on() {
            self.stroke = PaintStroke::default();
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let Some((x, y)) = cell_at(self.sim.grid(), response.rect, pos) else {
            return;
        };
        if !self.stroke.enter((x, y)) {
            return;
        }

        let result = match self.stroke.value {
            None => self.sim.toggle_cell(x, y).map(|alive| self.stroke.value = Some(alive)),
            Some(alive) => self.sim.set_cell(x, y, alive),
        };
        report(result);
    }
}

/// Cell under a screen position, if it lies on the board
fn cell_at(grid: Grid, rect: Rect, pos: egui::Pos2) -> Option<(usize, usize)> {
    if !rect.contains(pos) {
        return None;
    }
    let fx = (pos.x - rect.min.x) / rect.width();
    let fy = (pos.y - rect.min.y) / rect.height();
    let x = ((fx * grid.width() as f32) as usize).min(grid.width() - 1);
    let y = ((fy * grid.height() as f32) as usize).min(grid.height() - 1);
    Some((x, y))
}

fn report(result: conway_core::LifeResult<()>) {
    if let Err(err) = result {
        debug!(%err, "action rejected");
    }
}
