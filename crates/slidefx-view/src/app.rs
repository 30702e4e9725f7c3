//! Main viewer application with eframe/egui integration.
//!
//! Handles UI rendering and user interaction.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use slidefx_ops::{Backend, FilterMode, SliderPosition};

use crate::handler::ViewerHandler;
use crate::messages::{Generation, ViewerEvent, ViewerMsg};
use crate::state::{ViewerPersistence, ViewerState};

/// eframe storage key.
pub(crate) const STORAGE_KEY: &str = "slidefx_viewer_state";

/// Main viewer application.
pub struct ViewerApp {
    /// Sender for commands to worker thread.
    tx: Sender<ViewerMsg>,
    /// Receiver for results from worker thread.
    rx: Receiver<ViewerEvent>,
    /// Worker thread handle (Option for Drop).
    worker: Option<JoinHandle<()>>,

    /// Current display texture.
    texture: Option<TextureHandle>,
    /// Last error, shown under the controls.
    error: Option<String>,

    /// Runtime state.
    state: ViewerState,

    /// Generation counter for stale frame rejection.
    generation: Generation,
}

/// Configuration for launching the viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    /// Initial mode override (else last persisted mode).
    pub mode: Option<FilterMode>,
    /// Compute backend.
    pub backend: Backend,
}

impl ViewerApp {
    /// Creates a new viewer application.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        image_path: Option<PathBuf>,
        config: ViewerConfig,
    ) -> Self {
        // Load persisted settings
        let persistence: ViewerPersistence = cc
            .storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default();
        let state = ViewerState::from_persistence(&persistence, config.mode);

        // Create bidirectional channels
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_ui, rx_from_worker) = channel();

        // Spawn worker thread
        let backend = config.backend;
        let mode = state.mode;
        let worker = thread::spawn(move || {
            let handler = ViewerHandler::new(rx_in_worker, tx_to_ui, backend, mode);
            handler.run();
        });

        let app = Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            worker: Some(worker),
            texture: None,
            error: None,
            state,
            generation: 0,
        };

        app.send(ViewerMsg::LoadImage(image_path, 0));
        app
    }

    fn load(&mut self, path: PathBuf) {
        let generation = self.next_generation();
        self.send(ViewerMsg::LoadImage(Some(path), generation));
    }

    /// Open file dialog and load selected image.
    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG images", &["png"])
            .pick_file()
        {
            self.load(path);
        }
    }

    fn send(&self, msg: ViewerMsg) {
        let _ = self.tx.send(msg);
    }

    fn next_generation(&mut self) -> Generation {
        self.error = None;
        self.generation += 1;
        self.generation
    }

    fn select_mode(&mut self, mode: FilterMode) {
        if mode == self.state.mode {
            return;
        }
        self.state.mode = mode;
        self.state.slider = 0;
        let generation = self.next_generation();
        self.send(ViewerMsg::SelectMode(mode, generation));
    }

    fn slider_moved(&mut self) {
        let generation = self.next_generation();
        let pos = SliderPosition::from(self.state.slider);
        self.send(ViewerMsg::SetSlider(pos, generation));
    }

    /// Process all pending events from worker. Returns true if any events were processed.
    fn process_events(&mut self, ctx: &egui::Context) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.rx.try_recv() {
            had_events = true;
            match event {
                ViewerEvent::SessionReady { source, path, dims, backend, mode } => {
                    let title = format!("slidefx - {source}");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
                    self.state.source = source;
                    self.state.image_path = path;
                    self.state.image_dims = Some(dims);
                    self.state.backend = backend;
                    self.state.mode = mode;
                    self.state.slider = 0;
                    self.error = None;
                }
                ViewerEvent::Frame { generation, width, height, pixels, showing_source, mode, parameter } => {
                    if generation < self.generation {
                        continue; // Stale frame
                    }
                    let image = ColorImage {
                        size: [width as usize, height as usize],
                        pixels,
                    };
                    self.texture = Some(ctx.load_texture("slidefx_frame", image, TextureOptions::LINEAR));
                    self.state.showing_source = showing_source;
                    self.state.mode = mode;
                    self.state.parameter = Some(parameter);
                }
                ViewerEvent::Error(msg) => {
                    self.error = Some(msg);
                }
            }
        }
        had_events
    }

    /// Handle keyboard input. Returns true if should exit.
    fn handle_input(&mut self, ctx: &egui::Context) -> bool {
        let mut exit = false;
        let mut open_file = false;
        let mut mode = None;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                exit = true;
            }
            if i.key_pressed(egui::Key::O) && !i.modifiers.ctrl {
                open_file = true;
            }
            if i.key_pressed(egui::Key::Num1) {
                mode = Some(FilterMode::Blur);
            }
            if i.key_pressed(egui::Key::Num2) {
                mode = Some(FilterMode::Convolve);
            }
            if i.key_pressed(egui::Key::Num3) {
                mode = Some(FilterMode::ColorMatrix);
            }
        });

        // Handle actions outside input closure
        if let Some(mode) = mode {
            self.select_mode(mode);
        }
        if open_file {
            self.open_file_dialog();
        }

        exit
    }

    /// Draw top control panel.
    fn draw_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Mode:");
                for mode in FilterMode::ALL {
                    let label = format!("{} ({})", mode.label(), mode.index() + 1);
                    if ui.selectable_label(self.state.mode == mode, label).clicked() {
                        self.select_mode(mode);
                    }
                }

                ui.separator();

                let slider = ui.add(egui::Slider::new(&mut self.state.slider, 0..=100).text("amount"));
                if slider.changed() {
                    self.slider_moved();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Open").clicked() {
                        self.open_file_dialog();
                    }
                });
            });

            if let Some(ref err) = self.error {
                ui.colored_label(Color32::RED, err);
            }
        });
    }

    /// Draw bottom status panel.
    fn draw_hints(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("hints").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(self.state.status());
                ui.separator();
                if let Some((w, h)) = self.state.image_dims {
                    ui.label(format!("{w}x{h}"));
                    ui.separator();
                }
                if !self.state.backend.is_empty() {
                    ui.label(self.state.backend);
                    ui.separator();
                }
                ui.label("1/2/3: Mode | O: Open | Esc: Exit");
            });
        });
    }

    /// Draw main canvas with the image scaled to fit.
    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click());

            let Some(ref texture) = self.texture else {
                ui.painter_at(rect).text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Loading...",
                    egui::FontId::default(),
                    ui.visuals().text_color(),
                );
                return;
            };

            let tex_size = texture.size_vec2();
            let scale = (available.x / tex_size.x).min(available.y / tex_size.y).min(1.0);
            let image_rect = egui::Rect::from_center_size(rect.center(), tex_size * scale);
            ui.painter_at(rect).image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if response.double_clicked() {
                self.open_file_dialog();
            }
        });
    }

    /// Check for dropped files.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load(path);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_events = self.process_events(ctx);

        self.handle_dropped_files(ctx);

        if self.handle_input(ctx) {
            self.send(ViewerMsg::Close);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.draw_controls(ctx);
        self.draw_hints(ctx);
        self.draw_canvas(ctx);

        // Keep polling while the worker may still answer
        if had_events || self.texture.is_none() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persistence = self.state.to_persistence();
        eframe::set_value(storage, STORAGE_KEY, &persistence);
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        // Signal worker to stop
        let _ = self.tx.send(ViewerMsg::Close);

        // Wait for worker thread to finish
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
