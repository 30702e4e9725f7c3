//! Worker thread handler.
//!
//! Owns the [`FilterSession`] and processes UI messages strictly in order,
//! so filter invocations never overlap and the UI thread never blocks on a
//! backend call.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use egui::Color32;
use slidefx_core::Image;
use slidefx_ops::{Backend, FilterMode, FilterSession, SessionConfig, SliderPosition};
use tracing::{debug, info, warn};

use crate::messages::{Generation, ViewerEvent, ViewerMsg};

/// Worker thread handler.
pub struct ViewerHandler {
    rx: Receiver<ViewerMsg>,
    tx: Sender<ViewerEvent>,

    session: Option<FilterSession>,
    backend: Backend,
    initial_mode: FilterMode,
}

impl ViewerHandler {
    /// Creates a new handler.
    pub fn new(rx: Receiver<ViewerMsg>, tx: Sender<ViewerEvent>, backend: Backend, initial_mode: FilterMode) -> Self {
        Self {
            rx,
            tx,
            session: None,
            backend,
            initial_mode,
        }
    }

    /// Main event loop.
    pub fn run(mut self) {
        while let Ok(msg) = self.rx.recv() {
            match msg {
                ViewerMsg::Close => break,
                ViewerMsg::LoadImage(path, generation) => self.load_image(path, generation),
                ViewerMsg::SelectMode(mode, generation) => self.select_mode(mode, generation),
                ViewerMsg::SetSlider(pos, generation) => self.set_slider(pos, generation),
            }
        }

        debug!("viewer handler shutdown");
    }

    fn send(&self, event: ViewerEvent) {
        let _ = self.tx.send(event);
    }

    fn error(&self, msg: String) {
        warn!("{msg}");
        self.send(ViewerEvent::Error(msg));
    }

    fn load_image(&mut self, path: Option<PathBuf>, generation: Generation) {
        let provider = match slidefx_io::source_for(path.as_deref()) {
            Ok(p) => p,
            Err(e) => return self.error(format!("Cannot open image: {e}")),
        };

        let result = match self.session.as_mut() {
            Some(session) => session.set_source(provider),
            None => SessionConfig::new()
                .backend(self.backend)
                .mode(self.initial_mode)
                .build(provider)
                .map(|s| {
                    self.session = Some(s);
                }),
        };
        if let Err(e) = result {
            return self.error(format!("Failed to load image: {e}"));
        }

        let Some(session) = &self.session else { return };
        info!(source = %session.source_description(), "viewer source loaded");
        self.send(ViewerEvent::SessionReady {
            source: session.source_description(),
            path,
            dims: session.source().dimensions(),
            backend: session.backend_name(),
            mode: session.mode(),
        });
        self.send_frame(generation);
    }

    fn select_mode(&mut self, mode: FilterMode, generation: Generation) {
        let Some(session) = self.session.as_mut() else { return };
        if let Err(e) = session.select_mode(mode) {
            self.error(format!("Mode switch failed: {e}"));
        }
        // Sent on failure too; the UI resyncs its mode from the frame
        self.send_frame(generation);
    }

    fn set_slider(&mut self, pos: SliderPosition, generation: Generation) {
        let Some(session) = self.session.as_mut() else { return };
        if let Err(e) = session.set_slider(pos) {
            return self.error(format!("Filter failed: {e}"));
        }
        self.send_frame(generation);
    }

    fn send_frame(&self, generation: Generation) {
        let Some(session) = &self.session else { return };
        let display = session.display();
        self.send(ViewerEvent::Frame {
            generation,
            width: display.width(),
            height: display.height(),
            pixels: to_color32(display),
            showing_source: session.showing_source(),
            mode: session.mode(),
            parameter: session.parameter(),
        });
    }
}

/// Converts an RGBA8 image to egui pixels.
pub fn to_color32(image: &Image) -> Vec<Color32> {
    image
        .data()
        .chunks_exact(4)
        .map(|p| Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::thread;

    fn spawn() -> (Sender<ViewerMsg>, Receiver<ViewerEvent>, thread::JoinHandle<()>) {
        let (tx_msg, rx_msg) = channel();
        let (tx_evt, rx_evt) = channel();
        let worker = thread::spawn(move || {
            ViewerHandler::new(rx_msg, tx_evt, Backend::Cpu, FilterMode::Blur).run();
        });
        (tx_msg, rx_evt, worker)
    }

    #[test]
    fn test_opaque_pixels_convert() {
        let img = Image::filled(2, 1, [10, 20, 30, 255]);
        assert_eq!(to_color32(&img), vec![Color32::from_rgb(10, 20, 30); 2]);
    }

    #[test]
    fn test_worker_round_trip() {
        let (tx, rx, worker) = spawn();
        tx.send(ViewerMsg::LoadImage(None, 0)).unwrap();
        tx.send(ViewerMsg::SetSlider(SliderPosition::new(50), 1)).unwrap();
        tx.send(ViewerMsg::SelectMode(FilterMode::Convolve, 2)).unwrap();
        tx.send(ViewerMsg::Close).unwrap();
        worker.join().unwrap();

        let events: Vec<ViewerEvent> = rx.try_iter().collect();
        assert!(matches!(events[0], ViewerEvent::SessionReady { mode: FilterMode::Blur, .. }));
        let frames: Vec<(Generation, bool, f32)> = events
            .iter()
            .filter_map(|e| match e {
                ViewerEvent::Frame { generation, showing_source, parameter, .. } => {
                    Some((*generation, *showing_source, *parameter))
                }
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec![(0, true, 1.0), (1, false, 13.0), (2, true, 0.0)]);
    }

    #[test]
    fn test_bad_path_reports_error() {
        let (tx, rx, worker) = spawn();
        tx.send(ViewerMsg::LoadImage(Some(PathBuf::from("missing.png")), 0)).unwrap();
        tx.send(ViewerMsg::Close).unwrap();
        worker.join().unwrap();
        assert!(matches!(rx.try_iter().next(), Some(ViewerEvent::Error(_))));
    }
}
