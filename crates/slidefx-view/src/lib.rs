//! # slidefx-view
//!
//! Interactive viewer for slidefx filter sessions.
//!
//! Features:
//! - Three-way mode selector (Blur / Convolve / Color matrix)
//! - Slider 0..=100 driving the active filter
//! - Worker thread owning the session, UI never blocks on a filter
//! - Open PNG via dialog or drag & drop
//! - Persistent last mode and last file
//!
//! # Quick Start
//!
//! ```ignore
//! use slidefx_view::{run_opt, ViewerConfig};
//!
//! let exit_code = run_opt(None, ViewerConfig::default());
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `1` | Blur |
//! | `2` | Convolve |
//! | `3` | Color matrix |
//! | `O` | Open file |
//! | `Esc` | Exit |

#![warn(missing_docs)]

mod app;
mod handler;
mod messages;
mod state;

pub use app::{ViewerApp, ViewerConfig};
pub use handler::to_color32;
pub use state::{ViewerPersistence, ViewerState};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{error, info};

/// Run the viewer with an optional initial file.
///
/// If no path is provided, the last opened file from persistence is used
/// when it still exists, else the built-in demo pattern.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run_opt(path: Option<PathBuf>, config: ViewerConfig) -> i32 {
    let resolved_path = path.or_else(|| {
        persistence_path()
            .and_then(|dir| load_persistence(&dir))
            .and_then(|p| p.last_file)
            .filter(|f| f.exists())
    });

    match resolved_path {
        Some(ref p) => info!(path = %p.display(), "starting viewer"),
        None => info!("starting viewer with demo pattern"),
    }

    let title = resolved_path
        .as_ref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .map(|n| format!("slidefx - {}", n))
        .unwrap_or_else(|| "slidefx".into());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    let result = eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, resolved_path, config)))),
    );

    match result {
        Ok(()) => {
            info!("viewer exited normally");
            0
        }
        Err(e) => {
            error!("viewer error: {e}");
            1
        }
    }
}

/// Platform-specific persistence path.
fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("slidefx").join("viewer"))
}

/// Load persistence from `dir`.
///
/// eframe stores `app.ron` as a map of key to RON-encoded value.
fn load_persistence(dir: &Path) -> Option<ViewerPersistence> {
    let path = dir.join("app.ron");
    let text = std::fs::read_to_string(&path).ok()?;
    let entries: HashMap<String, String> = ron::from_str(&text).ok()?;
    ron::from_str(entries.get(app::STORAGE_KEY)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_config_default() {
        let config = ViewerConfig::default();
        assert!(config.mode.is_none());
        assert_eq!(config.backend, slidefx_ops::Backend::Auto);
    }

    #[test]
    fn load_persistence_reads_eframe_map() {
        let dir = tempfile::tempdir().unwrap();
        let saved = ViewerPersistence {
            last_file: Some(PathBuf::from("/images/portrait.png")),
            mode: slidefx_ops::FilterMode::Convolve,
        };

        let mut entries = HashMap::new();
        entries.insert(app::STORAGE_KEY.to_string(), ron::to_string(&saved).unwrap());
        entries.insert("egui".to_string(), "()".to_string());
        std::fs::write(dir.path().join("app.ron"), ron::to_string(&entries).unwrap()).unwrap();

        assert_eq!(load_persistence(dir.path()), Some(saved));
    }

    #[test]
    fn load_persistence_missing_or_foreign() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_persistence(dir.path()), None);

        let entries: HashMap<String, String> = HashMap::from([("other".into(), "1".into())]);
        std::fs::write(dir.path().join("app.ron"), ron::to_string(&entries).unwrap()).unwrap();
        assert_eq!(load_persistence(dir.path()), None);
    }

    #[test]
    fn persistence_path_is_namespaced() {
        if let Some(p) = persistence_path() {
            assert!(p.ends_with("slidefx/viewer"));
        }
    }
}
