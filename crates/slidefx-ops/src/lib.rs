//! # slidefx-ops
//!
//! Everything between the UI controls and the filter backend.
//!
//! # Modules
//!
//! - [`mapper`] - slider position to filter parameter
//! - [`kernel`] - emboss coefficients and hue rotation matrix
//! - [`dispatch`] - filter requests and their execution on a backend
//! - [`session`] - [`FilterSession`], UI events and source providers
//!
//! # Example
//!
//! ```rust,ignore
//! use slidefx_ops::{Backend, DemoSource, FilterMode, FilterSession, SliderPosition, UiEvent};
//!
//! let mut session = FilterSession::new(Box::new(DemoSource::new()), Backend::Auto)?;
//! session.handle(UiEvent::SelectMode(FilterMode::Convolve))?;
//! session.handle(UiEvent::SliderMoved(SliderPosition::new(75)))?;
//! let shown = session.display();
//! ```

mod error;
pub mod dispatch;
pub mod kernel;
pub mod mapper;
pub mod session;

pub use error::{OpsError, OpsResult};
pub use dispatch::{FilterRequest, apply, render};
pub use kernel::{ColorMatrix3, emboss_coefficients, hue_rotation_matrix};
pub use mapper::{FilterMode, SliderPosition, map};
pub use session::{DemoSource, FilterSession, FixedSource, SessionConfig, SourceProvider, UiEvent};

// Re-exported so front ends need not depend on slidefx-compute directly.
pub use slidefx_compute::Backend;
