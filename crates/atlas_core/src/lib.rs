//! Filterable map-and-list engine for civic infrastructure projects.
//!
//! A render pass reads the filter controls, evaluates every project, brings
//! the map overlays into line with the passing set, replaces the side list,
//! and refits the viewport. The map widget, controls, and list panel are
//! reached only through the traits in [`surface`].

pub mod config;
pub mod filter;
pub mod headless;
pub mod listing;
pub mod markers;
pub mod orchestrator;
pub mod present;
pub mod style;
pub mod surface;
pub mod viewport;

pub use config::{load_settings, AtlasSettings, SettingsError};
pub use filter::{filter_projects, passes, FilterState};
pub use headless::{HeadlessSurface, OverlayHandle, SurfaceOp};
pub use listing::{render_list, ProjectCard};
pub use markers::{MarkerIndex, MarkerSynchronizer, ReconcileStats};
pub use orchestrator::{RenderError, RenderOrchestrator, RenderPhase, RenderSummary};
pub use present::PopupContent;
pub use style::{MarkerStyle, Rgb};
pub use surface::{ControlGroup, ControlSource, DisplaySurface, InputEvent, ListSurface, MarkerSpec};
pub use viewport::ViewportController;
