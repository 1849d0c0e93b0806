//! UI layer: app shell, filter panel, project list, and map canvas.

pub mod app;
pub mod map_surface;

pub use app::AtlasApp;
