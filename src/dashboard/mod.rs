//! Dashboard UI Module
//!
//! Single-window viewer: controls in a side panel, the loaded image and the
//! OCR results in the central panel.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{run_dashboard, DashboardApp};
pub use state::DashboardState;
