//! Dashboard views

pub mod results;

pub use results::render_results_view;
