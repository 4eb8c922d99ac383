//! Session state and exports shared by the dashboard and the headless runner

pub mod export;
pub mod state;

pub use export::{detections_to_json, save_export, JSON_FILE_NAME, TEXT_FILE_NAME};
pub use state::{LoadedImage, Session, SessionError, SessionPhase};
