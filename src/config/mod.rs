//! Application Configuration
//!
//! Settings stored in TOML format, loaded once at startup and passed down
//! explicitly to whatever needs them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recognition engine settings
    pub engine: EngineConfig,
    /// Export settings
    pub output: OutputConfig,
    /// Box and label drawing settings
    pub annotation: AnnotationConfig,
    /// Window settings
    pub window: WindowConfig,
}

/// Recognition engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tesseract executable, either a name on PATH or a full path
    pub tesseract_cmd: String,
    /// OCR engine mode
    pub oem: u32,
    /// Page segmentation mode
    pub psm: u32,
    /// Characters the engine may emit
    pub whitelist: String,
    /// Trained language data
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            oem: 3,
            psm: 6,
            whitelist: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives user-requested exports
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
        }
    }
}

/// Box and label drawing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// RGB stroke and label color
    pub color: [u8; 3],
    /// Box line thickness in pixels
    pub thickness: u32,
    /// Label height in pixels
    pub font_size: f32,
    /// TTF/OTF font for labels; the bundled UI font when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 2,
            font_size: 16.0,
            font_path: None,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
