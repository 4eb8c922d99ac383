//! Dashboard view state management

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use crate::shared::Session;

/// Largest texture side uploaded to the GPU; bigger images are shrunk for display
pub const MAX_TEXTURE_SIDE: u32 = 4096;

/// Which export an action refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Text,
    Json,
}

impl ExportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Text => "text",
            ExportKind::Json => "JSON",
        }
    }
}

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line message under the controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Overall dashboard state
///
/// Buttons only set the `pending_*` fields; the app acts on them at the start
/// of the next frame.
pub struct DashboardState {
    /// Path typed into the open field
    pub path_input: String,
    /// Open the file in `path_input`
    pub pending_open: bool,
    /// Run OCR on the loaded image
    pub pending_run: bool,
    /// Copy an export to the clipboard
    pub pending_copy: Option<ExportKind>,
    /// Save an export into the output directory
    pub pending_save: Option<ExportKind>,
    /// Result of the last export action
    pub notice: Option<Notice>,
    /// Image textures for the current session revision
    pub textures: ImageTextures,
    /// Which output panels are expanded
    pub show_preprocessed: bool,
    pub show_json: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            path_input: String::new(),
            pending_open: false,
            pending_run: false,
            pending_copy: None,
            pending_save: None,
            notice: None,
            textures: ImageTextures::default(),
            show_preprocessed: true,
            show_json: true,
        }
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("path_input", &self.path_input)
            .field("pending_open", &self.pending_open)
            .field("pending_run", &self.pending_run)
            .field("pending_copy", &self.pending_copy)
            .field("pending_save", &self.pending_save)
            .field("notice", &self.notice)
            .field("textures_revision", &self.textures.revision)
            .finish()
    }
}

impl DashboardState {
    pub fn info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }
}

/// GPU textures for the three rendered images, plus the JSON listing
#[derive(Default)]
pub struct ImageTextures {
    /// Session revision these textures were built from
    pub revision: Option<u64>,
    pub original: Option<egui::TextureHandle>,
    pub preprocessed: Option<egui::TextureHandle>,
    pub annotated: Option<egui::TextureHandle>,
    /// Serialized detections, or the serialization error
    pub json: Option<Result<String, String>>,
}

impl ImageTextures {
    /// Rebuild textures when the session shows different images
    pub fn sync(&mut self, ctx: &egui::Context, session: &Session) {
        if self.revision == Some(session.revision()) {
            return;
        }

        self.original = session
            .source()
            .map(|source| ctx.load_texture("original", rgb_to_color_image(&source.image), egui::TextureOptions::LINEAR));

        let run = session.run();
        self.preprocessed = run.map(|run| {
            ctx.load_texture("preprocessed", gray_to_color_image(&run.preprocessed), egui::TextureOptions::LINEAR)
        });
        self.annotated = run.map(|run| {
            ctx.load_texture("annotated", rgb_to_color_image(&run.annotated), egui::TextureOptions::LINEAR)
        });
        self.json = json_listing(session);

        self.revision = Some(session.revision());
    }
}

/// JSON shown under "Detected Words", if the session has results
pub fn json_listing(session: &Session) -> Option<Result<String, String>> {
    session.export_json().map(|json| json.map_err(|e| e.to_string()))
}

/// Size an image is displayed at, fitting within [`MAX_TEXTURE_SIDE`]
pub fn display_size(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= MAX_TEXTURE_SIDE {
        return (width, height);
    }
    let scale = MAX_TEXTURE_SIDE as f64 / longest as f64;
    (
        ((width as f64 * scale) as u32).max(1),
        ((height as f64 * scale) as u32).max(1),
    )
}

pub fn rgb_to_color_image(image: &RgbImage) -> egui::ColorImage {
    let (w, h) = display_size(image.width(), image.height());
    if (w, h) == image.dimensions() {
        return egui::ColorImage::from_rgb([w as usize, h as usize], image.as_raw());
    }
    let shrunk = imageops::resize(image, w, h, FilterType::Triangle);
    egui::ColorImage::from_rgb([w as usize, h as usize], shrunk.as_raw())
}

pub fn gray_to_color_image(image: &GrayImage) -> egui::ColorImage {
    let (w, h) = display_size(image.width(), image.height());
    if (w, h) == image.dimensions() {
        return egui::ColorImage::from_gray([w as usize, h as usize], image.as_raw());
    }
    let shrunk = imageops::resize(image, w, h, FilterType::Triangle);
    egui::ColorImage::from_gray([w as usize, h as usize], shrunk.as_raw())
}
