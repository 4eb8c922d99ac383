//! Text and JSON exports of an OCR run

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::vision::WordDetection;

/// File name used when saving the recognized text
pub const TEXT_FILE_NAME: &str = "extracted_text.txt";

/// File name used when saving the detection list
pub const JSON_FILE_NAME: &str = "result.json";

/// Serialize detections as JSON indented with four spaces
pub fn detections_to_json(detections: &[WordDetection]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    detections.serialize(&mut serializer)?;

    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `contents` to `dir/file_name`, returning the full path
pub fn save_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents)?;
    info!("Saved export to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_list_is_brackets() {
        assert_eq!(detections_to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_four_space_indent() {
        let detections = vec![WordDetection {
            text: "AB".to_string(),
            confidence: 90,
            bounding_box: [1, 2, 3, 4],
        }];

        let json = detections_to_json(&detections).unwrap();
        let expected = "[\n    {\n        \"text\": \"AB\",\n        \"confidence\": 90,\n        \"bounding_box\": [\n            1,\n            2,\n            3,\n            4\n        ]\n    }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_parses_back() {
        let detections = vec![
            WordDetection {
                text: "ONE".to_string(),
                confidence: 12,
                bounding_box: [0, 0, 5, 5],
            },
            WordDetection {
                text: "TWO".to_string(),
                confidence: 99,
                bounding_box: [9, 9, 5, 5],
            },
        ];

        let json = detections_to_json(&detections).unwrap();
        let parsed: Vec<WordDetection> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, detections);
    }

    #[test]
    fn test_save_export_creates_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("outputs");

        let path = save_export(&dir, TEXT_FILE_NAME, "HELLO123\n").unwrap();

        assert_eq!(path, dir.join("extracted_text.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "HELLO123\n");
    }
}
