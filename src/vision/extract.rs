//! Post-processing of structured engine output
//!
//! Filters tokens down to confident words and maps their boxes from the
//! upscaled recognition space back to original image pixels.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OcrError, Result};
use crate::vision::engine::EngineToken;

/// One recognized word in original-image coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetection {
    /// Recognized text, trimmed
    pub text: String,
    /// Engine confidence, 1..=100
    pub confidence: i32,
    /// Box as `[x, y, width, height]`
    pub bounding_box: [u32; 4],
}

impl WordDetection {
    pub fn x(&self) -> u32 {
        self.bounding_box[0]
    }

    pub fn y(&self) -> u32 {
        self.bounding_box[1]
    }

    pub fn width(&self) -> u32 {
        self.bounding_box[2]
    }

    pub fn height(&self) -> u32 {
        self.bounding_box[3]
    }

    /// Label drawn next to the box
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.text, self.confidence)
    }
}

/// Extract confident words from engine tokens, preserving engine order
///
/// Boxes are floor-divided by `scale`, so a rescaled edge can be off by up to
/// `scale - 1` pixels. A confidence that does not parse as a number fails the
/// whole run.
pub fn extract_text_data(tokens: &[EngineToken], scale: u32) -> Result<Vec<WordDetection>> {
    let scale = scale.max(1);
    let mut results = Vec::new();

    for token in tokens {
        let word = token.text.trim();
        if word.is_empty() {
            continue;
        }

        let confidence = parse_confidence(&token.conf).ok_or_else(|| OcrError::MalformedConfidence {
            text: word.to_string(),
            value: token.conf.clone(),
        })?;
        if confidence <= 0 {
            continue;
        }

        results.push(WordDetection {
            text: word.to_string(),
            confidence: confidence.min(100),
            bounding_box: [
                token.left / scale,
                token.top / scale,
                token.width / scale,
                token.height / scale,
            ],
        });
    }

    debug!("Kept {} of {} engine tokens", results.len(), tokens.len());
    Ok(results)
}

/// Parse a raw score as a float and truncate toward zero
fn parse_confidence(raw: &str) -> Option<i32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_box() {
        let tokens = vec![EngineToken::word("HELLO", "91", 30, 60, 90, 45)];
        let results = extract_text_data(&tokens, 3).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].bounding_box, [10, 20, 30, 15]);
    }

    #[test]
    fn test_rescale_floors() {
        let tokens = vec![EngineToken::word("A", "50", 32, 35, 8, 2)];
        let results = extract_text_data(&tokens, 3).unwrap();
        assert_eq!(results[0].bounding_box, [10, 11, 2, 0]);
    }

    #[test]
    fn test_non_positive_confidence_excluded() {
        let tokens = vec![
            EngineToken::word("ZERO", "0", 0, 0, 3, 3),
            EngineToken::word("NEG", "-5", 0, 0, 3, 3),
            EngineToken::word("FRACTION", "0.9", 0, 0, 3, 3),
            EngineToken::word("KEEP", "42.7", 0, 0, 3, 3),
        ];
        let results = extract_text_data(&tokens, 3).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "KEEP");
        assert_eq!(results[0].confidence, 42);
    }

    #[test]
    fn test_blank_text_excluded_regardless_of_confidence() {
        let tokens = vec![
            EngineToken::word("   ", "99", 0, 0, 3, 3),
            EngineToken::word("", "-1", 0, 0, 3, 3),
            // Blank text is skipped before confidence is looked at
            EngineToken::word(" \t", "garbage", 0, 0, 3, 3),
        ];
        let results = extract_text_data(&tokens, 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_text_is_trimmed() {
        let tokens = vec![EngineToken::word("  AB12 ", "80", 0, 0, 3, 3)];
        let results = extract_text_data(&tokens, 3).unwrap();
        assert_eq!(results[0].text, "AB12");
    }

    #[test]
    fn test_malformed_confidence_is_fatal() {
        let tokens = vec![
            EngineToken::word("OK", "90", 0, 0, 3, 3),
            EngineToken::word("BAD", "n/a", 0, 0, 3, 3),
        ];
        match extract_text_data(&tokens, 3) {
            Err(OcrError::MalformedConfidence { text, value }) => {
                assert_eq!(text, "BAD");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected MalformedConfidence, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_confidence_is_malformed() {
        let tokens = vec![EngineToken::word("X", "NaN", 0, 0, 3, 3)];
        assert!(matches!(
            extract_text_data(&tokens, 3),
            Err(OcrError::MalformedConfidence { .. })
        ));
    }

    #[test]
    fn test_preserves_engine_order() {
        let tokens = vec![
            EngineToken::word("LOW", "10", 300, 300, 3, 3),
            EngineToken::word("HIGH", "99", 0, 0, 3, 3),
            EngineToken::word("MID", "50", 150, 0, 3, 3),
        ];
        let texts: Vec<String> = extract_text_data(&tokens, 3)
            .unwrap()
            .into_iter()
            .map(|d| d.text)
            .collect();
        assert_eq!(texts, vec!["LOW", "HIGH", "MID"]);
    }

    #[test]
    fn test_confidence_bounds_hold() {
        let tokens = vec![
            EngineToken::word("A", "1", 0, 0, 3, 3),
            EngineToken::word("B", "100", 0, 0, 3, 3),
            EngineToken::word("C", "250", 0, 0, 3, 3),
            EngineToken::word("D", "-0.5", 0, 0, 3, 3),
        ];
        let results = extract_text_data(&tokens, 3).unwrap();

        assert_eq!(results.len(), 3);
        for detection in &results {
            assert!(detection.confidence > 0 && detection.confidence <= 100);
            assert!(!detection.text.trim().is_empty());
        }
    }

    #[test]
    fn test_label() {
        let detection = WordDetection {
            text: "HELLO123".to_string(),
            confidence: 87,
            bounding_box: [1, 2, 3, 4],
        };
        assert_eq!(detection.label(), "HELLO123 (87%)");
        assert_eq!((detection.x(), detection.y(), detection.width(), detection.height()), (1, 2, 3, 4));
    }

    #[test]
    fn test_json_shape() {
        let detection = WordDetection {
            text: "A1".to_string(),
            confidence: 55,
            bounding_box: [10, 20, 30, 15],
        };
        let json = serde_json::to_string(&detection).unwrap();
        assert_eq!(json, r#"{"text":"A1","confidence":55,"bounding_box":[10,20,30,15]}"#);
    }
}
