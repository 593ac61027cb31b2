//! Turns raw model output into text.
//!
//! Real token decoding lives outside this service. `PlaceholderDecoder` fills
//! the seam until a decoder matching the trained vocabulary is plugged in.

use thiserror::Error;

use crate::models::predict::ModelKind;

/// Text returned by `PlaceholderDecoder` for every prediction.
pub const PLACEHOLDER_TEXT: &str = "Generated cover letter from TensorFlow model";

/// Upper bound on the number of questions returned per request.
pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model returned an empty prediction")]
    EmptyPrediction,
}

/// Pluggable decoder stored in `AppState`.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, kind: ModelKind, prediction: &[f32]) -> Result<String, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderDecoder;

impl TextDecoder for PlaceholderDecoder {
    fn decode(&self, _kind: ModelKind, prediction: &[f32]) -> Result<String, DecodeError> {
        if prediction.is_empty() {
            return Err(DecodeError::EmptyPrediction);
        }
        Ok(PLACEHOLDER_TEXT.to_string())
    }
}

/// Splits decoded text into at most `MAX_QUESTIONS` non-blank, trimmed lines.
pub fn split_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_QUESTIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_ignores_prediction_values() {
        let decoder = PlaceholderDecoder;
        let a = decoder.decode(ModelKind::CoverLetter, &[0.1, 0.9]).unwrap();
        let b = decoder.decode(ModelKind::CoverLetter, &[42.0]).unwrap();
        assert_eq!(a, PLACEHOLDER_TEXT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_placeholder_rejects_empty_prediction() {
        let result = PlaceholderDecoder.decode(ModelKind::InterviewQuestions, &[]);
        assert!(matches!(result, Err(DecodeError::EmptyPrediction)));
    }

    #[test]
    fn test_split_questions_caps_at_ten() {
        let text = (1..=15)
            .map(|i| format!("Question {i}?"))
            .collect::<Vec<_>>()
            .join("\n");
        let questions = split_questions(&text);
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert_eq!(questions[0], "Question 1?");
        assert_eq!(questions[9], "Question 10?");
    }

    #[test]
    fn test_split_questions_drops_blank_lines() {
        let questions = split_questions("  Why Rust?  \n\n\r\n   \nTell me about ownership.\r\n");
        assert_eq!(questions, vec!["Why Rust?", "Tell me about ownership."]);
    }

    #[test]
    fn test_split_questions_single_line() {
        assert_eq!(split_questions(PLACEHOLDER_TEXT), vec![PLACEHOLDER_TEXT]);
        assert!(split_questions("").is_empty());
    }
}
