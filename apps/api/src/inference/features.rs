//! Placeholder text encoder: whitespace tokens hashed into a fixed-size id space.
//!
//! This stands in for a trained tokenizer. Ids are stable across processes and
//! platforms so an artifact sees the same encoding on every host.

use crate::models::predict::{ModelKind, PredictRequest};

/// Number of token ids fed to every model.
pub const FEATURE_LENGTH: usize = 512;
/// Size of the hashed id space. Ids fall in `1..VOCAB_BUCKETS`.
pub const VOCAB_BUCKETS: u32 = 10_000;
/// Id used for padding. Never produced by `token_id`.
pub const PAD_ID: u32 = 0;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Fixed-length encoding of request text. Always exactly `FEATURE_LENGTH` ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    /// Encodes `text`, truncating after `FEATURE_LENGTH` tokens and padding with `PAD_ID`.
    pub fn encode(text: &str) -> Self {
        let mut ids: Vec<u32> = text
            .split_whitespace()
            .take(FEATURE_LENGTH)
            .map(token_id)
            .collect();
        ids.resize(FEATURE_LENGTH, PAD_ID);
        Self(ids)
    }

    /// Builds the model input for a request.
    /// Question models see only the job description.
    pub fn from_request(kind: ModelKind, request: &PredictRequest) -> Self {
        let description = request.job_posting.description.as_str();
        match kind {
            ModelKind::CoverLetter => {
                let summary = request.resume_data.summary.as_str();
                Self::encode(&format!("{summary} {description}"))
            }
            ModelKind::InterviewQuestions => Self::encode(description),
        }
    }

    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of real (non-padding) tokens.
    pub fn token_count(&self) -> usize {
        self.0.iter().take_while(|&&id| id != PAD_ID).count()
    }
}

/// Maps a token to `1..VOCAB_BUCKETS` with 64-bit FNV-1a.
pub fn token_id(token: &str) -> u32 {
    let hash = token.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    (hash % u64::from(VOCAB_BUCKETS - 1)) as u32 + 1
}
