//! Loaded model handles and the `dense-v1` artifact they are built from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inference::features::FeatureVector;

/// Value of `format` in every artifact this service can execute.
pub const DENSE_FORMAT: &str = "dense-v1";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("model expects {expected} inputs, got {actual}")]
    InputShape { expected: usize, actual: usize },
}

/// A loaded, immutable model. Shared across requests behind an `Arc`.
pub trait Model: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f32>, ModelError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values.iter_mut().for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Activation::Softmax => {
                let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                values.iter_mut().for_each(|v| *v = (*v - max).exp());
                let sum: f32 = values.iter().sum();
                if sum > 0.0 {
                    values.iter_mut().for_each(|v| *v /= sum);
                }
            }
        }
    }
}

/// One fully connected layer. `weights` is `[out][in]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut output: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect();
        self.activation.apply(&mut output);
        output
    }
}

/// On-disk contents of `model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DenseArtifact {
    pub format: String,
    pub input_length: usize,
    pub vocab_size: u32,
    pub layers: Vec<DenseLayer>,
}

/// Feed-forward network executed on the CPU.
#[derive(Debug)]
pub struct DenseModel {
    input_length: usize,
    vocab_size: u32,
    layers: Vec<DenseLayer>,
}

impl DenseModel {
    /// Validates layer shapes and builds an executable model.
    pub fn from_artifact(artifact: DenseArtifact) -> Result<Self, ModelError> {
        if artifact.format != DENSE_FORMAT {
            return Err(ModelError::InvalidArtifact(format!(
                "unsupported format '{}', expected '{DENSE_FORMAT}'",
                artifact.format
            )));
        }
        if artifact.vocab_size == 0 {
            return Err(ModelError::InvalidArtifact(
                "vocabSize must be positive".to_string(),
            ));
        }
        if artifact.layers.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "artifact has no layers".to_string(),
            ));
        }

        let mut width = artifact.input_length;
        for (index, layer) in artifact.layers.iter().enumerate() {
            if layer.weights.is_empty() {
                return Err(ModelError::InvalidArtifact(format!(
                    "layer {index} has no units"
                )));
            }
            if let Some(row) = layer.weights.iter().find(|row| row.len() != width) {
                return Err(ModelError::InvalidArtifact(format!(
                    "layer {index} expects {width} inputs, row has {}",
                    row.len()
                )));
            }
            if layer.bias.len() != layer.weights.len() {
                return Err(ModelError::InvalidArtifact(format!(
                    "layer {index} has {} units but {} biases",
                    layer.weights.len(),
                    layer.bias.len()
                )));
            }
            width = layer.weights.len();
        }

        Ok(Self {
            input_length: artifact.input_length,
            vocab_size: artifact.vocab_size,
            layers: artifact.layers,
        })
    }

    pub fn input_length(&self) -> usize {
        self.input_length
    }

    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.weights.len())
    }
}

impl Model for DenseModel {
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f32>, ModelError> {
        if features.len() != self.input_length {
            return Err(ModelError::InputShape {
                expected: self.input_length,
                actual: features.len(),
            });
        }

        let scale = self.vocab_size as f32;
        let input: Vec<f32> = features.ids().iter().map(|&id| id as f32 / scale).collect();

        Ok(self
            .layers
            .iter()
            .fold(input, |activations, layer| layer.forward(&activations)))
    }
}

/// Small valid artifacts for tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    use super::*;
    use crate::inference::features::{FEATURE_LENGTH, VOCAB_BUCKETS};

    /// Two-layer network: 512 -> 4 (relu) -> 3 (softmax).
    pub fn artifact() -> DenseArtifact {
        DenseArtifact {
            format: DENSE_FORMAT.to_string(),
            input_length: FEATURE_LENGTH,
            vocab_size: VOCAB_BUCKETS,
            layers: vec![
                DenseLayer {
                    weights: (0..4)
                        .map(|unit| vec![0.01 * (unit + 1) as f32; FEATURE_LENGTH])
                        .collect(),
                    bias: vec![0.0, 0.1, 0.2, 0.3],
                    activation: Activation::Relu,
                },
                DenseLayer {
                    weights: vec![vec![1.0, 0.0, 0.0, 0.0]; 3],
                    bias: vec![0.0, 0.5, 1.0],
                    activation: Activation::Softmax,
                },
            ],
        }
    }

    /// Writes `<root>/<model_id>/model.json`.
    pub fn write_artifact(root: &Path, model_id: &str) {
        let dir = root.join(model_id);
        std::fs::create_dir_all(&dir).unwrap();
        let json = serde_json::to_vec(&artifact()).unwrap();
        std::fs::write(dir.join("model.json"), json).unwrap();
    }
}
