// Inference endpoint: model cache, placeholder text encoding, model execution,
// and output decoding. All disk and CPU work runs on the blocking pool.

pub mod cache;
pub mod decoder;
pub mod features;
pub mod handlers;
pub mod loader;
pub mod model;
pub mod service;
