//! Word-frequency model and text generation.
//!
//! - Generic immutable frequency distribution (`Distribution`)
//! - Unigram word model built on it (`TextModel`)

/// Immutable distribution of counted outcomes.
///
/// Supports probability queries, weighted random draws and functional
/// combination (add-one, remove, combine, joint).
pub mod distribution;

/// Word model: tokenization, normalization and capitalized generation.
pub mod text_model;
