//! Word-frequency based random text generation library.
//!
//! This crate provides:
//! - An immutable frequency distribution over discrete outcomes
//! - A unigram word model with quote stripping and sentence capitalization
//! - An interactive session driver that learns from files and typed text
//!
//! Reading source files is kept internal; callers hand paths to the
//! session and get back the errors of the sources that were skipped.

/// Distribution and word model.
pub mod model;

/// Interactive session state and command parsing.
pub mod session;

/// Error type shared by the whole crate.
pub mod error;

/// Source file loading.
///
/// Not exposed
pub(crate) mod io;

pub use error::{Result, WriterError};
pub use model::distribution::Distribution;
pub use model::text_model::TextModel;
pub use session::{Command, Session, SessionConfig, Step};
