use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the random writer library.
///
/// Ingestion errors (`SourceUnavailable`, `Io`) are meant to be reported and
/// skipped by the caller. Model errors (`EmptySampleSpace`, `MalformedCount`)
/// are returned as-is and never replaced by a placeholder value.
#[derive(Debug, Error)]
pub enum WriterError {
	/// A source file could not be opened or read.
	#[error("{}", unavailable_message(.path, .source))]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// A random draw was requested on a distribution with no outcomes.
	#[error("cannot sample from an empty distribution")]
	EmptySampleSpace,

	/// Frequency input rejected when building a distribution.
	#[error("malformed frequencies: {0}")]
	MalformedCount(String),

	/// A digit-only command that does not fit in a word count.
	#[error("invalid word count: {0}")]
	InvalidWordCount(String),

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error(transparent)]
	Io(#[from] io::Error),
}

/// `<path> not found.` for a missing file, `<path>: <io error>` otherwise.
fn unavailable_message(path: &Path, source: &io::Error) -> String {
	if source.kind() == io::ErrorKind::NotFound {
		format!("{} not found.", path.display())
	} else {
		format!("{}: {source}", path.display())
	}
}

pub type Result<T> = std::result::Result<T, WriterError>;
