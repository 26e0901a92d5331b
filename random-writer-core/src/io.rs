use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Result, WriterError};
use crate::model::text_model::TextModel;

/// Reads a text file line by line into a `TextModel`.
///
/// - The file handle is dropped (closed) on every return path
/// - Any open or read failure is reported as `SourceUnavailable`
pub(crate) fn load_source<P: AsRef<Path>>(path: P) -> Result<TextModel> {
	let path = path.as_ref();
	let unavailable = |source| WriterError::SourceUnavailable {
		path: path.to_path_buf(),
		source,
	};

	let file = File::open(path).map_err(unavailable)?;
	TextModel::from_reader(BufReader::new(file)).map_err(|err| match err {
		WriterError::Io(source) => unavailable(source),
		other => other,
	})
}
