use std::path::Path;

use log::{debug, warn};
use rand::Rng;

use crate::error::{Result, WriterError};
use crate::io::load_source;
use crate::model::text_model::{TextModel, word_count};

/// Phrase that ends a session unless configured otherwise.
pub const DEFAULT_EXIT_PHRASE: &str = "see ya";

/// Prompt printed before each read unless configured otherwise.
pub const DEFAULT_PROMPT: &str = "> ";

/// Settings of an interactive session.
///
/// # Invariants
/// - `exit_phrase` is never empty and never made only of digits, so it can
///   not be mistaken for a word count
pub struct SessionConfig {
	/// Text printed before each line is read.
	pub prompt: String,

	/// Optional seed for reproducible output.
	pub seed: Option<u64>,

	exit_phrase: String,
}

impl SessionConfig {
	pub fn exit_phrase(&self) -> &str {
		&self.exit_phrase
	}

	/// Sets the phrase that ends the session.
	///
	/// # Errors
	/// Returns an error if the phrase is empty or made only of digits.
	pub fn set_exit_phrase(&mut self, exit_phrase: &str) -> Result<()> {
		if exit_phrase.is_empty() {
			return Err(WriterError::InvalidConfig("exit phrase cannot be empty".to_owned()));
		}
		if is_word_count(exit_phrase) {
			return Err(WriterError::InvalidConfig(format!(
				"exit phrase '{exit_phrase}' would be read as a word count"
			)));
		}
		self.exit_phrase = exit_phrase.to_owned();
		Ok(())
	}
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			prompt: DEFAULT_PROMPT.to_owned(),
			seed: None,
			exit_phrase: DEFAULT_EXIT_PHRASE.to_owned(),
		}
	}
}

/// What a line typed by the operator asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
	/// Empty line or exit phrase.
	Exit,
	/// Generate this many words without learning anything.
	Generate(usize),
	/// Learn the text, then generate as many words as it holds.
	Learn(&'a str),
}

impl<'a> Command<'a> {
	/// Parses one input line.
	///
	/// # Errors
	/// Returns [`WriterError::InvalidWordCount`] for a digit-only line that
	/// does not fit in a `usize`.
	pub fn parse(line: &'a str, exit_phrase: &str) -> Result<Self> {
		if line.is_empty() || line == exit_phrase {
			return Ok(Command::Exit);
		}
		if is_word_count(line) {
			return line
				.parse()
				.map(Command::Generate)
				.map_err(|_| WriterError::InvalidWordCount(line.to_owned()));
		}
		Ok(Command::Learn(line))
	}
}

/// Outcome of feeding one line to a [`Session`].
#[derive(Debug)]
pub enum Step {
	/// The operator asked to stop.
	Exit,
	/// The session to continue with, and the text to print (or why there is
	/// none).
	Reply(Session, Result<String>),
}

/// Interactive conversation state.
///
/// The running model is passed forward by value: each call to
/// [`Session::step`] consumes the session and hands back the next one.
#[derive(Debug)]
pub struct Session {
	model: TextModel,
	exit_phrase: String,
}

impl Session {
	/// Creates a session with an empty model.
	pub fn new(config: &SessionConfig) -> Self {
		Self::with_model(config, TextModel::new())
	}

	pub fn with_model(config: &SessionConfig, model: TextModel) -> Self {
		Self {
			model,
			exit_phrase: config.exit_phrase().to_owned(),
		}
	}

	pub fn model(&self) -> &TextModel {
		&self.model
	}

	/// Folds each source file into the model, in order.
	///
	/// Unreadable sources are skipped; their errors are returned so the
	/// caller can report them.
	pub fn load_sources<I, P>(self, paths: I) -> (Self, Vec<WriterError>)
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut model = self.model;
		let mut errors = Vec::new();

		for path in paths {
			let path = path.as_ref();
			match load_source(path) {
				Ok(source) => {
					debug!("loaded {} ({} words)", path.display(), source.distribution().total());
					model = model.combine(&source);
				}
				Err(err) => {
					warn!("skipping source: {err}");
					errors.push(err);
				}
			}
		}

		(Self { model, ..self }, errors)
	}

	/// Handles one line typed by the operator.
	pub fn step<R: Rng + ?Sized>(self, line: &str, rng: &mut R) -> Step {
		let command = match Command::parse(line, &self.exit_phrase) {
			Ok(command) => command,
			Err(err) => return Step::Reply(self, Err(err)),
		};

		match command {
			Command::Exit => Step::Exit,
			Command::Generate(num_words) => {
				let output = self.model.generate(num_words, rng);
				Step::Reply(self, output)
			}
			Command::Learn(text) => {
				let model = self.model.combine(&TextModel::from_text(text));
				debug!("model now holds {} distinct words", model.distribution().len());
				let output = model.generate(word_count(text), rng);
				Step::Reply(Self { model, ..self }, output)
			}
		}
	}
}

/// Returns `true` if `line` is made only of ASCII digits.
fn is_word_count(line: &str) -> bool {
	!line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}
