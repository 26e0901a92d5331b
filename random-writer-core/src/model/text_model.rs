use std::io::BufRead;

use log::debug;
use rand::Rng;

use super::distribution::Distribution;
use crate::error::Result;

/// Characters stripped from both ends of a token.
const QUOTES: [char; 2] = ['"', '\''];

/// A trailing character that ends a sentence.
const SENTENCE_END: [char; 3] = ['.', '?', '!'];

/// Unigram word model used to generate random text.
///
/// A `TextModel` counts normalized words and draws new words from those
/// counts, independently of their neighbours.
///
/// # Responsibilities
/// - Split raw text into tokens and normalize them
/// - Pool the words of several sources
/// - Generate text of a given length with sentence capitalization
///
/// # Invariants
/// - Every stored word is ASCII lower-case
/// - No stored word starts or ends with a quotation mark
/// - No stored word contains whitespace (a quote-only token is stored as
///   the empty word)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextModel {
	words: Distribution<String>,
}

impl TextModel {
	/// Creates an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a model from a block of text.
	pub fn from_text(text: &str) -> Self {
		Self::from_distribution(Self::tokenize(text).collect())
	}

	/// Builds a model from lines supplied by the caller (typically the
	/// contents of a file).
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut words = Vec::new();
		for line in lines {
			words.extend(Self::tokenize(line.as_ref()));
		}
		Self::from_distribution(words.into_iter().collect())
	}

	/// Builds a model by reading `reader` line by line.
	///
	/// # Errors
	/// Returns an error if a line cannot be read.
	pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
		let mut words = Vec::new();
		for line in reader.lines() {
			words.extend(Self::tokenize(&line?));
		}
		Ok(Self::from_distribution(words.into_iter().collect()))
	}

	/// Wraps an existing distribution of words.
	pub fn from_distribution(words: Distribution<String>) -> Self {
		Self { words }
	}

	/// Returns the underlying word distribution.
	pub fn distribution(&self) -> &Distribution<String> {
		&self.words
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Returns a model holding the words of both `self` and `other`.
	pub fn combine(self, other: &Self) -> Self {
		Self { words: self.words.combine(&other.words) }
	}

	/// Normalizes `word` and records one occurrence of it.
	///
	/// A quote-only token is recorded as the empty word.
	pub fn add_word(self, word: &str) -> Self {
		Self { words: self.words.add_single(normalize(word)) }
	}

	/// Generates `num_words` random words separated by single spaces.
	///
	/// The output always holds `num_words` space-separated fields. When the
	/// empty word is drawn its field is empty, so splitting the output on
	/// whitespace runs may yield fewer words.
	///
	/// A word is capitalized if it is the first one or if the previous word
	/// ends with `.`, `?` or `!`.
	///
	/// # Errors
	/// Returns [`crate::WriterError::EmptySampleSpace`] if the model is empty
	/// and `num_words > 0`.
	pub fn generate<R: Rng + ?Sized>(&self, num_words: usize, rng: &mut R) -> Result<String> {
		let mut output = String::new();
		let mut sentence_start = true;

		for i in 0..num_words {
			let word = self.words.random_select(rng)?;
			if i > 0 {
				output.push(' ');
			}
			if sentence_start {
				output.push_str(&capitalize(word));
			} else {
				output.push_str(word);
			}
			sentence_start = ends_sentence(word);
		}

		debug!("generated {} words from {} distinct", num_words, self.words.len());
		Ok(output)
	}

	/// Splits on whitespace runs and normalizes each token.
	fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
		text.split_whitespace().map(normalize)
	}
}

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
	text.split_whitespace().count()
}

/// Lower-cases `token` (ASCII only) and strips leading and trailing quotes.
///
/// Sentence punctuation is kept: generation relies on it to detect the end
/// of a sentence. A token made only of quotes becomes the empty string.
///
/// # Examples
/// - `"\"Hello!"` → `"hello!"`
/// - `"'don't'"` → `"don't"`
pub fn normalize(token: &str) -> String {
	token.trim_matches(|c: char| QUOTES.contains(&c)).to_ascii_lowercase()
}

fn ends_sentence(word: &str) -> bool {
	word.ends_with(|c: char| SENTENCE_END.contains(&c))
}

/// Upper-cases the first character of `word` (ASCII only).
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => {
			let mut capitalized = String::with_capacity(word.len());
			capitalized.push(first.to_ascii_uppercase());
			capitalized.push_str(chars.as_str());
			capitalized
		}
		None => String::new(),
	}
}
