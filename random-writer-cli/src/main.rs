use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, error::ErrorKind};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use random_writer_core::session::{DEFAULT_EXIT_PHRASE, DEFAULT_PROMPT};
use random_writer_core::{Session, SessionConfig, Step, WriterError};

/// random text from the words you feed it
#[derive(Parser, Debug)]
#[clap(
	version,
	about,
	long_about = "Learns word frequencies from text files and typed lines, then writes random text. \
	Type words to teach them and get as many random words back, type a number to get that many \
	words, or type an empty line (or the exit phrase) to quit."
)]
struct Cli {
	/// text files to learn from before reading input
	sources: Vec<PathBuf>,

	/// seed the random generator for reproducible output
	#[clap(short = 's', long)]
	seed: Option<u64>,

	/// phrase that ends the session
	#[clap(short = 'e', long, default_value = DEFAULT_EXIT_PHRASE)]
	exit_phrase: String,

	/// prompt printed before each line is read
	#[clap(short = 'p', long, default_value = DEFAULT_PROMPT)]
	prompt: String,
}

impl Cli {
	fn to_config(&self) -> SessionConfig {
		let mut config = SessionConfig::default();
		if let Err(err) = config.set_exit_phrase(&self.exit_phrase) {
			let mut cmd = Cli::command();
			cmd.error(ErrorKind::InvalidValue, err).exit();
		}
		config.prompt = self.prompt.clone();
		config.seed = self.seed;
		config
	}
}

/// Reads commands from `input` until the operator exits or input ends.
///
/// Generated text goes to `output`, notices go to `errors`. Only I/O
/// failures on these streams stop the loop early.
fn run<R, W, E>(
	mut session: Session,
	config: &SessionConfig,
	rng: &mut impl Rng,
	mut input: R,
	mut output: W,
	mut errors: E,
) -> io::Result<()>
where
	R: BufRead,
	W: Write,
	E: Write,
{
	let mut line = String::new();
	loop {
		write!(output, "{}", config.prompt)?;
		output.flush()?;

		line.clear();
		if input.read_line(&mut line)? == 0 {
			debug!("input closed");
			return Ok(());
		}
		let command = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

		session = match session.step(command, &mut *rng) {
			Step::Exit => return Ok(()),
			Step::Reply(next, Ok(text)) => {
				writeln!(output, "{text}")?;
				next
			}
			Step::Reply(next, Err(WriterError::EmptySampleSpace)) => {
				writeln!(errors, "Nothing to generate yet, type some words first.")?;
				next
			}
			Step::Reply(next, Err(err)) => {
				writeln!(errors, "Error: {err}")?;
				next
			}
		};
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let cli = Cli::parse();
	let config = cli.to_config();

	let mut rng = match config.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	let (session, skipped) = Session::new(&config).load_sources(&cli.sources);
	for err in &skipped {
		eprintln!("Error: {err}");
	}
	info!(
		"{} of {} sources loaded, {} words known",
		cli.sources.len() - skipped.len(),
		cli.sources.len(),
		session.model().distribution().len()
	);
	if session.model().is_empty() {
		info!("no words known yet, waiting for typed text");
	}

	let stdin = io::stdin();
	run(session, &config, &mut rng, stdin.lock(), io::stdout(), io::stderr())?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use random_writer_core::TextModel;

	fn run_lines(session: Session, input: &str) -> (String, String) {
		let mut config = SessionConfig::default();
		config.prompt = String::new();
		let mut rng = StdRng::seed_from_u64(17);
		let mut output = Vec::new();
		let mut errors = Vec::new();

		run(session, &config, &mut rng, input.as_bytes(), &mut output, &mut errors).unwrap();
		(String::from_utf8(output).unwrap(), String::from_utf8(errors).unwrap())
	}

	#[test]
	fn test_run_learns_and_counts() {
		let session = Session::new(&SessionConfig::default());
		let (output, errors) = run_lines(session, "the cat sat\n5\nsee ya\nnever read\n");

		let lines: Vec<&str> = output.lines().collect();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0].split(' ').count(), 3);
		assert_eq!(lines[1].split(' ').count(), 5);
		assert!(errors.is_empty());
	}

	#[test]
	fn test_run_stops_on_empty_line_and_eof() {
		let session = Session::new(&SessionConfig::default());
		let (output, _) = run_lines(session, "a b\n\nc d\n");
		assert_eq!(output.lines().count(), 1);

		let session = Session::new(&SessionConfig::default());
		let (output, _) = run_lines(session, "a b\r\n2");
		assert_eq!(output.lines().count(), 2);
	}

	#[test]
	fn test_run_reports_and_continues() {
		let session = Session::new(&SessionConfig::default());
		let (output, errors) = run_lines(session, "3\n99999999999999999999999999\nhi\n");

		assert_eq!(output, "Hi\n");
		assert!(errors.contains("Nothing to generate yet"));
		assert!(errors.contains("invalid word count"));
	}

	#[test]
	fn test_run_with_preloaded_model() {
		let config = SessionConfig::default();
		let session = Session::with_model(&config, TextModel::from_text("word"));
		let (output, _) = run_lines(session, "4\n");

		assert_eq!(output, "Word word word word\n");
	}
}
