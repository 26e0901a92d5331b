// Drives the compiled binary with piped stdin.
// Runs are seeded and use an empty prompt so stdout holds only generated lines.

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn writer() -> Command {
	let mut cmd = Command::cargo_bin("random-writer").expect("binary should be built");
	cmd.args(["--prompt", "", "--seed", "1234"]);
	cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
	String::from_utf8_lossy(&output.stdout).lines().map(str::to_owned).collect()
}

#[test]
fn typed_words_are_learned_and_echoed_back() -> Result<(), Box<dyn std::error::Error>> {
	let output = writer().write_stdin("cat dog cat\n6\nsee ya\n").output()?;

	assert!(output.status.success());
	let lines = stdout_lines(&output);
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[0].split(' ').count(), 3);
	assert_eq!(lines[1].split(' ').count(), 6);
	for word in lines.iter().flat_map(|line| line.split(' ')) {
		assert!(["cat", "dog", "Cat", "Dog"].contains(&word), "unexpected word {word}");
	}
	Ok(())
}

#[test]
fn sources_are_loaded_and_missing_ones_reported() -> Result<(), Box<dyn std::error::Error>> {
	let mut source = NamedTempFile::new()?;
	writeln!(source, "\"Alpha\" beta.")?;
	let dir = tempfile::tempdir()?;
	let missing = dir.path().join("missing.txt");

	let output = writer()
		.arg(&missing)
		.arg(source.path())
		.write_stdin("4\n\n")
		.output()?;

	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains(&format!("Error: {} not found.", missing.display())));

	let lines = stdout_lines(&output);
	assert_eq!(lines.len(), 1);
	let words: Vec<&str> = lines[0].split(' ').collect();
	assert_eq!(words.len(), 4);
	assert!(words[0] == "Alpha" || words[0] == "Beta.");
	for word in words {
		assert!(["alpha", "beta.", "Alpha", "Beta."].contains(&word), "unexpected word {word}");
	}
	Ok(())
}

#[test]
fn same_seed_gives_same_text() -> Result<(), Box<dyn std::error::Error>> {
	let input = "one two three four five six seven\n20\n";
	let first = writer().write_stdin(input).output()?;
	let second = writer().write_stdin(input).output()?;

	assert_eq!(first.stdout, second.stdout);
	Ok(())
}

#[test]
fn empty_model_prints_notice_and_keeps_going() -> Result<(), Box<dyn std::error::Error>> {
	let output = writer().write_stdin("5\nhello\n").output()?;

	assert!(output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing to generate yet"));
	assert_eq!(stdout_lines(&output), vec!["Hello".to_owned()]);
	Ok(())
}

#[test]
fn digit_exit_phrase_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
	let output = writer().args(["--exit-phrase", "42"]).write_stdin("").output()?;

	assert!(!output.status.success());
	Ok(())
}
