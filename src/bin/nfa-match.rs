use std::io::BufRead;
use std::io::Write;
use std::process::ExitCode;

use regex_mechanic::Regex;

const USAGE: &str = "\
Usage: nfa-match [<pattern> <subject>]

Prints whether the whole subject matches the pattern.
Without arguments, both are read from stdin.
Exit status: 0 on match, 1 on no match, 2 on error.";

fn main() -> ExitCode {
	let args: Vec<String> = std::env::args().skip(1).collect::<Vec<_>>();

	let (pattern, subject): (String, String) = match args.as_slice() {
		[flag] if flag == "-h" || flag == "--help" => {
			println!("{USAGE}");
			return ExitCode::SUCCESS;
		},
		[pattern, subject] => (pattern.clone(), subject.clone()),
		[] => match prompt_both() {
			Ok(both) => both,
			Err(err) => {
				eprintln!("error: failed to read input: {err}");
				return ExitCode::from(2);
			},
		},
		_ => {
			eprintln!("{USAGE}");
			return ExitCode::from(2);
		},
	};

	let regex: Regex = match Regex::from_pattern(&pattern) {
		Ok(regex) => regex,
		Err(err) => {
			eprintln!("error: {err}");
			return ExitCode::from(2);
		},
	};

	let matched: bool = regex.is_match(&subject);
	println!("{matched}");
	if matched { ExitCode::SUCCESS } else { ExitCode::from(1) }
}

fn prompt_both() -> std::io::Result<(String, String)> {
	let stdin: std::io::Stdin = std::io::stdin();
	let mut input: std::io::StdinLock<'_> = stdin.lock();
	let pattern: String = prompt(&mut input, "Enter regex: ")?;
	let subject: String = prompt(&mut input, "Enter string: ")?;
	Ok((pattern, subject))
}

fn prompt(input: &mut impl BufRead, message: &str) -> std::io::Result<String> {
	print!("{message}");
	std::io::stdout().flush()?;

	let mut line: String = String::new();
	input.read_line(&mut line)?;
	let trimmed: &str = line.trim_end_matches(['\r', '\n']);
	Ok(trimmed.to_owned())
}
