use nom::IResult;
use nom::Parser;

use crate::options::Options;
use crate::options::RepetitionPolicy;
use crate::syntax::CONCATENATION;
use crate::syntax::NO_CONCATENATION_AFTER;
use crate::syntax::NO_CONCATENATION_BEFORE;
use crate::syntax::REPEAT_CLOSE;
use crate::syntax::REPEAT_OPEN;

/// Positions are `char` indices into the pattern at the time the problem was found.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NormalizeError {
	StrayBrace { position: usize, brace: char },
	MalformedRepetition { position: usize, count: String },
	RepetitionTooLarge { position: usize, count: String, limit: u32 },
}

impl std::fmt::Display for NormalizeError {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::StrayBrace { position, brace } => {
				fmt.write_fmt(format_args!("stray {brace:?} at position {position}"))
			},
			Self::MalformedRepetition { position, count } => fmt.write_fmt(format_args!(
				"repetition count {count:?} at position {position} is not a positive integer"
			)),
			Self::RepetitionTooLarge { position, count, limit } => fmt.write_fmt(format_args!(
				"repetition count {count} at position {position} exceeds the limit of {limit}"
			)),
		}
	}
}

impl std::error::Error for NormalizeError {}

/// Expands `{n}` shorthand, then makes every concatenation explicit.
#[tracing::instrument(skip(options))]
pub fn normalize(pattern: &str, options: &Options) -> Result<String, NormalizeError> {
	let expanded: Vec<char> = expand_repetitions(pattern.chars().collect::<Vec<_>>(), options)?;

	if let Some(position) = expanded.iter().position(|&ch| ch == REPEAT_OPEN || ch == REPEAT_CLOSE) {
		return Err(NormalizeError::StrayBrace {
			position,
			brace: expanded[position],
		});
	}

	let normalized: String = insert_concatenation(&expanded.into_iter().collect::<String>());
	debug!("normalized {pattern:?} to {normalized:?}");
	Ok(normalized)
}

/// Inserts [`CONCATENATION`] between adjacent symbols that are implicitly concatenated.
///
/// Running this on its own output changes nothing.
pub fn insert_concatenation(pattern: &str) -> String {
	let mut output: String = String::with_capacity(pattern.len() * 2);
	let mut previous: Option<char> = None;

	for ch in pattern.chars() {
		if let Some(prev) = previous {
			if !NO_CONCATENATION_BEFORE.contains(ch) && !NO_CONCATENATION_AFTER.contains(prev) {
				output.push(CONCATENATION);
			}
		}
		output.push(ch);
		previous = Some(ch);
	}

	output
}

/// Replaces the first `{n}` block with `n` copies of the character before it, until none is left.
///
/// A block at the very start of the pattern, or one without a closing brace, stops the expansion;
/// its braces are reported by the caller.
fn expand_repetitions(mut chars: Vec<char>, options: &Options) -> Result<Vec<char>, NormalizeError> {
	loop {
		let Some(open): Option<usize> = chars.iter().position(|&ch| ch == REPEAT_OPEN) else {
			break;
		};
		if open == 0 {
			break;
		}
		let Some(close): Option<usize> = chars[open..]
			.iter()
			.position(|&ch| ch == REPEAT_CLOSE)
			.map(|offset| open + offset)
		else {
			break;
		};

		let content: String = chars[open + 1..close].iter().collect::<String>();
		let count: u64 = match parse_count(&content) {
			Some(count) => count,
			None => match options.repetition_policy() {
				RepetitionPolicy::Strict => {
					return Err(NormalizeError::MalformedRepetition {
						position: open,
						count: content,
					});
				},
				RepetitionPolicy::Permissive => {
					debug!("halting repetition expansion at {open}: {content:?}");
					break;
				},
			},
		};

		if count > u64::from(options.max_repetition()) {
			return Err(NormalizeError::RepetitionTooLarge {
				position: open,
				count: content,
				limit: options.max_repetition(),
			});
		}

		let repeated: char = chars[open - 1];
		trace!("expanding {repeated:?}{{{count}}} at {open}");

		// `count` fits in a `u32` after the limit check.
		let mut expanded: Vec<char> = Vec::with_capacity(chars.len() + count as usize);
		expanded.extend_from_slice(&chars[..open - 1]);
		expanded.extend(std::iter::repeat_n(repeated, count as usize));
		expanded.extend_from_slice(&chars[close + 1..]);
		chars = expanded;
	}

	Ok(chars)
}

/// `None` unless the whole of `content` is a positive (optionally `+`-signed) integer.
/// Counts too big for a `u64` saturate, so they still fail the limit check.
fn parse_count(content: &str) -> Option<u64> {
	match signed_digits(content) {
		Ok((_, (Some('-'), _))) => None,
		Ok((_, (_, digits))) => match digits.parse::<u64>() {
			Ok(0) => None,
			Ok(count) => Some(count),
			Err(_) => Some(u64::MAX),
		},
		Err(_) => None,
	}
}

fn signed_digits(input: &str) -> IResult<&str, (Option<char>, &str)> {
	use nom::character::complete::digit1;
	use nom::character::complete::one_of;
	use nom::combinator::all_consuming;
	use nom::combinator::opt;

	all_consuming((opt(one_of("+-")), digit1)).parse(input)
}
