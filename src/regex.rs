use crate::matcher::Matcher;
use crate::nfa::BuildError;
use crate::nfa::Nfa;
use crate::nfa::build;
use crate::normalize::NormalizeError;
use crate::normalize::normalize;
use crate::options::Options;
use crate::postfix::ParseError;
use crate::postfix::to_postfix;

/// A compiled pattern: the automaton plus the intermediate forms it was built from.
#[derive(Debug, Clone)]
pub struct Regex {
	pattern: String,
	normalized: String,
	postfix: String,
	nfa: Nfa,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
	Normalize(NormalizeError),
	Parse(ParseError),
	Build(BuildError),
}

impl Regex {
	pub fn from_pattern(pattern: &str) -> Result<Self, Error> {
		Self::with_options(pattern, &Options::new())
	}

	pub fn with_options(pattern: &str, options: &Options) -> Result<Self, Error> {
		let normalized: String = normalize(pattern, options)?;
		let postfix: String = to_postfix(&normalized)?;
		let nfa: Nfa = build(&postfix)?;
		Ok(Self {
			pattern: pattern.to_owned(),
			normalized,
			postfix,
			nfa,
		})
	}

	/// Whether the whole of `text` is matched.
	pub fn is_match(&self, text: &str) -> bool {
		self.nfa.matches(text)
	}

	pub fn matcher(&self) -> Matcher<'_> {
		self.nfa.matcher()
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn normalized(&self) -> &str {
		&self.normalized
	}

	pub fn postfix(&self) -> &str {
		&self.postfix
	}

	pub fn nfa(&self) -> &Nfa {
		&self.nfa
	}
}

impl std::str::FromStr for Regex {
	type Err = Error;

	fn from_str(pattern: &str) -> Result<Self, Self::Err> {
		Self::from_pattern(pattern)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Normalize(err) => fmt.write_fmt(format_args!("invalid pattern: {err}")),
			Self::Parse(err) => fmt.write_fmt(format_args!("invalid pattern: {err}")),
			Self::Build(err) => fmt.write_fmt(format_args!("invalid pattern: {err}")),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Normalize(err) => Some(err),
			Self::Parse(err) => Some(err),
			Self::Build(err) => Some(err),
		}
	}
}

impl From<NormalizeError> for Error {
	fn from(err: NormalizeError) -> Self {
		Self::Normalize(err)
	}
}

impl From<ParseError> for Error {
	fn from(err: ParseError) -> Self {
		Self::Parse(err)
	}
}

impl From<BuildError> for Error {
	fn from(err: BuildError) -> Self {
		Self::Build(err)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::options::RepetitionPolicy;

	#[test]
	fn concatenation() {
		let r: Regex = Regex::from_pattern("ab").unwrap();
		assert_eq!(r.normalized(), "a.b");
		assert_eq!(r.postfix(), "ab.");
		assert!(r.is_match("ab"));
		assert!(!r.is_match("a"));
	}

	#[test]
	fn star() {
		let r: Regex = Regex::from_pattern("a*").unwrap();
		assert!(r.is_match(""));
		assert!(r.is_match("aaaa"));
		assert!(!r.is_match("b"));
	}

	#[test]
	fn alternation() {
		let r: Regex = Regex::from_pattern("a|b").unwrap();
		assert!(r.is_match("a"));
		assert!(r.is_match("b"));
		assert!(!r.is_match("c"));
	}

	#[test]
	fn repetition() {
		let r: Regex = Regex::from_pattern("a{3}").unwrap();
		assert_eq!(r.normalized(), "a.a.a");
		assert!(r.is_match("aaa"));
		assert!(!r.is_match("aa"));
		assert!(!r.is_match("aaaa"));
	}

	#[test]
	fn large_repetition() {
		let r: Regex = Regex::from_pattern("a{1025}").unwrap();
		assert!(r.is_match(&"a".repeat(1025)));
		assert!(!r.is_match(&"a".repeat(1024)));
		assert!(!r.is_match(&"a".repeat(1026)));
	}

	#[test]
	fn group_star() {
		let r: Regex = Regex::from_pattern("(a|b)*c").unwrap();
		assert!(r.is_match("aabbc"));
		assert!(r.is_match("c"));
		assert!(!r.is_match("aabb"));
		assert!(!r.is_match("aabbcc"));
	}

	#[test]
	fn optional_and_plus() {
		let r: Regex = Regex::from_pattern("colou?r").unwrap();
		assert!(r.is_match("color"));
		assert!(r.is_match("colour"));
		assert!(!r.is_match("colouur"));

		let r: Regex = Regex::from_pattern("(ab)+").unwrap();
		assert!(!r.is_match(""));
		assert!(r.is_match("ab"));
		assert!(r.is_match("ababab"));
		assert!(!r.is_match("aba"));
	}

	#[test]
	fn mismatched_parentheses() {
		for pattern in ["(a", "a)", "(a|b", "((a)", "a)(b"] {
			assert!(
				matches!(
					Regex::from_pattern(pattern).unwrap_err(),
					Error::Parse(ParseError::MismatchedParentheses { .. })
				),
				"pattern {pattern:?}"
			);
		}
	}

	#[test]
	fn non_positive_repetition() {
		for pattern in ["a{0}", "a{-1}"] {
			assert!(matches!(
				Regex::from_pattern(pattern).unwrap_err(),
				Error::Normalize(NormalizeError::MalformedRepetition { .. })
			));

			let mut options: Options = Options::new();
			options.set_repetition_policy(RepetitionPolicy::Permissive);
			assert!(matches!(
				Regex::with_options(pattern, &options).unwrap_err(),
				Error::Normalize(NormalizeError::StrayBrace { .. })
			));
		}
	}

	#[test]
	fn malformed_expressions() {
		for pattern in ["", "*", "a|", "|a", "(|a)", "a(*)", "()"] {
			assert!(
				matches!(
					Regex::from_pattern(pattern).unwrap_err(),
					Error::Build(BuildError::MalformedExpression { .. })
				),
				"pattern {pattern:?}"
			);
		}
	}

	#[test]
	fn deterministic() {
		let subjects: [&str; 6] = ["", "a", "ab", "abc", "aabbc", "cab"];
		for pattern in ["(a|b)*c", "ab?c+", "a{2}|b", "(ab|c)*"] {
			let r1: Regex = pattern.parse::<Regex>().unwrap();
			let r2: Regex = pattern.parse::<Regex>().unwrap();
			assert_eq!(r1.postfix(), r2.postfix());
			assert_eq!(r1.nfa().states(), r2.nfa().states());
			for subject in subjects {
				assert_eq!(r1.is_match(subject), r2.is_match(subject));
			}
		}
	}

	/// Every string over {a, b, c} of length <= 4 is matched exactly when it equals an alternative.
	#[test]
	fn alternation_of_literals_agrees_with_reference() {
		let mut subjects: Vec<String> = vec![String::new()];
		let mut frontier: Vec<String> = vec![String::new()];
		for _ in 0..4 {
			frontier = frontier
				.iter()
				.flat_map(|prefix| ['a', 'b', 'c'].map(|ch| format!("{prefix}{ch}")))
				.collect::<Vec<_>>();
			subjects.extend(frontier.iter().cloned());
		}

		for pattern in ["a", "ab|c", "a|bc|ca", "abc|ab|a", "cc|c|ccc", "abca|b"] {
			let r: Regex = Regex::from_pattern(pattern).unwrap();
			let alternatives: Vec<&str> = pattern.split('|').collect::<Vec<_>>();
			for subject in subjects.iter() {
				assert_eq!(
					r.is_match(subject),
					alternatives.contains(&subject.as_str()),
					"pattern {pattern:?}, subject {subject:?}"
				);
			}
		}
	}

	#[test]
	fn errors_display() {
		let err: Error = Regex::from_pattern("(a").unwrap_err();
		assert_eq!(err.to_string(), "invalid pattern: mismatched parentheses at position 2");
		assert!(std::error::Error::source(&err).is_some());
	}

	#[test]
	fn matcher_streams() {
		let r: Regex = Regex::from_pattern("(a|b)*c").unwrap();
		let mut matcher: Matcher<'_> = r.matcher();
		matcher.feed("ab");
		matcher.feed("ba");
		assert!(!matcher.is_match());
		matcher.feed("c");
		assert!(matcher.is_match());
	}
}
