use crate::syntax::GROUP_CLOSE;
use crate::syntax::GROUP_OPEN;
use crate::syntax::REPEAT_CLOSE;
use crate::syntax::REPEAT_OPEN;
use crate::syntax::is_literal;
use crate::syntax::precedence;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseError {
	/// `position` is the `char` index of the offending `)`,
	/// or the length of the input when a group is left open.
	MismatchedParentheses { position: usize },
	/// A `{` or `}` that `normalize` would have expanded or rejected.
	StrayBrace { position: usize, brace: char },
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MismatchedParentheses { position } => {
				fmt.write_fmt(format_args!("mismatched parentheses at position {position}"))
			},
			Self::StrayBrace { position, brace } => {
				fmt.write_fmt(format_args!("unexpanded {brace:?} at position {position}"))
			},
		}
	}
}

impl std::error::Error for ParseError {}

/// Shunting-yard conversion of a normalized pattern to postfix order.
///
/// Operators of equal precedence pop each other, so concatenation and alternation are
/// left-associative. Literals go straight to the output.
///
/// The input is expected to come from [`normalize`](crate::normalize::normalize); braces left
/// in it are refused rather than passed through as operators.
#[tracing::instrument]
pub fn to_postfix(normalized: &str) -> Result<String, ParseError> {
	let mut postfix: String = String::with_capacity(normalized.len());
	let mut operators: Vec<char> = Vec::new();

	for (position, ch) in normalized.chars().enumerate() {
		match ch {
			GROUP_OPEN => operators.push(ch),
			GROUP_CLOSE => loop {
				match operators.pop() {
					Some(GROUP_OPEN) => break,
					Some(op) => postfix.push(op),
					None => return Err(ParseError::MismatchedParentheses { position }),
				}
			},
			REPEAT_OPEN | REPEAT_CLOSE => return Err(ParseError::StrayBrace { position, brace: ch }),
			_ if is_literal(ch) => postfix.push(ch),
			_ => {
				while let Some(&top) = operators.last() {
					if precedence(top) < precedence(ch) {
						break;
					}
					postfix.push(top);
					operators.pop();
				}
				operators.push(ch);
			},
		}
	}

	while let Some(op) = operators.pop() {
		if op == GROUP_OPEN {
			return Err(ParseError::MismatchedParentheses {
				position: normalized.chars().count(),
			});
		}
		postfix.push(op);
	}

	debug!("postfix of {normalized:?} is {postfix:?}");
	Ok(postfix)
}
