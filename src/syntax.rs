//! The operator alphabet shared by every stage of the pipeline.
//!
//! Any `char` not listed here is a literal.

pub const CONCATENATION: char = '.';
pub const ALTERNATION: char = '|';
pub const ZERO_OR_ONE: char = '?';
pub const ZERO_OR_MORE: char = '*';
pub const ONE_OR_MORE: char = '+';
pub const GROUP_OPEN: char = '(';
pub const GROUP_CLOSE: char = ')';
pub const REPEAT_OPEN: char = '{';
pub const REPEAT_CLOSE: char = '}';

/// Never preceded by an inserted concatenation.
pub const NO_CONCATENATION_BEFORE: &str = ")+*?|.";

/// Never followed by an inserted concatenation.
pub const NO_CONCATENATION_AFTER: &str = "(|.";

/// Binding strength used by the shunting-yard conversion; higher binds tighter.
///
/// Literals get the maximum so that nothing on the operator stack outranks them.
pub fn precedence(ch: char) -> u8 {
	match ch {
		GROUP_OPEN => 1,
		ALTERNATION => 2,
		CONCATENATION => 3,
		ZERO_OR_ONE | ZERO_OR_MORE | ONE_OR_MORE => 4,
		_ => 6,
	}
}

/// Number of operands a postfix symbol pops off the fragment stack.
pub fn arity(ch: char) -> usize {
	match ch {
		CONCATENATION | ALTERNATION => 2,
		ZERO_OR_ONE | ZERO_OR_MORE | ONE_OR_MORE => 1,
		_ => 0,
	}
}

pub fn is_literal(ch: char) -> bool {
	!matches!(
		ch,
		CONCATENATION
			| ALTERNATION
			| ZERO_OR_ONE
			| ZERO_OR_MORE
			| ONE_OR_MORE
			| GROUP_OPEN
			| GROUP_CLOSE
			| REPEAT_OPEN
			| REPEAT_CLOSE
	)
}
