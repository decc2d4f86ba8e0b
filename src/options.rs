/// What the normalizer does with a `{...}` block whose content is not a positive integer.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum RepetitionPolicy {
	/// Reject the block with [`NormalizeError::MalformedRepetition`](crate::normalize::NormalizeError).
	#[default]
	Strict,
	/// Stop expanding at the first bad block.
	/// Its braces are left in place and get reported as stray afterwards.
	Permissive,
}

#[derive(Debug, Clone)]
pub struct Options {
	repetition_policy: RepetitionPolicy,
	max_repetition: u32,
}

impl Options {
	/// No practical limit; only counts that do not fit a `u32` are refused.
	pub const DEFAULT_MAX_REPETITION: u32 = u32::MAX;

	pub fn new() -> Self {
		Self {
			repetition_policy: RepetitionPolicy::Strict,
			max_repetition: Self::DEFAULT_MAX_REPETITION,
		}
	}

	pub fn set_repetition_policy(&mut self, policy: RepetitionPolicy) -> &mut Self {
		self.repetition_policy = policy;
		self
	}

	/// Upper bound for `n` in `{n}`.
	pub fn set_max_repetition(&mut self, max: u32) -> &mut Self {
		self.max_repetition = max;
		self
	}

	pub fn repetition_policy(&self) -> RepetitionPolicy {
		self.repetition_policy
	}

	pub fn max_repetition(&self) -> u32 {
		self.max_repetition
	}
}

impl Default for Options {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn setters_chain() {
		let mut options: Options = Options::new();
		options
			.set_repetition_policy(RepetitionPolicy::Permissive)
			.set_max_repetition(3);
		assert_eq!(options.repetition_policy(), RepetitionPolicy::Permissive);
		assert_eq!(options.max_repetition(), 3);

		let defaults: Options = Options::default();
		assert_eq!(defaults.repetition_policy(), RepetitionPolicy::Strict);
		assert_eq!(defaults.max_repetition(), Options::DEFAULT_MAX_REPETITION);
	}
}
