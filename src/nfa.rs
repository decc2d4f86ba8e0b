//! Thompson construction over a postfix token stream.
//!
//! - <https://swtch.com/~rsc/regexp/regexp1.html>
//!
//! States live in an arena and refer to each other by [`NfaIdx`].
//! While building, a [`Fragment`] records its unresolved successors as (state, slot) pairs;
//! patching writes the target index into each recorded slot.
//! Once built, the automaton is immutable and can be shared between threads.

use crate::syntax::ALTERNATION;
use crate::syntax::CONCATENATION;
use crate::syntax::ONE_OR_MORE;
use crate::syntax::ZERO_OR_MORE;
use crate::syntax::ZERO_OR_ONE;
use crate::syntax::arity;

#[derive(Debug, Clone)]
pub struct Nfa {
	states: Vec<NfaState>,
	start: NfaIdx,
}

#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct NfaIdx(usize);

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NfaState {
	/// Consumes `ch` and moves to `next`.
	Literal { ch: char, next: NfaIdx },
	/// Epsilon transitions to both successors.
	Split { next: NfaIdx, next2: NfaIdx },
	Accept,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BuildError {
	/// The fragment stack did not reduce to a single fragment.
	/// `position` is the `char` index of the operator that lacked operands,
	/// or the length of the postfix stream if too many (or no) fragments were left.
	MalformedExpression { position: usize, fragments: usize },
}

impl std::fmt::Display for BuildError {
	fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MalformedExpression { position, fragments } => fmt.write_fmt(format_args!(
				"malformed expression at postfix position {position} ({fragments} fragment(s) on the stack)"
			)),
		}
	}
}

impl std::error::Error for BuildError {}

/// A state whose successors may not be known yet.
#[derive(Debug, Clone, Copy)]
enum PendingState {
	Literal {
		ch: char,
		next: Option<NfaIdx>,
	},
	Split {
		next: Option<NfaIdx>,
		next2: Option<NfaIdx>,
	},
	Accept,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Slot {
	Next,
	Next2,
}

/// An unresolved successor: which field of which state still needs a target.
#[derive(Debug, Clone, Copy)]
struct Dangling {
	state: NfaIdx,
	slot: Slot,
}

#[derive(Debug)]
struct Fragment {
	start: NfaIdx,
	dangling: Vec<Dangling>,
}

struct NfaBuilder {
	states: Vec<PendingState>,
	fragments: Vec<Fragment>,
}

/// Builds the automaton for a postfix stream produced by [`to_postfix`](crate::postfix::to_postfix).
#[tracing::instrument]
pub fn build(postfix: &str) -> Result<Nfa, BuildError> {
	let mut builder: NfaBuilder = NfaBuilder {
		states: Vec::with_capacity(postfix.len() + 1),
		fragments: Vec::new(),
	};

	let mut length: usize = 0;
	for (position, ch) in postfix.chars().enumerate() {
		builder.step(position, ch)?;
		length = position + 1;
	}

	let fragments: usize = builder.fragments.len();
	let Some(fragment): Option<Fragment> = builder.fragments.pop() else {
		return Err(BuildError::MalformedExpression {
			position: length,
			fragments,
		});
	};
	if fragments != 1 {
		return Err(BuildError::MalformedExpression {
			position: length,
			fragments,
		});
	}

	let accept: NfaIdx = builder.new_state(PendingState::Accept);
	builder.patch(&fragment.dangling, accept);

	let nfa: Nfa = builder.finish(fragment.start).ok_or(BuildError::MalformedExpression {
		position: length,
		fragments,
	})?;
	debug!("built {} states for {postfix:?}", nfa.len());
	Ok(nfa)
}

impl NfaBuilder {
	fn step(&mut self, position: usize, ch: char) -> Result<(), BuildError> {
		if self.fragments.len() < arity(ch) {
			return Err(BuildError::MalformedExpression {
				position,
				fragments: self.fragments.len(),
			});
		}

		match ch {
			CONCATENATION => {
				let frag2: Fragment = self.pop(position)?;
				let frag1: Fragment = self.pop(position)?;
				self.patch(&frag1.dangling, frag2.start);
				self.fragments.push(Fragment {
					start: frag1.start,
					dangling: frag2.dangling,
				});
			},
			ALTERNATION => {
				let frag2: Fragment = self.pop(position)?;
				let mut frag1: Fragment = self.pop(position)?;
				let split: NfaIdx = self.new_state(PendingState::Split {
					next: Some(frag1.start),
					next2: Some(frag2.start),
				});
				frag1.dangling.extend(frag2.dangling);
				self.fragments.push(Fragment {
					start: split,
					dangling: frag1.dangling,
				});
			},
			ZERO_OR_ONE => {
				let mut frag1: Fragment = self.pop(position)?;
				let split: NfaIdx = self.new_split(frag1.start);
				frag1.dangling.push(Dangling {
					state: split,
					slot: Slot::Next2,
				});
				self.fragments.push(Fragment {
					start: split,
					dangling: frag1.dangling,
				});
			},
			ZERO_OR_MORE => {
				let frag1: Fragment = self.pop(position)?;
				let split: NfaIdx = self.new_split(frag1.start);
				self.patch(&frag1.dangling, split);
				self.fragments.push(Fragment {
					start: split,
					dangling: vec![Dangling {
						state: split,
						slot: Slot::Next2,
					}],
				});
			},
			ONE_OR_MORE => {
				let frag1: Fragment = self.pop(position)?;
				let split: NfaIdx = self.new_split(frag1.start);
				self.patch(&frag1.dangling, split);
				// Entering through the body makes one occurrence mandatory.
				self.fragments.push(Fragment {
					start: frag1.start,
					dangling: vec![Dangling {
						state: split,
						slot: Slot::Next2,
					}],
				});
			},
			_ => {
				let state: NfaIdx = self.new_state(PendingState::Literal { ch, next: None });
				self.fragments.push(Fragment {
					start: state,
					dangling: vec![Dangling {
						state,
						slot: Slot::Next,
					}],
				});
			},
		}
		trace!("after {ch:?} at {position}: {} fragment(s)", self.fragments.len());
		Ok(())
	}

	fn pop(&mut self, position: usize) -> Result<Fragment, BuildError> {
		self.fragments.pop().ok_or(BuildError::MalformedExpression {
			position,
			fragments: 0,
		})
	}

	fn new_state(&mut self, state: PendingState) -> NfaIdx {
		let idx: NfaIdx = NfaIdx(self.states.len());
		self.states.push(state);
		idx
	}

	fn new_split(&mut self, next: NfaIdx) -> NfaIdx {
		self.new_state(PendingState::Split {
			next: Some(next),
			next2: None,
		})
	}

	fn patch(&mut self, dangling: &[Dangling], target: NfaIdx) {
		for &Dangling { state, slot } in dangling.iter() {
			match (&mut self.states[state.0], slot) {
				(PendingState::Literal { next, .. }, Slot::Next) | (PendingState::Split { next, .. }, Slot::Next) => {
					*next = Some(target);
				},
				(PendingState::Split { next2, .. }, Slot::Next2) => {
					*next2 = Some(target);
				},
				(state, slot) => unreachable!("{state:?} has no {slot:?} slot"),
			}
		}
	}

	/// `None` if some successor was never patched.
	fn finish(self, start: NfaIdx) -> Option<Nfa> {
		let states: Vec<NfaState> = self
			.states
			.into_iter()
			.map(|state| match state {
				PendingState::Literal { ch, next } => Some(NfaState::Literal { ch, next: next? }),
				PendingState::Split { next, next2 } => Some(NfaState::Split {
					next: next?,
					next2: next2?,
				}),
				PendingState::Accept => Some(NfaState::Accept),
			})
			.collect::<Option<Vec<_>>>()?;
		Some(Nfa { states, start })
	}
}

impl Nfa {
	pub fn start(&self) -> NfaIdx {
		self.start
	}

	/// Number of states, including the accepting one.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn states(&self) -> &[NfaState] {
		&self.states
	}
}

impl std::ops::Index<NfaIdx> for Nfa {
	type Output = NfaState;

	fn index(&self, i: NfaIdx) -> &Self::Output {
		&self.states[i.0]
	}
}

impl NfaIdx {
	pub fn index(&self) -> usize {
		self.0
	}
}

impl NfaState {
	pub fn is_accept(&self) -> bool {
		matches!(self, Self::Accept)
	}
}
