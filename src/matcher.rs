//! Breadth-first NFA simulation.
//!
//! The frontier holds every non-split state reachable after the input consumed so far.
//! Each state is stamped with the generation it was last added in, so a step never adds a
//! state twice and loops of splits terminate. All of that lives in the [`Matcher`],
//! never in the [`Nfa`], so any number of matchers can run against one automaton at once.

use crate::nfa::Nfa;
use crate::nfa::NfaIdx;
use crate::nfa::NfaState;

#[derive(Debug, Clone)]
pub struct Matcher<'nfa> {
	nfa: &'nfa Nfa,
	/// Generation in which each state was last added to a frontier.
	marks: Vec<u32>,
	generation: u32,
	current: Vec<NfaIdx>,
	next: Vec<NfaIdx>,
	/// Work-list for the epsilon closure, kept to reuse its allocation.
	stack: Vec<NfaIdx>,
	position: usize,
}

/// Whether the whole of `text` is matched by `nfa`.
pub fn matches(nfa: &Nfa, text: &str) -> bool {
	let mut matcher: Matcher<'_> = Matcher::new(nfa);
	matcher.feed(text);
	matcher.is_match()
}

impl Nfa {
	pub fn matches(&self, text: &str) -> bool {
		matches(self, text)
	}

	pub fn matcher(&self) -> Matcher<'_> {
		Matcher::new(self)
	}
}

impl<'nfa> Matcher<'nfa> {
	pub fn new(nfa: &'nfa Nfa) -> Self {
		let mut matcher: Self = Self {
			nfa,
			marks: vec![0; nfa.len()],
			generation: 0,
			current: Vec::with_capacity(nfa.len()),
			next: Vec::with_capacity(nfa.len()),
			stack: Vec::new(),
			position: 0,
		};
		matcher.reset();
		matcher
	}

	/// Back to the state before any input, keeping the buffers.
	pub fn reset(&mut self) {
		self.position = 0;
		self.advance_generation();
		self.current.clear();
		epsilon_closure(
			self.nfa,
			self.nfa.start(),
			&mut self.marks,
			self.generation,
			&mut self.stack,
			&mut self.current,
		);
	}

	/// Consumes `chunk`; returns `false` once no further input can lead to a match.
	pub fn feed(&mut self, chunk: &str) -> bool {
		for ch in chunk.chars() {
			if self.is_dead() {
				debug!("frontier empty at {}, skipping the rest", self.position);
				return false;
			}
			self.step(ch);
		}
		!self.is_dead()
	}

	pub fn step(&mut self, ch: char) {
		debug!("=== step {}, ch {ch:?}", self.position);
		self.advance_generation();
		self.next.clear();

		for &state in self.current.iter() {
			if let NfaState::Literal { ch: expected, next } = self.nfa[state] {
				if expected == ch {
					epsilon_closure(
						self.nfa,
						next,
						&mut self.marks,
						self.generation,
						&mut self.stack,
						&mut self.next,
					);
				}
			}
		}

		std::mem::swap(&mut self.current, &mut self.next);
		self.position += 1;
		trace!("frontier is {:?}", self.current);
	}

	/// Whether the input consumed so far is matched.
	pub fn is_match(&self) -> bool {
		self.current.iter().any(|&state| self.nfa[state].is_accept())
	}

	pub fn is_dead(&self) -> bool {
		self.current.is_empty()
	}

	/// Number of characters consumed since the last reset.
	pub fn position(&self) -> usize {
		self.position
	}

	pub fn frontier(&self) -> &[NfaIdx] {
		&self.current
	}

	fn advance_generation(&mut self) {
		if self.generation == u32::MAX {
			self.marks.fill(0);
			self.generation = 0;
		}
		self.generation += 1;
	}
}

/// Adds every non-split state reachable from `from` through splits to `into`,
/// skipping states already stamped with `generation`.
fn epsilon_closure(
	nfa: &Nfa,
	from: NfaIdx,
	marks: &mut [u32],
	generation: u32,
	stack: &mut Vec<NfaIdx>,
	into: &mut Vec<NfaIdx>,
) {
	stack.push(from);

	while let Some(state) = stack.pop() {
		let mark: &mut u32 = &mut marks[state.index()];
		if *mark == generation {
			continue;
		}
		*mark = generation;

		match nfa[state] {
			NfaState::Split { next, next2 } => {
				// Popped in reverse, so `next` is explored first.
				stack.push(next2);
				stack.push(next);
			},
			NfaState::Literal { .. } | NfaState::Accept => into.push(state),
		}
	}
}
