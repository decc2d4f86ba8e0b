use std::ffi::c_char;
use std::marker::PhantomData;
use std::str::Utf8Error;

use crate::normalize::NormalizeError;
use crate::options::Options;
use crate::options::RepetitionPolicy;
use crate::postfix::ParseError;
use crate::regex::Error;
use crate::regex::Regex;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CSlice<'lifetime, T> {
	pointer: *const T,
	length: usize,
	_lifetime: PhantomData<&'lifetime [T]>,
}

pub type CStringView<'lifetime> = CSlice<'lifetime, c_char>;

#[repr(C)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CCompileStatus {
	Ok,
	InvalidUtf8,
	StrayBrace,
	MalformedRepetition,
	RepetitionTooLarge,
	MismatchedParentheses,
	MalformedExpression,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CMatchStatus {
	NoMatch,
	Match,
	InvalidUtf8,
}

/// Returns null on failure, with the reason in `status`.
/// `strict` selects [`RepetitionPolicy::Strict`] over [`RepetitionPolicy::Permissive`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_mechanic_compile(
	pattern: CStringView<'_>,
	strict: bool,
	status: &mut CCompileStatus,
) -> Option<Box<Regex>> {
	let Ok(pattern): Result<&str, Utf8Error> = pattern.as_utf8() else {
		*status = CCompileStatus::InvalidUtf8;
		return None;
	};

	let mut options: Options = Options::new();
	options.set_repetition_policy(if strict {
		RepetitionPolicy::Strict
	} else {
		RepetitionPolicy::Permissive
	});

	match Regex::with_options(pattern, &options) {
		Ok(regex) => {
			*status = CCompileStatus::Ok;
			Some(Box::new(regex))
		},
		Err(err) => {
			debug!("rejected {pattern:?}: {err}");
			*status = CCompileStatus::from(&err);
			None
		},
	}
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_mechanic_delete(regex: Option<Box<Regex>>) {
	std::mem::drop(regex);
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_mechanic_is_match(regex: &Regex, text: CStringView<'_>) -> CMatchStatus {
	match text.as_utf8() {
		Ok(text) if regex.is_match(text) => CMatchStatus::Match,
		Ok(_) => CMatchStatus::NoMatch,
		Err(_) => CMatchStatus::InvalidUtf8,
	}
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn regex_mechanic_state_count(regex: &Regex) -> usize {
	regex.nfa().len()
}

impl From<&Error> for CCompileStatus {
	fn from(err: &Error) -> Self {
		match err {
			Error::Normalize(NormalizeError::StrayBrace { .. }) => Self::StrayBrace,
			Error::Normalize(NormalizeError::MalformedRepetition { .. }) => Self::MalformedRepetition,
			Error::Normalize(NormalizeError::RepetitionTooLarge { .. }) => Self::RepetitionTooLarge,
			Error::Parse(ParseError::MismatchedParentheses { .. }) => Self::MismatchedParentheses,
			Error::Parse(ParseError::StrayBrace { .. }) => Self::StrayBrace,
			Error::Build(_) => Self::MalformedExpression,
		}
	}
}

impl<'lifetime, T> CSlice<'lifetime, T> {
	pub fn from_slice(slice: &'lifetime [T]) -> Self {
		Self {
			pointer: slice.as_ptr(),
			length: slice.len(),
			_lifetime: PhantomData,
		}
	}

	pub fn as_slice(&self) -> &'lifetime [T] {
		// `from_raw_parts` needs a non-null pointer even for an empty slice.
		if self.pointer.is_null() {
			return &[];
		}
		unsafe { std::slice::from_raw_parts(self.pointer, self.length) }
	}
}

impl<'lifetime> CStringView<'lifetime> {
	pub fn from_utf8(utf8: &'lifetime str) -> Self {
		Self {
			pointer: utf8.as_bytes().as_ptr().cast::<c_char>(),
			length: utf8.len(),
			_lifetime: PhantomData,
		}
	}

	pub fn as_utf8(&self) -> Result<&'lifetime str, Utf8Error> {
		if self.pointer.is_null() {
			return Ok("");
		}
		let bytes: &[u8] = unsafe { std::slice::from_raw_parts(self.pointer.cast::<u8>(), self.length) };
		std::str::from_utf8(bytes)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn compile(pattern: &str, strict: bool) -> (Option<Box<Regex>>, CCompileStatus) {
		let mut status: CCompileStatus = CCompileStatus::Ok;
		let regex: Option<Box<Regex>> =
			unsafe { regex_mechanic_compile(CStringView::from_utf8(pattern), strict, &mut status) };
		(regex, status)
	}

	#[test]
	fn basic() {
		let (regex, status): (Option<Box<Regex>>, CCompileStatus) = compile("(a|b)*c", true);
		assert_eq!(status, CCompileStatus::Ok);
		let regex: Box<Regex> = regex.unwrap();

		unsafe {
			assert_eq!(
				regex_mechanic_is_match(&regex, CStringView::from_utf8("aabbc")),
				CMatchStatus::Match
			);
			assert_eq!(
				regex_mechanic_is_match(&regex, CStringView::from_utf8("aabb")),
				CMatchStatus::NoMatch
			);
			assert_eq!(regex_mechanic_state_count(&regex), regex.nfa().len());
			regex_mechanic_delete(Some(regex));
		}
	}

	#[test]
	fn compile_errors() {
		assert_eq!(compile("a{0}", true).1, CCompileStatus::MalformedRepetition);
		assert_eq!(compile("a{0}", false).1, CCompileStatus::StrayBrace);
		assert_eq!(compile("(a", true).1, CCompileStatus::MismatchedParentheses);
		assert_eq!(compile("a|", true).1, CCompileStatus::MalformedExpression);
		assert!(compile("a|", true).0.is_none());
	}

	#[test]
	fn parse_errors_map_to_statuses() {
		let unbalanced: Error = Error::Parse(ParseError::MismatchedParentheses { position: 2 });
		assert_eq!(CCompileStatus::from(&unbalanced), CCompileStatus::MismatchedParentheses);
		let brace: Error = Error::Parse(ParseError::StrayBrace {
			position: 1,
			brace: '{',
		});
		assert_eq!(CCompileStatus::from(&brace), CCompileStatus::StrayBrace);
	}

	#[test]
	fn invalid_utf8() {
		let bytes: [c_char; 2] = [b'a' as c_char, 0xffu8 as c_char];
		let view: CStringView<'_> = CSlice::from_slice(&bytes);

		let mut status: CCompileStatus = CCompileStatus::Ok;
		assert!(unsafe { regex_mechanic_compile(view, true, &mut status) }.is_none());
		assert_eq!(status, CCompileStatus::InvalidUtf8);

		let regex: Box<Regex> = compile("a", true).0.unwrap();
		assert_eq!(
			unsafe { regex_mechanic_is_match(&regex, view) },
			CMatchStatus::InvalidUtf8
		);
	}

	#[test]
	fn null_view_is_empty() {
		let view: CStringView<'_> = CSlice {
			pointer: std::ptr::null(),
			length: 0,
			_lifetime: PhantomData,
		};
		assert_eq!(view.as_utf8().unwrap(), "");
		assert!(view.as_slice().is_empty());

		let regex: Box<Regex> = compile("a*", true).0.unwrap();
		assert_eq!(unsafe { regex_mechanic_is_match(&regex, view) }, CMatchStatus::Match);
	}
}
