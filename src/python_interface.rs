use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::options::Options;
use crate::options::RepetitionPolicy;
use crate::regex::Regex;

pyo3::create_exception!(regexmech, RegexMechException, PyRuntimeError);
pyo3::create_exception!(regexmech, RegexMechInvalidPattern, RegexMechException);

#[pyclass(frozen)]
#[derive(Debug)]
struct Pattern {
	regex: Regex,
}

#[pymethods]
impl Pattern {
	#[new]
	#[pyo3(signature = (pattern, strict = true, max_repetition = Options::DEFAULT_MAX_REPETITION))]
	fn new(pattern: &str, strict: bool, max_repetition: u32) -> PyResult<Self> {
		let mut options: Options = Options::new();
		options
			.set_repetition_policy(if strict {
				RepetitionPolicy::Strict
			} else {
				RepetitionPolicy::Permissive
			})
			.set_max_repetition(max_repetition);

		let regex: Regex = Regex::with_options(pattern, &options)
			.map_err(|err| RegexMechInvalidPattern::new_err(format!("Invalid pattern {pattern:?}: {err}")))?;
		Ok(Self { regex })
	}

	fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}

	#[getter]
	fn pattern(&self) -> &str {
		self.regex.pattern()
	}

	#[getter]
	fn normalized(&self) -> &str {
		self.regex.normalized()
	}

	#[getter]
	fn postfix(&self) -> &str {
		self.regex.postfix()
	}

	#[getter]
	fn state_count(&self) -> usize {
		self.regex.nfa().len()
	}

	fn __repr__(&self) -> String {
		format!("Pattern({:?})", self.regex.pattern())
	}
}

#[pymodule]
mod regexmech {
	use pyo3::prelude::*;

	#[pymodule_export]
	use super::Pattern;

	#[pymodule_init]
	fn init(m: &Bound<'_, PyModule>) -> PyResult<()> {
		m.add("RegexMechException", m.py().get_type::<super::RegexMechException>())?;
		m.add("RegexMechInvalidPattern", m.py().get_type::<super::RegexMechInvalidPattern>())?;
		Ok(())
	}
}
