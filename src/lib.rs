//! Thompson NFA construction and linear-time matching for a small regular-expression syntax:
//! literals, implicit or explicit (`.`) concatenation, `|`, `?`, `*`, `+`, groups,
//! and `{n}` repetition of the preceding character.
//!
//! ```text
//! pattern ──normalize──> explicit concatenation ──to_postfix──> postfix ──build──> Nfa ──matches──> bool
//! ```

#[macro_use(debug, trace)]
extern crate tracing;

pub mod matcher;
pub mod nfa;
pub mod normalize;
pub mod options;
pub mod postfix;
pub mod regex;
pub mod syntax;

pub mod c_interface;
#[cfg(feature = "python")]
pub mod python_interface;

pub use matcher::Matcher;
pub use matcher::matches;
pub use nfa::Nfa;
pub use nfa::build;
pub use normalize::normalize;
pub use options::Options;
pub use options::RepetitionPolicy;
pub use postfix::to_postfix;
pub use regex::Error;
pub use regex::Regex;
