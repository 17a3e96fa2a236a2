/*!
# PrettyMin: Errors
*/

use std::{
	error,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Error.
///
/// Configuration problems are raised when a [`PrettyMin`](crate::PrettyMin)
/// is built, before any tree is touched. Minifier failures are raised
/// mid-run, and may leave the document partially processed.
pub enum Error {
	/// # Invalid Comment Exception Pattern.
	CommentPattern(String),

	/// # Invalid Indentation Unit.
	IndentUnit,

	/// # Unparseable Document.
	Parse,

	/// # Script Minification Failed.
	Script(String),

	/// # Style Minification Failed.
	Style(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CommentPattern(s) => write!(f, "{} {s:?}", self.as_str()),
			Self::Script(s) | Self::Style(s) =>
				if s.is_empty() { f.write_str(self.as_str()) }
				else { write!(f, "{} {s}", self.as_str()) },
			Self::IndentUnit | Self::Parse => f.write_str(self.as_str()),
		}
	}
}

impl error::Error for Error {}

impl Error {
	#[must_use]
	/// # As Str.
	///
	/// Return the generic description of the error, minus any details.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::CommentPattern(_) => "Invalid comment exception pattern:",
			Self::IndentUnit => "The indentation unit must be non-empty whitespace.",
			Self::Parse => "Unable to parse the document.",
			Self::Script(_) => "Unable to minify script:",
			Self::Style(_) => "Unable to minify style:",
		}
	}

	#[must_use]
	/// # Is Minifier Failure?
	pub const fn is_minifier(&self) -> bool {
		matches!(self, Self::Script(_) | Self::Style(_))
	}
}
