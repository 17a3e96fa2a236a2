/*!
# PrettyMin: CLI Errors
*/

use fyi_msg::ProglessError;
use std::{
	error::Error,
	fmt,
};



/// # Help Text.
const HELP: &str = concat!(r"
     __,---.__
  ,-'         `-.__
&/           `._\ _\
/               ''._    ", "\x1b[38;5;199mPrettyMin\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r#"
|   ,             (∞)   Minify or re-indent
|__,'`-..--|__|--''     HTML in place.

USAGE:
    prettymin [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -h, --help        Print help information and exit.
    -i, --indent      Re-indent the documents for readability instead of
                      minifying them.
        --keep-comments
                      Leave HTML comments alone.
        --no-css      Leave inline <style> contents alone.
        --no-js       Leave inline <script> contents alone.
    -p, --progress    Show progress bar while working.
    -V, --version     Print program version and exit.

OPTIONS:
    -l, --list <FILE> Read (absolute) file and/or directory paths from this
                      text file — or STDIN if "-" — one entry per line, instead
                      of or in addition to the trailing <PATH(S)>.
        --spaces <N>  Indent with N spaces instead of a tab. [1..=16]

ARGS:
    <PATH(S)>...      One or more files or directories to process.
"#);



#[derive(Debug, Clone)]
/// # CLI Error.
pub(super) enum CliError {
	/// # Library Error.
	Crunch(prettymin::Error),

	/// # Empty File.
	EmptyFile,

	/// # Unreadable List.
	List,

	/// # Nothing to Do.
	NoDocuments,

	/// # Progress Bar.
	Progress(ProglessError),

	/// # Unreadable File.
	Read,

	/// # Unwritable File.
	Save,

	/// # Bad Spaces.
	Spaces,

	/// # Print Help (Not an Error).
	PrintHelp,

	/// # Print Version (Not an Error).
	PrintVersion,
}

impl fmt::Display for CliError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Self::Crunch(e) = self { fmt::Display::fmt(e, f) }
		else { f.write_str(self.as_str()) }
	}
}

impl Error for CliError {}

impl From<prettymin::Error> for CliError {
	#[inline]
	fn from(src: prettymin::Error) -> Self { Self::Crunch(src) }
}

impl From<ProglessError> for CliError {
	#[inline]
	fn from(src: ProglessError) -> Self { Self::Progress(src) }
}

impl CliError {
	/// # As Str.
	pub(super) const fn as_str(&self) -> &'static str {
		match self {
			Self::Crunch(e) => e.as_str(),
			Self::EmptyFile => "The file is empty.",
			Self::List => "Unable to read the path list.",
			Self::NoDocuments => "No documents were found.",
			Self::Progress(e) => e.as_str(),
			Self::Read => "Unable to read the file.",
			Self::Save => "Unable to save the changes.",
			Self::Spaces => "The number of spaces must be between 1 and 16.",
			Self::PrintHelp => HELP,
			Self::PrintVersion => concat!("PrettyMin v", env!("CARGO_PKG_VERSION")),
		}
	}
}
