/*!
# PrettyMin

`PrettyMin` minifies (or re-indents) HTML files in place.

For basic use, just toss one or more file or directory paths after the
command, like:
```bash
# Minify one file.
prettymin /path/to/one.html

# Recursively minify every .htm(l) file in a directory.
prettymin /path/to

# Re-indent them instead, with two spaces per level.
prettymin -i --spaces 2 /path/to

# Do the same thing but with a progress bar.
prettymin -i --spaces 2 -p /path/to

# For a full list of options, run help:
prettymin -h
```

Documents that cannot be parsed or processed are left as-were. In minify
mode, so are any documents whose "minified" version winds up no smaller than
the original.
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(clippy::module_name_repetitions)]

// These are only used by the library.
use html5ever as _;
use indexmap as _;
use minifier as _;
use regex as _;
use tendril as _;

#[cfg(test)] use criterion as _;



mod cli;

use argyle::Argument;
use cli::CliError;
use dactyl::NiceU64;
use dowser::{
	Dowser,
	Extension,
};
use fyi_msg::{
	Msg,
	MsgKind,
	Progless,
};
use prettymin::{
	Config,
	PrettyMin,
};
use rayon::iter::{
	IntoParallelRefIterator,
	ParallelIterator,
};
use std::{
	fs,
	io::Read,
	path::{
		Path,
		PathBuf,
	},
};



// The E_HTM and E_HTML extension constants.
include!(concat!(env!("OUT_DIR"), "/prettymin-extensions.rs"));



/// # Main.
fn main() {
	match main__() {
		Ok(()) => {},
		Err(e @ (CliError::PrintHelp | CliError::PrintVersion)) => {
			println!("{e}");
		},
		Err(e) => { Msg::error(e.to_string()).die(1); },
	}
}

#[inline]
/// # Actual Main.
fn main__() -> Result<(), CliError> {
	let (settings, paths) = parse_args()?;

	let pm = PrettyMin::new(settings.config)?;
	let paths: Vec<PathBuf> = paths
		.filter(|p| is_html(p))
		.collect();
	if paths.is_empty() { return Err(CliError::NoDocuments); }

	// Sexy run-through.
	if settings.progress {
		// Boot up a progress bar.
		let progress = Progless::try_from(paths.len())?
			.with_title(Some(Msg::custom(
				"PrettyMin",
				199,
				if settings.indent { "Indenting documents…" }
				else { "Reticulating &splines;…" },
			)));

		let (results, failures) = crunch_all(&paths, &pm, settings.indent, Some(&progress));

		// Finish up.
		progress.finish();
		progress.summary(MsgKind::Crunched, "document", "documents").print();
		print_totals(&results, settings.indent);
		print_failures(&failures);
	}
	else {
		let (_, failures) = crunch_all(&paths, &pm, settings.indent, None);
		print_failures(&failures);
	}

	Ok(())
}



#[derive(Debug)]
/// # Settings.
struct Settings {
	/// # Library Configuration.
	config: Config,

	/// # Indent (Rather Than Minify)?
	indent: bool,

	/// # Show Progress?
	progress: bool,
}

/// # Parse Arguments.
///
/// Return the settings and the (unfiltered) paths to crawl.
fn parse_args() -> Result<(Settings, Dowser), CliError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut config = Config::default();
	let mut indent = false;
	let mut progress = false;
	let mut paths = Dowser::default();
	for arg in args {
		match arg {
			Argument::Key("-h" | "--help") => return Err(CliError::PrintHelp),
			Argument::Key("-i" | "--indent") => { indent = true; },
			Argument::Key("--keep-comments") => { config.remove_comments = false; },
			Argument::Key("--no-css") => { config.minify_css = false; },
			Argument::Key("--no-js") => { config.minify_js = false; },
			Argument::Key("-p" | "--progress") => { progress = true; },
			Argument::Key("-V" | "--version") => return Err(CliError::PrintVersion),

			Argument::KeyWithValue("-l" | "--list", s) => {
				for line in read_list(&s)?.lines() {
					let line = line.trim();
					if ! line.is_empty() { paths = paths.with_path(line); }
				}
			},
			Argument::KeyWithValue("--spaces", s) => {
				let n = s.trim().parse::<usize>().map_err(|_| CliError::Spaces)?;
				if n == 0 || 16 < n { return Err(CliError::Spaces); }
				config.indent_unit = " ".repeat(n);
			},

			// Assume paths.
			Argument::Path(s) => { paths = paths.with_path(s); },

			// Nothing else is expected.
			_ => {},
		}
	}

	Ok((Settings { config, indent, progress }, paths))
}

/// # Read Path List.
///
/// Read the list from the file, or STDIN if `-`.
fn read_list(src: &str) -> Result<String, CliError> {
	if src == "-" {
		let mut out = String::new();
		std::io::stdin().read_to_string(&mut out).map_err(|_| CliError::List)?;
		Ok(out)
	}
	else { fs::read_to_string(src).map_err(|_| CliError::List) }
}

/// # Is HTML?
///
/// Returns `true` if the path ends with `.htm` or `.html`.
fn is_html(path: &Path) -> bool {
	Extension::try_from3(path) == Some(E_HTM) ||
	Extension::try_from4(path) == Some(E_HTML)
}



/// # Crunch All Files.
///
/// Process the files in parallel, returning the before/after sizes of the
/// successes and the errors of the failures.
fn crunch_all<'a>(
	paths: &'a [PathBuf],
	pm: &PrettyMin,
	indent: bool,
	progress: Option<&Progless>,
) -> (Vec<(u64, u64)>, Vec<(&'a Path, CliError)>) {
	let results: Vec<_> = paths.par_iter()
		.map(|p| {
			let res = crunch(p, pm, indent);
			if let Some(progress) = progress { progress.increment(); }
			(p.as_path(), res)
		})
		.collect();

	let mut good = Vec::with_capacity(results.len());
	let mut bad = Vec::new();
	for (path, res) in results {
		match res {
			Ok(sizes) => { good.push(sizes); },
			Err(e) => { bad.push((path, e)); },
		}
	}

	(good, bad)
}

/// # Crunch One File.
///
/// Minify or indent the file, saving the result if it changed. Minified
/// output that isn't actually any smaller is not saved.
///
/// The original and final sizes are returned.
fn crunch(path: &Path, pm: &PrettyMin, indent: bool) -> Result<(u64, u64), CliError> {
	let raw = fs::read(path).map_err(|_| CliError::Read)?;
	if raw.is_empty() { return Err(CliError::EmptyFile); }
	let before = raw.len() as u64;

	let out =
		if indent { pm.indent_html(&raw)? }
		else { pm.minify_html(&raw)? };

	// Keep the original if there's no improvement.
	if out.as_bytes() == raw || (! indent && raw.len() <= out.len()) {
		return Ok((before, before));
	}

	write_atomic::write_file(path, out.as_bytes()).map_err(|_| CliError::Save)?;
	Ok((before, out.len() as u64))
}

/// # Print Totals.
fn print_totals(results: &[(u64, u64)], indent: bool) {
	let before: u64 = results.iter().map(|(b, _)| b).sum();
	let after: u64 = results.iter().map(|(_, a)| a).sum();

	if indent {
		Msg::custom("Total", 69, &format!(
			"{} bytes in, {} bytes out.",
			NiceU64::from(before),
			NiceU64::from(after),
		))
			.with_newline(true)
			.print();
	}
	else {
		Msg::custom("Saved", 69, &format!(
			"{} bytes.",
			NiceU64::from(before.saturating_sub(after)),
		))
			.with_newline(true)
			.print();
	}
}

/// # Print Failures.
fn print_failures(failures: &[(&Path, CliError)]) {
	for (path, e) in failures {
		Msg::warning(format!("{}: {e}", path.display())).eprint();
	}
}
