/*!
# PrettyMin: Build
*/

use argyle::KeyWordsBuilder;
use dowser::Extension;
use std::{
	fs::File,
	io::Write,
	path::{
		Path,
		PathBuf,
	},
};



/// # Build.
///
/// We might as well pre-compile the CLI keywords and the extensions we're
/// looking for.
pub fn main() {
	println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

	build_cli();
	build_extensions();
}

/// # Build CLI Arguments.
fn build_cli() {
	let mut builder = KeyWordsBuilder::default();
	builder.push_keys([
		"-h", "--help",
		"-i", "--indent",
		"--keep-comments",
		"--no-css",
		"--no-js",
		"-p", "--progress",
		"-V", "--version",
	]);
	builder.push_keys_with_values([
		"-l", "--list",
		"--spaces",
	]);
	builder.save(out_path("argyle.rs"));
}

/// # Build Extensions.
fn build_extensions() {
	let out = format!(
		r"
const E_HTM: Extension = {};
const E_HTML: Extension = {};
",
		Extension::codegen(b"htm"),
		Extension::codegen(b"html"),
	);

	write(&out_path("prettymin-extensions.rs"), out.as_bytes());
}

/// # Output Path.
///
/// Append a file name to `OUT_DIR`.
fn out_path(name: &str) -> PathBuf {
	std::fs::canonicalize(std::env::var("OUT_DIR").expect("Missing OUT_DIR."))
		.expect("Missing OUT_DIR.")
		.join(name)
}

/// # Write File.
fn write(path: &Path, data: &[u8]) {
	File::create(path).and_then(|mut f| f.write_all(data).and_then(|()| f.flush()))
		.expect("Unable to write file.");
}
