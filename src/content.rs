/*!
# PrettyMin: Inline Scripts and Styles.
*/

use crate::{
	Document,
	Error,
	NodeId,
	spec,
};
use html5ever::local_name;



/// # Script Minifier.
///
/// Turn JavaScript source into (equivalent) minified JavaScript source.
///
/// This is implemented for [`BuiltinMinifier`], as well as any
/// `Fn(&str) -> Result<String, Error>` closure.
pub trait ScriptMinifier {
	/// # Minify Script.
	///
	/// ## Errors
	///
	/// Implementations should return [`Error::Script`] if the code cannot be
	/// minified.
	fn minify_script(&self, src: &str) -> Result<String, Error>;
}

impl<F> ScriptMinifier for F
where F: Fn(&str) -> Result<String, Error> {
	#[inline]
	fn minify_script(&self, src: &str) -> Result<String, Error> { self(src) }
}

/// # Style Minifier.
///
/// Turn CSS source into (equivalent) minified CSS source.
///
/// This is implemented for [`BuiltinMinifier`], as well as any
/// `Fn(&str) -> Result<String, Error>` closure.
pub trait StyleMinifier {
	/// # Minify Style.
	///
	/// ## Errors
	///
	/// Implementations should return [`Error::Style`] if the code cannot be
	/// minified.
	fn minify_style(&self, src: &str) -> Result<String, Error>;
}

impl<F> StyleMinifier for F
where F: Fn(&str) -> Result<String, Error> {
	#[inline]
	fn minify_style(&self, src: &str) -> Result<String, Error> { self(src) }
}



#[derive(Debug, Clone, Copy, Default)]
/// # Built-In Minifier.
///
/// Script and style minification courtesy of the `minifier` crate.
pub struct BuiltinMinifier;

impl ScriptMinifier for BuiltinMinifier {
	fn minify_script(&self, src: &str) -> Result<String, Error> {
		Ok(minifier::js::minify(src).to_string())
	}
}

impl StyleMinifier for BuiltinMinifier {
	fn minify_style(&self, src: &str) -> Result<String, Error> {
		minifier::css::minify(src)
			.map(|m| m.to_string())
			.map_err(|e| Error::Style(e.to_owned()))
	}
}



/// # Minify Scripts.
///
/// Replace the contents of every `<script>` element with the minified
/// equivalent, wrapped as raw (unescaped) text. Attributes are left alone.
///
/// Scripts with blank contents are emptied, and removed altogether if they
/// have no `src` either.
///
/// ## Errors
///
/// Minifier errors are passed through as-are; earlier scripts in the document
/// will already have been rewritten.
pub fn rewrite_scripts<M>(doc: &mut Document, minifier: &M) -> Result<(), Error>
where M: ScriptMinifier + ?Sized {
	let mut remove = Vec::new();
	for id in find(doc, spec::is_script) {
		let code = take_content(doc, id);
		if ! spec::is_whitespace(code.as_bytes()) {
			let code = minifier.minify_script(&code)?;
			let raw = doc.create_raw_text(code);
			doc.append(id, raw);
		}
		else if doc.attr(id, &local_name!("src")).is_none() {
			remove.push(id);
		}
	}

	for id in remove { doc.detach(id); }
	Ok(())
}

/// # Minify Styles.
///
/// Replace the contents of every `<style>` element with the minified (and
/// trimmed) equivalent, wrapped as raw (unescaped) text. Styles with blank
/// contents are removed.
///
/// ## Errors
///
/// Minifier errors are passed through as-are; earlier styles in the document
/// will already have been rewritten.
pub fn rewrite_styles<M>(doc: &mut Document, minifier: &M) -> Result<(), Error>
where M: StyleMinifier + ?Sized {
	let mut remove = Vec::new();
	for id in find(doc, spec::is_style) {
		let code = take_content(doc, id);
		if ! spec::is_whitespace(code.as_bytes()) {
			let code = minifier.minify_style(&code)?;
			let raw = doc.create_raw_text(code.trim());
			doc.append(id, raw);
		}
		else { remove.push(id); }
	}

	for id in remove { doc.detach(id); }
	Ok(())
}

/// # Find Elements.
///
/// Return the (attached) elements matching `cb`, in document order.
fn find(doc: &Document, cb: fn(&html5ever::QualName) -> bool) -> Vec<NodeId> {
	doc.descendants(doc.root())
		.into_iter()
		.filter(|&id| doc.name(id).is_some_and(cb))
		.collect()
}

/// # Take Content.
///
/// Return the element's text content, removing its children in the process.
fn take_content(doc: &mut Document, id: NodeId) -> String {
	let out = doc.text_content(id);
	doc.remove_children(id);
	out
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Shouting Script "Minifier".
	fn shout(src: &str) -> Result<String, Error> {
		Ok(src.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase())
	}

	/// # Broken Minifier.
	fn broken(_src: &str) -> Result<String, Error> {
		Err(Error::Style("Unclosed block".to_owned()))
	}

	/// # Parse a Document.
	fn parse(raw: &str) -> Document { Document::parse(raw.as_bytes()).expect("Parse failed.") }

	#[test]
	fn t_rewrite_scripts() {
		let mut doc = parse("<div><script type=\"module\">\n  if (a < b) {\n    go();\n  }\n</script><script></script><script src=\"x.js\">  </script><script>\n</script></div>");
		rewrite_scripts(&mut doc, &shout).expect("Rewrite failed.");
		assert_eq!(
			doc.serialize(),
			"<div><script type=\"module\">IF (A < B) { GO(); }</script><script src=\"x.js\"></script></div>",
		);
	}

	#[test]
	fn t_rewrite_styles() {
		let mut doc = parse("<div><style media=print>\n  b { color: red; }\n</style><style>  </style></div>");
		rewrite_styles(&mut doc, &|s: &str| Ok::<_, Error>(format!("  {}  ", s.trim()))).expect("Rewrite failed.");
		assert_eq!(
			doc.serialize(),
			"<div><style media=\"print\">b { color: red; }</style></div>",
		);
	}

	#[test]
	fn t_rewrite_errors() {
		let mut doc = parse("<div><style>b { color: red;</style></div>");
		assert_eq!(
			rewrite_styles(&mut doc, &broken),
			Err(Error::Style("Unclosed block".to_owned())),
		);

		// Nothing to minify, nothing to fail.
		let mut doc = parse("<div><style> </style></div>");
		assert!(rewrite_styles(&mut doc, &broken).is_ok());
		assert_eq!(doc.serialize(), "<div></div>");
	}

	#[test]
	fn t_builtin() {
		let src = "\n  var a = 1;\n\n  var b = 2;\n";
		let out = BuiltinMinifier.minify_script(src).expect("Script minification failed.");
		assert!(out.len() < src.len());
		assert!(out.contains("var b"));

		let src = "body > div {\n  border-top: 1px solid green;\n}\n";
		let out = BuiltinMinifier.minify_style(src).expect("Style minification failed.");
		assert!(out.len() < src.len());
		assert!(out.contains("green"));
		assert!(! out.contains('\n'));
	}
}
