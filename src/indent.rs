/*!
# PrettyMin: Indentation.
*/

use crate::{
	Document,
	NodeId,
	NodeKind,
	WhiteSpace,
};



#[derive(Debug, Clone, Copy)]
/// # Indenter.
///
/// This re-indents a (normalized) tree for readability by inserting line
/// breaks and indentation before block-level nodes and their closing tags.
///
/// Inline elements and text are left flush against their neighbors, and the
/// insides of raw-text elements are never touched, though a raw-text
/// element's closing tag is lined up if its content already spans multiple
/// lines.
pub struct Indenter<'a> {
	/// # Whitespace Classifier.
	ws: &'a WhiteSpace,

	/// # Indentation Unit.
	unit: &'a str,
}

impl<'a> Indenter<'a> {
	#[must_use]
	/// # New.
	pub const fn new(ws: &'a WhiteSpace, unit: &'a str) -> Self { Self { ws, unit } }

	/// # Indent.
	///
	/// Indent `id` (sitting at `depth`) and its descendants, returning `true`
	/// if `id` itself was placed on a fresh line.
	///
	/// The tree should be normalized first; any leftover whitespace-only text
	/// would otherwise be doubled up.
	pub fn indent(&self, doc: &mut Document, id: NodeId, depth: usize) -> bool {
		let mut indent_self = ! doc.kind(id).is_text();
		let mut indent_children = true;
		let mut indent_closing = false;

		if self.ws.is_raw_text_node(doc, id) {
			indent_self = true;
			indent_children = false;
			indent_closing = doc.text_content(id).contains('\n');
		}

		if self.ws.is_inline_node(doc, id) { indent_self = false; }

		// A fresh line for the opening tag.
		if indent_self && 0 < depth {
			let new = doc.create_text(self.line(depth));
			doc.insert_before(id, new);
		}

		// The children, one level deeper. The last one decides whether or
		// not the closing tag needs a fresh line too.
		if indent_self && indent_children && doc.has_children(id) {
			let children: Vec<NodeId> = doc.children(id).collect();
			for child in children {
				indent_closing = self.indent(doc, child, depth + 1);
			}
		}

		if indent_closing { self.indent_closing(doc, id, depth); }

		indent_self
	}

	/// # Indent Closing Tag.
	///
	/// If the last child already ends with a line break (and maybe one unit
	/// of indentation), rewrite that tail to match `depth`; otherwise append
	/// a fresh line.
	fn indent_closing(&self, doc: &mut Document, id: NodeId, depth: usize) {
		if
			let Some(last) = doc.last_child(id) &&
			let NodeKind::Text(ref v) | NodeKind::RawText(ref v) = *doc.kind(last) &&
			let Some(pos) = self.trailing_line(v.as_ref())
		{
			let mut new = String::with_capacity(pos + 1 + depth * self.unit.len());
			new.push_str(&v[..pos]);
			new.push_str(&self.line(depth));
			doc.set_text(last, new);
		}
		else {
			let new = doc.create_text(self.line(depth));
			doc.append(id, new);
		}
	}

	#[must_use]
	/// # Line Break and Indentation.
	fn line(&self, depth: usize) -> String {
		let mut out = String::with_capacity(1 + depth * self.unit.len());
		out.push('\n');
		for _ in 0..depth { out.push_str(self.unit); }
		out
	}

	#[must_use]
	/// # Trailing Line Break.
	///
	/// Return the position of the trailing line break, if the text ends with
	/// one, optionally followed by a single indentation unit.
	fn trailing_line(&self, txt: &str) -> Option<usize> {
		let txt = txt.strip_suffix(self.unit).unwrap_or(txt);
		txt.strip_suffix('\n').map(str::len)
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::spec;

	/// # Default Classifier.
	fn ws() -> WhiteSpace { WhiteSpace::new(spec::RAW_TEXT_TAGS, spec::INLINE_TAGS) }

	/// # Normalize and Indent a Fragment's First Child.
	fn indented(raw: &str, unit: &str) -> String {
		let mut doc = Document::parse(raw.as_bytes()).expect("Parse failed.");
		let ws = ws();
		ws.normalize(&mut doc);
		let first = doc.first_child(doc.root()).expect("Missing child.");
		Indenter::new(&ws, unit).indent(&mut doc, first, 0);
		doc.serialize()
	}

	#[test]
	fn t_indent_list() {
		assert_eq!(
			indented("<ul><li>a</li><li>b</li></ul>", "  "),
			"<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>",
		);
	}

	#[test]
	fn t_indent_nested() {
		assert_eq!(
			indented("<div><div><p>x <b>y</b></p></div><!--c--></div>", "\t"),
			"<div>\n\t<div>\n\t\t<p>x <b>y</b></p>\n\t</div>\n\t<!--c-->\n</div>",
		);
	}

	#[test]
	fn t_indent_inline() {
		// Inline children of a block don't get lines, and neither does the
		// block's closing tag.
		assert_eq!(
			indented("<form><input name=a><input name=b></form>", "\t"),
			"<form><input name=\"a\"><input name=\"b\"></form>",
		);

		// Nothing inside an inline element is touched, even blocks.
		assert_eq!(
			indented("<div><a href=\"#\"><div>x</div></a></div>", "\t"),
			"<div><a href=\"#\"><div>x</div></a></div>",
		);
	}

	#[test]
	fn t_indent_raw_text() {
		// Single-line raw text is left alone.
		assert_eq!(
			indented("<div><pre>a  b</pre></div>", "\t"),
			"<div>\n\t<pre>a  b</pre>\n</div>",
		);

		// Multi-line raw text gets its closing tag aligned; the rest is
		// unchanged.
		assert_eq!(
			indented("<div><script>\n  one();\n  two();\n</script></div>", "\t"),
			"<div>\n\t<script>\n  one();\n  two();\n\t</script>\n</div>",
		);

		// If the content doesn't end on a fresh line, a line is added.
		assert_eq!(
			indented("<div><pre>a\nb</pre></div>", "  "),
			"<div>\n  <pre>a\nb\n  </pre>\n</div>",
		);
	}

	#[test]
	fn t_trailing_line() {
		let ws = ws();
		let indenter = Indenter::new(&ws, "  ");
		assert_eq!(indenter.trailing_line("abc\n"), Some(3));
		assert_eq!(indenter.trailing_line("abc\n  "), Some(3));
		assert_eq!(indenter.trailing_line("abc\n    "), None);
		assert_eq!(indenter.trailing_line("abc"), None);
		assert_eq!(indenter.trailing_line("\n"), Some(0));
	}
}
