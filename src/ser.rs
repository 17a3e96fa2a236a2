/*!
# PrettyMin: Serialization
*/

use crate::{
	Document,
	NodeId,
	NodeKind,
	spec,
};
use html5ever::{
	local_name,
	ns,
	QualName,
};
use std::fmt;



/// # HTML5 Doctype.
const DOCTYPE: &str = "<!DOCTYPE html>\n";



impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		serialize(self, f)
	}
}

impl Document {
	#[must_use]
	/// # Serialize.
	///
	/// Convert the tree back into an HTML string.
	///
	/// Whole documents get a fresh HTML5 doctype and a trailing line break;
	/// fragments are written as-were, minus their placeholder root.
	pub fn serialize(&self) -> String {
		let mut out = String::with_capacity(self.len_hint());

		// Strings don't run out of room, so this can't actually fail.
		let res = serialize(self, &mut out);
		debug_assert!(res.is_ok(), "BUG: serialization failed.");

		out
	}

	/// # Length Hint.
	fn len_hint(&self) -> usize {
		self.all_nodes()
			.into_iter()
			.map(|id| self.kind(id).contents().map_or(16, str::len))
			.sum()
	}
}



/// # Serialize.
///
/// Write the tree back out as HTML.
///
/// Whole documents list the doctype, any leading comments, the root, and any
/// trailing comments, each on its own line.
fn serialize<W: fmt::Write>(doc: &Document, writer: &mut W) -> fmt::Result {
	let root = doc.root();
	let mut serializer = Serializer { writer };
	if doc.is_fragment() {
		for child in doc.children(root) { serializer.write_tree(doc, child)?; }
		return Ok(());
	}

	serializer.writer.write_str(DOCTYPE)?;
	for &id in doc.prologue().iter().chain(std::iter::once(&root)).chain(doc.epilogue()) {
		serializer.write_tree(doc, id)?;
		serializer.writer.write_char('\n')?;
	}

	Ok(())
}



#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
/// # Quote Type
///
/// If an attribute value contains the same character used for quoting, it has
/// to be encoded, jumping from one to five bytes per occurrence.
///
/// Serialization picks whichever works out smallest for each value.
enum QuoteKind {
	#[default]
	/// # Double (") Quotes.
	Double,

	/// # Single (') Quotes.
	Single,
}

impl QuoteKind {
	#[must_use]
	/// # For Attribute Value.
	const fn for_value(mut src: &[u8]) -> Self {
		let mut double = 0;
		let mut single = 0;

		while let [n, rest @ ..] = src {
			match *n {
				b'"' => { double += 1; },
				b'\'' => { single += 1; },
				_ => {},
			}
			src = rest;
		}

		// Prefer single if there are fewer of them.
		if single < double { Self::Single }
		// Otherwise stick with the default.
		else { Self::Double }
	}
}



/// # Serializer.
///
/// This is roughly based on `html5ever::serialize::Serializer`, but doesn't
/// actually implement the trait.
struct Serializer<'a, W: fmt::Write> {
	/// # Writer.
	writer: &'a mut W,
}

impl<W: fmt::Write> Serializer<'_, W> {
	/// # Write Tree.
	///
	/// Write `id` and everything under it. This walks the tree with an
	/// explicit stack rather than recursion.
	fn write_tree(&mut self, doc: &Document, id: NodeId) -> fmt::Result {
		/// # Stage.
		enum Stage {
			/// # Open Tag (or Text).
			Open(NodeId),

			/// # Close Tag.
			Close(NodeId),
		}

		let mut stack = vec![Stage::Open(id)];
		while let Some(op) = stack.pop() {
			match op {
				Stage::Open(id) => match doc.kind(id) {
					NodeKind::Element { name, attrs } => {
						let void = self.start_elem(
							name,
							attrs.iter().map(|(k, v)| (k, v.as_ref())),
							doc.has_children(id),
						)?;
						if ! void {
							stack.push(Stage::Close(id));
							let start = stack.len();
							stack.extend(doc.children(id).map(Stage::Open));
							stack[start..].reverse();
						}
					},
					NodeKind::Text(v) => {
						let plain = doc.parent(id)
							.and_then(|p| doc.name(p))
							.is_some_and(spec::is_plain_text_tag);
						self.write_text(v.as_ref(), plain)?;
					},
					NodeKind::RawText(v) => { self.writer.write_str(v.as_ref())?; },
					NodeKind::Comment(v) => { self.write_comment(v.as_ref())?; },
				},

				Stage::Close(id) => if let Some(name) = doc.name(id) {
					self.end_elem(name)?;
				},
			}
		}

		Ok(())
	}

	/// # Write Opening Tag.
	///
	/// Returns `true` if the element is self-closing (and so needs no
	/// children or closing tag).
	fn start_elem<'b, I>(&mut self, tag: &QualName, attrs: I, has_children: bool)
	-> Result<bool, fmt::Error>
	where I: Iterator<Item = (&'b QualName, &'b str)> {
		self.writer.write_char('<')?;
		self.writer.write_str(tag.local.as_ref())?;

		for (key, value) in attrs { self.write_attr(key, value)?; }

		// Childless SVG children can self-close.
		if
			! has_children &&
			matches!(tag.ns, ns!(svg)) &&
			! matches!(tag.local, local_name!("svg"))
		{
			self.writer.write_str("/>")?;
			return Ok(true);
		}

		self.writer.write_char('>')?;
		Ok(spec::is_void_html_tag(tag))
	}

	/// # Write Closing Tag.
	fn end_elem(&mut self, tag: &QualName) -> fmt::Result {
		self.writer.write_str("</")?;
		self.writer.write_str(tag.local.as_ref())?;
		self.writer.write_char('>')
	}

	/// # Write Tag Attribute.
	fn write_attr(&mut self, key: &QualName, value: &str) -> fmt::Result {
		// Handle (some) namespaces, and/or just add a leading space.
		match key.ns {
			ns!(xml) => self.writer.write_str(" xml:")?,
			ns!(xmlns) =>
				if matches!(key.local, local_name!("xmlns")) { self.writer.write_char(' ')?; }
				else { self.writer.write_str(" xmlns:")?; },
			ns!(xlink) => self.writer.write_str(" xlink:")?,
			_ => self.writer.write_char(' ')?,
		}

		self.writer.write_str(key.local.as_ref())?;
		self.write_esc_attr(value)
	}

	/// # Write Escaped Attribute Value.
	///
	/// HTML attributes require escaping of `&` and the wrapping character.
	/// Empty values are written as `=""`.
	fn write_esc_attr(&mut self, txt: &str) -> fmt::Result {
		let single = matches!(QuoteKind::for_value(txt.as_bytes()), QuoteKind::Single);
		let quote = if single { '\'' } else { '"' };

		self.writer.write_char('=')?;
		self.writer.write_char(quote)?;
		for c in txt.chars() {
			match c {
				'\u{a0}' => self.writer.write_str("&nbsp;")?,
				'&' => self.writer.write_str("&amp;")?,
				'\'' if single => self.writer.write_str("&#39;")?,
				'"' if ! single => self.writer.write_str("&#34;")?,
				c => self.writer.write_char(c)?,
			}
		}
		self.writer.write_char(quote)
	}

	/// # Write Text.
	///
	/// Text is escaped the usual way unless `plain` is set.
	fn write_text(&mut self, txt: &str, plain: bool) -> fmt::Result {
		if plain { return self.writer.write_str(txt); }

		for c in txt.chars() {
			match c {
				'\u{a0}' => self.writer.write_str("&nbsp;")?,
				'&' => self.writer.write_str("&amp;")?,
				'<' => self.writer.write_str("&lt;")?,
				'>' => self.writer.write_str("&gt;")?,
				c => self.writer.write_char(c)?,
			}
		}

		Ok(())
	}

	/// # Write Comment.
	fn write_comment(&mut self, txt: &str) -> fmt::Result {
		self.writer.write_str("<!--")?;
		self.writer.write_str(txt)?;
		self.writer.write_str("-->")
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_serialize_document() {
		let doc = Document::parse(b"<!doctype html><HTML><head><title>A &amp; B</title></head><body><p class=\"x\" data-q='say \"hi\"'>1 &lt; 2&nbsp;</p><br><img src=a.png alt=\"\"><!--c--></body></html>")
			.expect("Parse failed.");
		assert_eq!(
			doc.serialize(),
			"<!DOCTYPE html>\n<html><head><title>A &amp; B</title></head><body><p class=\"x\" data-q='say \"hi\"'>1 &lt; 2&nbsp;</p><br><img src=\"a.png\" alt=\"\"><!--c--></body></html>\n",
		);
	}

	#[test]
	fn t_serialize_outer_comments() {
		let mut doc = Document::parse(b"<!-- One --><!--[if IE]><html class=ie><![endif]--><html><body>x</body></html>\n<!-- Two -->")
			.expect("Parse failed.");
		assert_eq!(
			doc.serialize(),
			"<!DOCTYPE html>\n<!-- One -->\n<!--[if IE]><html class=ie><![endif]-->\n<html><head></head><body>x\n</body></html>\n<!-- Two -->\n",
		);

		// Without them, it's back to the usual.
		let outer = [doc.prologue(), doc.epilogue()].concat();
		for id in outer { doc.detach(id); }
		assert_eq!(doc.serialize(), "<!DOCTYPE html>\n<html><head></head><body>x\n</body></html>\n");
	}

	#[test]
	fn t_serialize_fragment() {
		let raw = "<ul><li>a &amp; b</li></ul><script>if (a < b) {}</script>";
		let doc = Document::parse(raw.as_bytes()).expect("Parse failed.");
		assert_eq!(doc.serialize(), raw);
		assert_eq!(doc.to_string(), raw);
	}

	#[test]
	fn t_serialize_svg() {
		let raw = "<svg viewBox=\"0 0 1 1\"><path d=\"M0 0\"/><g><path d=\"M1 1\"/></g></svg>";
		let doc = Document::parse(raw.as_bytes()).expect("Parse failed.");
		assert_eq!(doc.serialize(), raw);
	}

	#[test]
	fn t_serialize_raw_text() {
		let mut doc = Document::parse(b"<p>x</p>").expect("Parse failed.");
		let p = doc.first_child(doc.root()).expect("Missing p.");
		let raw = doc.create_raw_text("<b>&</b>");
		doc.append(p, raw);
		assert_eq!(doc.serialize(), "<p>x<b>&</b></p>");
	}
}
