/*!
# PrettyMin: Whitespace.

Whitespace in HTML text is _usually_ formatting noise, but not always. Inside
raw-text elements like `<pre>` it is content, and next to inline elements like
`<b>` a single space is a word separator.

[`WhiteSpace`] holds the two tag lists that decide which is which, and
[`WhiteSpace::normalize`] collapses and trims text nodes accordingly.
*/

use crate::{
	Document,
	NodeId,
	NodeKind,
};
use html5ever::LocalName;
use std::collections::HashSet;
use tendril::StrTendril;



#[derive(Debug, Clone, Default)]
/// # Whitespace Classifier.
///
/// Tag names are compared exactly as stored; no case folding is performed.
/// (The HTML parser lowercases element names on its own.)
pub struct WhiteSpace {
	/// # Raw-Text Tags.
	raw_text: HashSet<LocalName>,

	/// # Inline Tags.
	inline: HashSet<LocalName>,
}

impl WhiteSpace {
	#[must_use]
	/// # New.
	pub fn new<I1, I2, S1, S2>(raw_text: I1, inline: I2) -> Self
	where
		I1: IntoIterator<Item = S1>,
		I2: IntoIterator<Item = S2>,
		S1: AsRef<str>,
		S2: AsRef<str>,
	{
		Self {
			raw_text: raw_text.into_iter().map(|s| LocalName::from(s.as_ref())).collect(),
			inline: inline.into_iter().map(|s| LocalName::from(s.as_ref())).collect(),
		}
	}

	#[must_use]
	/// # Is Raw Text?
	///
	/// Whitespace inside these elements is preserved verbatim.
	pub fn is_raw_text(&self, tag: &LocalName) -> bool { self.raw_text.contains(tag) }

	#[must_use]
	/// # Is Inline?
	///
	/// Whitespace next to these elements separates words.
	pub fn is_inline(&self, tag: &LocalName) -> bool { self.inline.contains(tag) }

	#[must_use]
	/// # Is Raw-Text Node?
	///
	/// Returns `true` if `id` is a raw-text element.
	pub fn is_raw_text_node(&self, doc: &Document, id: NodeId) -> bool {
		doc.local_name(id).is_some_and(|t| self.is_raw_text(t))
	}

	#[must_use]
	/// # Is Inline Node?
	///
	/// Returns `true` if `id` is an inline element.
	pub fn is_inline_node(&self, doc: &Document, id: NodeId) -> bool {
		doc.local_name(id).is_some_and(|t| self.is_inline(t))
	}

	#[must_use]
	/// # Has Raw-Text Parent?
	///
	/// Returns `true` if the immediate parent of `id` is a raw-text element.
	/// Deeper ancestors are not considered.
	pub fn has_raw_text_parent(&self, doc: &Document, id: NodeId) -> bool {
		doc.parent(id).is_some_and(|p| self.is_raw_text_node(doc, p))
	}
}

impl WhiteSpace {
	/// # Normalize Text Nodes.
	///
	/// Visit every text node in document order, collapsing its whitespace to
	/// single spaces and trimming the edges unless they border an inline
	/// element. Text sitting directly inside a raw-text element is left
	/// alone, and text that winds up empty is removed.
	///
	/// Running this on an already-normalized tree changes nothing.
	pub fn normalize(&self, doc: &mut Document) {
		for id in doc.descendants(doc.root()) {
			// Text nodes only, and not directly under a raw-text element.
			let NodeKind::Text(ref txt) = *doc.kind(id) else { continue; };
			if self.has_raw_text_parent(doc, id) { continue; }

			let mut new = collapse(txt.as_ref());

			// Trim unless the parent is inline.
			if ! doc.parent(id).is_some_and(|p| self.is_inline_node(doc, p)) {
				if ! doc.prev_sibling(id).is_some_and(|s| self.is_inline_node(doc, s)) {
					trim_start(&mut new);
				}
				if ! doc.next_sibling(id).is_some_and(|s| self.is_inline_node(doc, s)) {
					trim_end(&mut new);
				}
			}

			// Drop it or update it.
			if new.is_empty() { doc.detach(id); }
			else if txt.as_ref() != new {
				doc.set_text(id, StrTendril::from(new));
			}
		}
	}
}



#[must_use]
/// # Collapse Whitespace.
///
/// Convert each CR, LF, and tab to a regular space, then squash any
/// consecutive spaces down to one.
fn collapse(txt: &str) -> String {
	let mut out = String::with_capacity(txt.len());
	let mut in_ws = false;
	for c in txt.chars() {
		if matches!(c, '\r' | '\n' | '\t' | ' ') {
			if ! in_ws {
				in_ws = true;
				out.push(' ');
			}
		}
		else {
			in_ws = false;
			out.push(c);
		}
	}
	out
}

/// # Trim Start.
///
/// After collapsing there can be at most one leading space.
fn trim_start(txt: &mut String) {
	if txt.starts_with(' ') { txt.remove(0); }
}

/// # Trim End.
fn trim_end(txt: &mut String) {
	if txt.ends_with(' ') { txt.pop(); }
}
