/*!
# PrettyMin: DOM Node.
*/

use html5ever::QualName;
use indexmap::IndexMap;
use std::fmt;
use tendril::StrTendril;



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Node ID.
///
/// This is a plain index into the [`Document`](super::Document) arena that
/// owns the node. It is only meaningful for that document.
pub struct NodeId(pub(super) usize);

impl fmt::Display for NodeId {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}



#[derive(Debug, Clone)]
/// # Node Kind/Data.
///
/// This enum holds the details for a given node, differentiated by kind.
pub enum NodeKind {
	/// # Element.
	Element {
		/// # Tag Name.
		name: QualName,

		/// # Tag Attributes.
		attrs: IndexMap<QualName, StrTendril>,
	},

	/// # Text.
	///
	/// Written out with the usual entity escaping, unless the parent is one
	/// of the handful of elements that forbid it.
	Text(StrTendril),

	/// # Comment.
	Comment(StrTendril),

	/// # Raw Text.
	///
	/// Literal content, written out verbatim. This is what minified scripts
	/// and styles are wrapped in.
	RawText(StrTendril),
}

impl NodeKind {
	#[must_use]
	/// # Element Name.
	pub const fn name(&self) -> Option<&QualName> {
		if let Self::Element { name, .. } = self { Some(name) }
		else { None }
	}

	#[must_use]
	/// # Text Contents.
	///
	/// Return the contents of a text, raw text, or comment node.
	pub fn contents(&self) -> Option<&str> {
		match self {
			Self::Text(v) | Self::Comment(v) | Self::RawText(v) => Some(v.as_ref()),
			Self::Element { .. } => None,
		}
	}

	#[must_use]
	/// # Is Text-ish?
	///
	/// Returns `true` for both escaped and raw text.
	pub const fn is_text(&self) -> bool {
		matches!(self, Self::Text(_) | Self::RawText(_))
	}
}



#[derive(Debug, Clone)]
/// # DOM Node.
///
/// A node's kind/data, plus its (non-owning) links to the rest of the tree.
pub(super) struct Node {
	/// # Kind/Data.
	pub(super) kind: NodeKind,

	/// # Parent.
	pub(super) parent: Option<NodeId>,

	/// # Previous Sibling.
	pub(super) prev: Option<NodeId>,

	/// # Next Sibling.
	pub(super) next: Option<NodeId>,

	/// # First Child.
	pub(super) first_child: Option<NodeId>,

	/// # Last Child.
	pub(super) last_child: Option<NodeId>,
}

impl Node {
	#[must_use]
	/// # New (Detached).
	pub(super) const fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			parent: None,
			prev: None,
			next: None,
			first_child: None,
			last_child: None,
		}
	}
}
