/*!
# PrettyMin: DOM.

The document tree is an arena: every node lives in a single `Vec` owned by the
[`Document`], and the parent/child/sibling relationships are plain indices
into it. That keeps the tree free of reference cycles while still allowing
constant-time adjacency lookups in either direction.

Detached nodes stay in the arena, unreachable from the root, until the
document itself is dropped.
*/

pub(super) mod node;
mod sink;

use crate::{
	Error,
	spec,
};
use html5ever::{
	LocalName,
	ns,
	ParseOpts,
	QualName,
	tendril::TendrilSink,
	tree_builder::TreeBuilderOpts,
};
use indexmap::IndexMap;
use node::Node;
pub use node::{
	NodeId,
	NodeKind,
};
use sink::{
	Handle,
	Sink,
	SinkInner,
};
use std::io::Cursor;
use tendril::StrTendril;



/// # Fragment Open.
const FRAGMENT_OPEN: &str = "<prettymin-fragment>";

/// # Fragment Close.
const FRAGMENT_CLOSE: &str = "</prettymin-fragment>";

/// # Fragment Marker Tag.
const FRAGMENT_TAG: &str = "prettymin-fragment";



#[derive(Debug, Clone)]
/// # HTML Document.
///
/// An arena-backed HTML tree with exactly one root element.
///
/// Documents are usually built with [`Document::parse`], but can also be
/// assembled by hand with [`Document::new`] and the `create_*`/`append`
/// methods.
pub struct Document {
	/// # Node Arena.
	nodes: Vec<Node>,

	/// # Root Element.
	root: NodeId,

	/// # Comments Before the Root.
	prologue: Vec<NodeId>,

	/// # Comments After the Root.
	epilogue: Vec<NodeId>,

	/// # Fragment?
	///
	/// Fragment roots are placeholders; only their children are serialized.
	fragment: bool,
}

impl Document {
	#[must_use]
	/// # New.
	///
	/// Create a new document consisting of a single, empty root element.
	pub fn new(root: QualName) -> Self {
		Self {
			nodes: vec![Node::new(NodeKind::Element {
				name: root,
				attrs: IndexMap::new(),
			})],
			root: NodeId(0),
			prologue: Vec::new(),
			epilogue: Vec::new(),
			fragment: false,
		}
	}

	/// # Parse.
	///
	/// Parse raw HTML into a document.
	///
	/// Markup missing `<html>` and `<body>` tags is treated as a fragment;
	/// its nodes are parsed in a body context and held by a placeholder root
	/// that is omitted again during serialization.
	///
	/// Doctypes and processing instructions are discarded. Comments sitting
	/// outside the root element are kept on the side; see
	/// [`Document::prologue`] and [`Document::epilogue`].
	///
	/// ## Errors
	///
	/// An error is returned if the tree builder chokes or no root element
	/// results.
	pub fn parse(raw: &[u8]) -> Result<Self, Error> {
		let fragment = spec::is_fragment(raw);
		let mut wrapped = Vec::new();
		let raw =
			if fragment {
				wrapped.reserve(FRAGMENT_OPEN.len() + raw.len() + FRAGMENT_CLOSE.len());
				wrapped.extend_from_slice(FRAGMENT_OPEN.as_bytes());
				wrapped.extend_from_slice(raw);
				wrapped.extend_from_slice(FRAGMENT_CLOSE.as_bytes());
				wrapped.as_slice()
			}
			else { raw };

		// We don't care about the doctype; we'll write our own.
		let opts = ParseOpts {
			tree_builder: TreeBuilderOpts {
				drop_doctype: true,
				..TreeBuilderOpts::default()
			},
			..ParseOpts::default()
		};

		let sink = html5ever::parse_document(Sink::default(), opts)
			.from_utf8()
			.read_from(&mut Cursor::new(raw))
			.map_err(|_| Error::Parse)?;

		if let Some(e) = sink.take_error() { return Err(e); }
		sink.post_process();

		// Find the root.
		let root = (
			if fragment { find_fragment_marker(&sink.root) }
			else {
				sink.root.children.borrow()
					.iter()
					.find(|v| matches!(v.inner, SinkInner::Element { .. }))
					.cloned()
			}
		).ok_or(Error::Parse)?;

		let mut out = Self {
			nodes: Vec::new(),
			root: NodeId(0),
			prologue: Vec::new(),
			epilogue: Vec::new(),
			fragment,
		};
		out.root = out.import(&root).ok_or(Error::Parse)?;

		// Hang onto top-level comments too. (Fragments can't have any.)
		if ! fragment {
			let mut before = true;
			for handle in sink.root.children.borrow().iter() {
				if Handle::ptr_eq(handle, &root) { before = false; }
				else if
					matches!(handle.inner, SinkInner::Comment { .. }) &&
					let Some(id) = out.import(handle)
				{
					if before { out.prologue.push(id); }
					else { out.epilogue.push(id); }
				}
			}
		}

		Ok(out)
	}

	/// # Import Scratch Node.
	///
	/// Copy a scratch node and its descendants into the arena, returning the
	/// new (detached) ID. Placeholder nodes are skipped.
	fn import(&mut self, handle: &Handle) -> Option<NodeId> {
		let kind = match handle.inner {
			SinkInner::Element { ref name, ref attrs, .. } => NodeKind::Element {
				name: name.clone(),
				attrs: attrs.take(),
			},
			SinkInner::Text { ref contents } => NodeKind::Text(contents.take()),
			SinkInner::Comment { ref contents } => NodeKind::Comment(contents.clone()),
			SinkInner::Document | SinkInner::Ignored => return None,
		};

		let id = self.push(kind);
		for child in handle.children.borrow().iter() {
			if let Some(child) = self.import(child) { self.append(id, child); }
		}

		Some(id)
	}

	/// # Push Node.
	fn push(&mut self, kind: NodeKind) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node::new(kind));
		id
	}
}

/// ## Getters.
impl Document {
	#[must_use]
	/// # Root Element.
	pub const fn root(&self) -> NodeId { self.root }

	#[must_use]
	/// # Is Fragment?
	pub const fn is_fragment(&self) -> bool { self.fragment }

	#[must_use]
	/// # Node Kind/Data.
	///
	/// ## Panics
	///
	/// This will panic if `id` belongs to some other document.
	pub fn kind(&self, id: NodeId) -> &NodeKind { &self.nodes[id.0].kind }

	#[must_use]
	/// # Node Kind/Data (Mutable).
	///
	/// ## Panics
	///
	/// This will panic if `id` belongs to some other document.
	pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
		&mut self.nodes[id.0].kind
	}

	#[must_use]
	/// # Element Name.
	pub fn name(&self, id: NodeId) -> Option<&QualName> { self.kind(id).name() }

	#[must_use]
	/// # Element Local Name.
	pub fn local_name(&self, id: NodeId) -> Option<&LocalName> {
		self.name(id).map(|n| &n.local)
	}

	#[must_use]
	/// # Parent.
	pub fn parent(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].parent }

	#[must_use]
	/// # Previous Sibling.
	pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].prev }

	#[must_use]
	/// # Next Sibling.
	pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].next }

	#[must_use]
	/// # First Child.
	pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].first_child
	}

	#[must_use]
	/// # Last Child.
	pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].last_child
	}

	#[must_use]
	/// # Has Children?
	pub fn has_children(&self, id: NodeId) -> bool {
		self.nodes[id.0].first_child.is_some()
	}

	#[must_use]
	/// # Children.
	pub fn children(&self, id: NodeId) -> Children<'_> {
		Children {
			doc: self,
			next: self.nodes[id.0].first_child,
		}
	}

	#[must_use]
	/// # Prologue.
	///
	/// Return the comments preceding the root element, if any.
	pub fn prologue(&self) -> &[NodeId] { &self.prologue }

	#[must_use]
	/// # Epilogue.
	///
	/// Return the comments following the root element, if any.
	pub fn epilogue(&self) -> &[NodeId] { &self.epilogue }

	#[must_use]
	/// # All Nodes.
	///
	/// Return the prologue, the root and its descendants, and the epilogue,
	/// in document order. Like [`Document::descendants`], this is a snapshot.
	pub fn all_nodes(&self) -> Vec<NodeId> {
		let mut out = self.prologue.clone();
		out.extend(self.descendants(self.root));
		out.extend_from_slice(&self.epilogue);
		out
	}

	#[must_use]
	/// # Descendants.
	///
	/// Return `id` and all of its descendants, in document order.
	///
	/// This is a snapshot; the tree can be freely modified while working
	/// through the result.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![id];
		while let Some(next) = stack.pop() {
			out.push(next);

			// Push the children in reverse so the first pops first.
			let mut child = self.nodes[next.0].last_child;
			while let Some(c) = child {
				stack.push(c);
				child = self.nodes[c.0].prev;
			}
		}

		out
	}

	#[must_use]
	/// # Attribute Value.
	///
	/// Return the value of the (un-namespaced) attribute `key` if the node is
	/// an element and has it.
	pub fn attr(&self, id: NodeId, key: &LocalName) -> Option<&str> {
		if let NodeKind::Element { attrs, .. } = self.kind(id) {
			attrs.iter()
				.find(|(k, _)| matches!(k.ns, ns!()) && k.local == *key)
				.map(|(_, v)| v.as_ref())
		}
		else { None }
	}

	#[must_use]
	/// # Text Content.
	///
	/// Return the concatenated contents of all text (and raw text)
	/// descendants of `id`, or the contents of `id` itself if it is a
	/// text-ish node.
	pub fn text_content(&self, id: NodeId) -> String {
		let mut out = String::new();
		for n in self.descendants(id) {
			if let NodeKind::Text(v) | NodeKind::RawText(v) = self.kind(n) {
				out.push_str(v.as_ref());
			}
		}
		out
	}
}

/// ## Mutation.
impl Document {
	/// # Create Element.
	///
	/// Add a new, detached element to the arena.
	pub fn create_element<I>(&mut self, name: QualName, attrs: I) -> NodeId
	where I: IntoIterator<Item = (QualName, StrTendril)> {
		self.push(NodeKind::Element {
			name,
			attrs: attrs.into_iter().collect(),
		})
	}

	/// # Create Text.
	///
	/// Add a new, detached text node to the arena.
	pub fn create_text<S: Into<StrTendril>>(&mut self, text: S) -> NodeId {
		self.push(NodeKind::Text(text.into()))
	}

	/// # Create Raw Text.
	///
	/// Add a new, detached raw (unescaped) text node to the arena.
	pub fn create_raw_text<S: Into<StrTendril>>(&mut self, text: S) -> NodeId {
		self.push(NodeKind::RawText(text.into()))
	}

	/// # Create Comment.
	///
	/// Add a new, detached comment to the arena.
	pub fn create_comment<S: Into<StrTendril>>(&mut self, text: S) -> NodeId {
		self.push(NodeKind::Comment(text.into()))
	}

	/// # Append Child.
	///
	/// Attach `child` as the new last child of `parent`, detaching it from
	/// wherever it was first.
	///
	/// ## Panics
	///
	/// This will panic if `parent` is a text-ish or comment node, or if
	/// `child` is `parent` or the document root.
	pub fn append(&mut self, parent: NodeId, child: NodeId) {
		assert!(
			matches!(self.kind(parent), NodeKind::Element { .. }),
			"BUG: only elements can have children.",
		);
		assert!(parent != child && child != self.root, "BUG: invalid child.");

		self.detach(child);
		let last = self.nodes[parent.0].last_child;
		{
			let node = &mut self.nodes[child.0];
			node.parent = Some(parent);
			node.prev = last;
		}

		if let Some(last) = last { self.nodes[last.0].next = Some(child); }
		else { self.nodes[parent.0].first_child = Some(child); }
		self.nodes[parent.0].last_child = Some(child);
	}

	/// # Insert Before.
	///
	/// Attach `new` as the previous sibling of `sibling`, detaching it from
	/// wherever it was first. Nothing happens if `sibling` has no parent.
	pub fn insert_before(&mut self, sibling: NodeId, new: NodeId) {
		if sibling == new || new == self.root { return; }
		let Some(parent) = self.nodes[sibling.0].parent else { return; };

		self.detach(new);
		let prev = self.nodes[sibling.0].prev;
		{
			let node = &mut self.nodes[new.0];
			node.parent = Some(parent);
			node.prev = prev;
			node.next = Some(sibling);
		}

		self.nodes[sibling.0].prev = Some(new);
		if let Some(prev) = prev { self.nodes[prev.0].next = Some(new); }
		else { self.nodes[parent.0].first_child = Some(new); }
	}

	/// # Detach.
	///
	/// Unlink a node (and by extension its descendants) from its parent and
	/// siblings, or from the prologue/epilogue. Detaching a detached node is
	/// a no-op.
	pub fn detach(&mut self, id: NodeId) {
		let node = &mut self.nodes[id.0];
		let (parent, prev, next) = (node.parent.take(), node.prev.take(), node.next.take());

		if parent.is_none() {
			self.prologue.retain(|&v| v != id);
			self.epilogue.retain(|&v| v != id);
			return;
		}

		if let Some(prev) = prev { self.nodes[prev.0].next = next; }
		else if let Some(parent) = parent { self.nodes[parent.0].first_child = next; }

		if let Some(next) = next { self.nodes[next.0].prev = prev; }
		else if let Some(parent) = parent { self.nodes[parent.0].last_child = prev; }
	}

	/// # Remove Children.
	///
	/// Detach all of a node's children.
	pub fn remove_children(&mut self, id: NodeId) {
		while let Some(child) = self.nodes[id.0].first_child { self.detach(child); }
	}

	/// # Set Text.
	///
	/// Replace the contents of a text-ish or comment node. Elements are left
	/// alone.
	pub fn set_text<S: Into<StrTendril>>(&mut self, id: NodeId, text: S) {
		match self.kind_mut(id) {
			NodeKind::Text(v) | NodeKind::Comment(v) | NodeKind::RawText(v) => {
				*v = text.into();
			},
			NodeKind::Element { .. } => {},
		}
	}

	/// # Remove Attribute.
	///
	/// Remove the (un-namespaced) attribute `key` from an element, keeping the
	/// order of the rest intact. Returns `true` if something was removed.
	pub fn remove_attr(&mut self, id: NodeId, key: &LocalName) -> bool {
		if let NodeKind::Element { attrs, .. } = self.kind_mut(id) {
			let before = attrs.len();
			attrs.retain(|k, _| ! (matches!(k.ns, ns!()) && k.local == *key));
			attrs.len() != before
		}
		else { false }
	}
}



#[derive(Debug, Clone)]
/// # Child Iterator.
///
/// Walk the (current) children of a node, first to last.
pub struct Children<'a> {
	/// # Document.
	doc: &'a Document,

	/// # Next Child.
	next: Option<NodeId>,
}

impl Iterator for Children<'_> {
	type Item = NodeId;

	fn next(&mut self) -> Option<Self::Item> {
		let out = self.next?;
		self.next = self.doc.nodes[out.0].next;
		Some(out)
	}
}



/// # Find Fragment Marker.
///
/// The wrapper element winds up somewhere under `<body>`.
fn find_fragment_marker(handle: &Handle) -> Option<Handle> {
	for child in handle.children.borrow().iter() {
		if
			let SinkInner::Element { ref name, .. } = child.inner &&
			&*name.local == FRAGMENT_TAG
		{
			return Some(Handle::clone(child));
		}

		if let Some(out) = find_fragment_marker(child) { return Some(out); }
	}

	None
}



#[cfg(test)]
mod tests {
	use super::*;
	use html5ever::local_name;

	/// # HTML Name.
	fn html(local: LocalName) -> QualName { QualName::new(None, ns!(html), local) }

	#[test]
	fn t_parse_document() {
		let doc = Document::parse(b"<!DOCTYPE html><html><head></head><body><!-- Hi --><p class=a>One &amp; two</p></body></html>")
			.expect("Parse failed.");
		assert!(! doc.is_fragment());

		let root = doc.root();
		assert_eq!(doc.local_name(root), Some(&local_name!("html")));

		let body = doc.last_child(root).expect("Missing body.");
		assert_eq!(doc.local_name(body), Some(&local_name!("body")));

		let kids: Vec<_> = doc.children(body).collect();
		assert_eq!(kids.len(), 2);
		assert_eq!(doc.kind(kids[0]).contents(), Some(" Hi "));
		assert!(matches!(doc.kind(kids[0]), NodeKind::Comment(_)));
		assert_eq!(doc.attr(kids[1], &local_name!("class")), Some("a"));
		assert_eq!(doc.text_content(kids[1]), "One & two");
	}

	#[test]
	fn t_parse_outer_comments() {
		let mut doc = Document::parse(b"<!DOCTYPE html>\n<!--[if IE]><p>Old</p><![endif]--><!-- Two --><html><body>Hi</body></html><!-- Bye -->")
			.expect("Parse failed.");

		let pro: Vec<_> = doc.prologue().iter()
			.filter_map(|&id| doc.kind(id).contents())
			.collect();
		assert_eq!(pro, ["[if IE]><p>Old</p><![endif]", " Two "]);

		let epi: Vec<_> = doc.epilogue().iter()
			.filter_map(|&id| doc.kind(id).contents())
			.collect();
		assert_eq!(epi, [" Bye "]);

		// They aren't part of the root's tree, but are part of the whole.
		let first = doc.prologue()[0];
		assert_eq!(doc.parent(first), None);
		assert!(! doc.descendants(doc.root()).contains(&first));
		let all = doc.all_nodes();
		assert_eq!(all.first(), Some(&first));
		assert_eq!(all.last(), doc.epilogue().last());

		// Detaching removes them.
		doc.detach(first);
		assert_eq!(doc.prologue().len(), 1);
		assert!(! doc.all_nodes().contains(&first));

		// Fragments never have any.
		let doc = Document::parse(b"<!-- A --><p>B</p><!-- C -->").expect("Parse failed.");
		assert!(doc.prologue().is_empty());
		assert!(doc.epilogue().is_empty());
		assert_eq!(doc.children(doc.root()).count(), 3);
	}

	#[test]
	fn t_parse_fragment() {
		let doc = Document::parse(b"<p>One</p> <p>Two</p>").expect("Parse failed.");
		assert!(doc.is_fragment());

		let root = doc.root();
		assert_eq!(doc.local_name(root).map(|v| &**v), Some(FRAGMENT_TAG));
		assert_eq!(doc.parent(root), None);
		assert_eq!(doc.children(root).count(), 3);
	}

	#[test]
	fn t_descendants() {
		let doc = Document::parse(b"<div><p>A<b>B</b></p>C</div>").expect("Parse failed.");
		let text: Vec<_> = doc.descendants(doc.root())
			.into_iter()
			.filter_map(|id| doc.kind(id).contents())
			.collect();
		assert_eq!(text, ["A", "B", "C"]);
	}

	#[test]
	fn t_mutation() {
		let mut doc = Document::new(html(local_name!("ul")));
		let root = doc.root();

		let a = doc.create_element(html(local_name!("li")), []);
		let b = doc.create_element(html(local_name!("li")), []);
		let t = doc.create_text("x");
		doc.append(root, a);
		doc.append(root, b);
		doc.insert_before(b, t);
		assert_eq!(doc.children(root).collect::<Vec<_>>(), [a, t, b]);
		assert_eq!(doc.prev_sibling(b), Some(t));
		assert_eq!(doc.next_sibling(a), Some(t));

		// Detach from the middle.
		doc.detach(t);
		assert_eq!(doc.children(root).collect::<Vec<_>>(), [a, b]);
		assert_eq!(doc.parent(t), None);
		assert_eq!(doc.next_sibling(a), Some(b));

		// Insert at the front.
		doc.insert_before(a, t);
		assert_eq!(doc.first_child(root), Some(t));

		// Move to the end.
		doc.append(root, t);
		assert_eq!(doc.children(root).collect::<Vec<_>>(), [a, b, t]);
		assert_eq!(doc.last_child(root), Some(t));

		// Clear.
		doc.remove_children(root);
		assert!(! doc.has_children(root));
		assert_eq!(doc.parent(a), None);
	}

	#[test]
	fn t_remove_attr() {
		let mut doc = Document::parse(b"<p id=x class=\"\" title=y>Hi</p>").expect("Parse failed.");
		let p = doc.first_child(doc.root()).expect("Missing p.");
		assert!(doc.remove_attr(p, &local_name!("class")));
		assert!(! doc.remove_attr(p, &local_name!("class")));

		let NodeKind::Element { attrs, .. } = doc.kind(p) else { panic!("Not an element."); };
		let keys: Vec<_> = attrs.keys().map(|k| &*k.local).collect();
		assert_eq!(keys, ["id", "title"]);
	}
}
