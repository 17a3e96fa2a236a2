/*!
# PrettyMin: Tree Sink.

`html5ever` builds its tree through the `TreeSink` trait, which hands out
shared handles and mutates through `&self`. That doesn't map onto an arena
very nicely, so parsing happens in two stages: the tree builder fills in this
reference-counted scratch tree, and [`Document`](super::Document) then
flattens it.

Each scratch node keeps a weak link to its parent so the builder's
occasional "insert before this node" and "detach this node" requests don't
require searching the tree.
*/

use crate::{
	Error,
	spec,
};
use html5ever::{
	Attribute,
	expanded_name,
	ns,
	local_name,
	ExpandedName,
	interface::{
		ElementFlags,
		NodeOrText,
		QuirksMode,
		TreeSink,
	},
	QualName,
};
use indexmap::IndexMap;
use std::{
	borrow::Cow,
	cell::RefCell,
	rc::{
		Rc,
		Weak,
	},
};
use tendril::StrTendril;



/// # Stand-In Name.
///
/// Returned by [`Sink::elem_name`] for anything that isn't an element.
static PLACEHOLDER_NAME: ExpandedName = expanded_name!(html "div");



/// # Reference-Counted Scratch Node.
pub(super) type Handle = Rc<SinkNode>;



#[derive(Debug)]
/// # Scratch Node.
pub(super) struct SinkNode {
	/// # Node Kind/Data.
	pub(super) inner: SinkInner,

	/// # Parent.
	parent: RefCell<Weak<SinkNode>>,

	/// # Child Node(s).
	pub(super) children: RefCell<Vec<Handle>>,
}

impl SinkNode {
	#[must_use]
	/// # New.
	fn new(inner: SinkInner) -> Handle {
		Rc::new(Self {
			inner,
			parent: RefCell::new(Weak::new()),
			children: RefCell::new(Vec::new()),
		})
	}

	#[must_use]
	/// # Parent and Position.
	fn locate(node: &Handle) -> Option<(Handle, usize)> {
		let parent = node.parent.borrow().upgrade()?;
		let pos = parent.children.borrow().iter().position(|c| Rc::ptr_eq(c, node))?;
		Some((parent, pos))
	}

	/// # Adopt.
	///
	/// Point `child` back at `parent`. The caller is responsible for putting
	/// it in the children list.
	fn adopt(parent: &Handle, child: &Handle) {
		*child.parent.borrow_mut() = Rc::downgrade(parent);
	}

	/// # Insert Child.
	///
	/// Insert `child` into `parent` at index `pos`. Text landing right after
	/// another text node is merged into it, and node types we don't keep are
	/// dropped.
	fn insert(parent: &Handle, pos: usize, child: NodeOrText<Handle>) {
		let children: &mut Vec<Handle> = &mut parent.children.borrow_mut();
		let node = match child {
			NodeOrText::AppendText(txt) => {
				if
					let Some(prev) = pos.checked_sub(1).and_then(|p| children.get(p)) &&
					let SinkInner::Text { ref contents } = prev.inner
				{
					contents.borrow_mut().push_tendril(&txt);
					return;
				}
				Self::new(SinkInner::Text { contents: RefCell::new(txt) })
			},
			NodeOrText::AppendNode(node) => {
				if ! matches!(node.inner, SinkInner::Element { .. } | SinkInner::Comment { .. }) {
					return;
				}
				node
			},
		};

		Self::adopt(parent, &node);
		children.insert(pos.min(children.len()), node);
	}
}



#[derive(Debug)]
/// # Scratch Node Kind/Data.
pub(super) enum SinkInner {
	/// # The Root Node (or Template Contents).
	Document,

	/// # HTML Element.
	Element {
		/// # Tag Name.
		name: QualName,

		/// # Tag Attributes.
		attrs: RefCell<IndexMap<QualName, StrTendril>>,

		/// # Template Contents.
		///
		/// The builder parses `<template>` children into a detached holder;
		/// they're moved back under the element by [`Sink::post_process`].
		template: Option<Handle>,
	},

	/// # Text.
	Text {
		/// # Content.
		contents: RefCell<StrTendril>
	},

	/// # Comment.
	Comment {
		/// # Content.
		contents: StrTendril,
	},

	/// # Doctypes, Processing Instructions.
	Ignored,
}



#[derive(Debug)]
/// # Scratch Tree.
pub(super) struct Sink {
	/// # Document Root.
	pub(super) root: Handle,

	/// # Error.
	error: RefCell<Option<Error>>,
}

impl Default for Sink {
	#[inline]
	fn default() -> Self {
		Self {
			root: SinkNode::new(SinkInner::Document),
			error: RefCell::new(None),
		}
	}
}

impl TreeSink for Sink {
	type Handle = Handle;
	type Output = Self;
	type ElemName<'a> = ExpandedName<'a>
	where Self: 'a;

	/// # Merge Attributes.
	///
	/// Existing attributes win.
	fn add_attrs_if_missing(&self, target: &Handle, new: Vec<Attribute>) {
		if let SinkInner::Element { ref attrs, .. } = target.inner {
			let attrs: &mut IndexMap<_, _> = &mut attrs.borrow_mut();
			for Attribute { name, value } in new {
				attrs.entry(name).or_insert(value);
			}
		}
	}

	/// # Append Child.
	fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
		let len = parent.children.borrow().len();
		SinkNode::insert(parent, len, child);
	}

	/// # Append (Foster Parenting).
	fn append_based_on_parent_node(
		&self,
		sibling: &Handle,
		last_parent: &Handle,
		child: NodeOrText<Self::Handle>,
	) {
		if sibling.parent.borrow().strong_count() == 0 { self.append(last_parent, child); }
		else { self.append_before_sibling(sibling, child); }
	}

	/// # Insert Before Sibling.
	fn append_before_sibling(&self, sibling: &Handle, child: NodeOrText<Handle>) {
		if let Some((parent, pos)) = SinkNode::locate(sibling) {
			SinkNode::insert(&parent, pos, child);
		}
		else { self.fail(); }
	}

	/// # Create Comment.
	fn create_comment(&self, text: StrTendril) -> Handle {
		SinkNode::new(SinkInner::Comment { contents: text })
	}

	/// # Create Element.
	fn create_element(&self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags)
	-> Handle {
		SinkNode::new(SinkInner::Element {
			name,
			attrs: RefCell::new(attrs.into_iter().map(|v| (v.name, v.value)).collect()),
			template: flags.template.then(|| SinkNode::new(SinkInner::Document)),
		})
	}

	/// # Create Processing Instruction.
	fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Handle {
		SinkNode::new(SinkInner::Ignored)
	}

	/// # Element Name.
	fn elem_name<'a>(&self, target: &'a Handle) -> ExpandedName<'a> {
		if let SinkInner::Element { ref name, .. } = target.inner { name.expanded() }
		else {
			self.fail();
			PLACEHOLDER_NAME
		}
	}

	#[inline]
	fn finish(self) -> Self { self }

	fn get_document(&self) -> Handle { Rc::clone(&self.root) }

	/// # Template Contents.
	fn get_template_contents(&self, target: &Handle) -> Handle {
		if let SinkInner::Element { template: Some(ref contents), .. } = target.inner {
			Rc::clone(contents)
		}
		else {
			self.fail();
			SinkNode::new(SinkInner::Ignored)
		}
	}

	/// # Detach.
	fn remove_from_parent(&self, target: &Handle) {
		if let Some((parent, pos)) = SinkNode::locate(target) {
			parent.children.borrow_mut().remove(pos);
		}
		*target.parent.borrow_mut() = Weak::new();
	}

	/// # Move Children.
	fn reparent_children(&self, old_parent: &Handle, new_parent: &Handle) {
		let moved = std::mem::take(&mut *old_parent.children.borrow_mut());
		for child in &moved { SinkNode::adopt(new_parent, child); }
		new_parent.children.borrow_mut().extend(moved);
	}

	fn same_node(&self, x: &Handle, y: &Handle) -> bool { Rc::ptr_eq(x, y) }

	/// # Doctype.
	///
	/// Whole documents are always written with an HTML5 doctype, so the
	/// original is of no interest.
	fn append_doctype_to_document(
		&self,
		_name: StrTendril,
		_public_id: StrTendril,
		_system_id: StrTendril,
	) {}

	fn is_mathml_annotation_xml_integration_point(&self, _node: &Handle) -> bool {
		false
	}

	/// # Parse Error.
	///
	/// Markup errors are recovered from by the builder and don't matter here.
	fn parse_error(&self, _msg: Cow<'static, str>) {}

	fn set_quirks_mode(&self, _mode: QuirksMode) {}
}

impl Sink {
	/// # Record Failure.
	///
	/// Only the first failure is kept.
	fn fail(&self) {
		let mut error = self.error.borrow_mut();
		if error.is_none() { *error = Some(Error::Parse); }
	}

	/// # Take Error.
	///
	/// Return the builder misuse encountered while building the tree, if
	/// any.
	pub(super) fn take_error(&self) -> Option<Error> {
		self.error.borrow_mut().take()
	}

	/// # Post Processing.
	///
	/// Empty out any void elements and move `<template>` contents under their
	/// elements.
	pub(super) fn post_process(&self) {
		/// # Walk.
		fn walk(handle: &Handle) {
			if let SinkInner::Element { ref name, ref template, .. } = handle.inner {
				if spec::is_void_html_tag(name) {
					handle.children.borrow_mut().clear();
					return;
				}

				if let Some(contents) = template {
					let moved = std::mem::take(&mut *contents.children.borrow_mut());
					for child in &moved { SinkNode::adopt(handle, child); }
					handle.children.borrow_mut().extend(moved);
				}
			}

			for child in handle.children.borrow().iter() { walk(child); }
		}

		walk(&self.root);
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use html5ever::{
		ParseOpts,
		tendril::TendrilSink,
	};
	use std::io::Cursor;

	/// # Parse Into Sink.
	fn sink(raw: &[u8]) -> Sink {
		html5ever::parse_document(Sink::default(), ParseOpts::default())
			.from_utf8()
			.read_from(&mut Cursor::new(raw))
			.expect("Tree parse failed.")
	}

	/// # Find First Element by Tag.
	fn find(handle: &Handle, tag: &str) -> Option<Handle> {
		for child in handle.children.borrow().iter() {
			if
				let SinkInner::Element { ref name, .. } = child.inner &&
				&*name.local == tag
			{
				return Some(Rc::clone(child));
			}
			if let Some(out) = find(child, tag) { return Some(out); }
		}
		None
	}

	/// # Text Contents.
	fn text(handle: &Handle) -> Option<String> {
		if let SinkInner::Text { ref contents } = handle.inner {
			Some(contents.borrow().to_string())
		}
		else { None }
	}

	#[test]
	fn t_parents() {
		/// # Check Links.
		fn check(handle: &Handle) {
			for child in handle.children.borrow().iter() {
				let parent = child.parent.borrow().upgrade().expect("Missing parent.");
				assert!(Rc::ptr_eq(&parent, handle));
				check(child);
			}
		}

		// Misnested markup makes the builder shuffle things around.
		let tree = sink(b"<table><tr><td>1</td></tr>oops<b>2<p>3</b>4</p></table>");
		tree.post_process();
		check(&tree.root);
	}

	#[test]
	fn t_remove_from_parent() {
		let tree = sink(b"<div><span></span><i></i></div>");
		let div = find(&tree.root, "div").expect("Missing div.");
		let span = find(&div, "span").expect("Missing span.");

		tree.remove_from_parent(&span);
		assert!(span.parent.borrow().upgrade().is_none());
		assert!(find(&div, "span").is_none());
		assert_eq!(div.children.borrow().len(), 1);

		// Again is fine.
		tree.remove_from_parent(&span);
		assert_eq!(div.children.borrow().len(), 1);
	}

	#[test]
	fn t_append_before_sibling() {
		let tree = sink(b"<div>Hello<span></span></div>");
		let div = find(&tree.root, "div").expect("Missing div.");
		let span = find(&div, "span").expect("Missing span.");

		// Text before the span merges with the text before that.
		tree.append_before_sibling(&span, NodeOrText::AppendText(StrTendril::from(" World")));
		{
			let children = div.children.borrow();
			assert_eq!(children.len(), 2);
			assert_eq!(text(&children[0]).as_deref(), Some("Hello World"));
			assert!(Rc::ptr_eq(&children[1], &span));
		}

		// Text before the first child is new.
		let first = Rc::clone(&div.children.borrow()[0]);
		tree.append_before_sibling(&first, NodeOrText::AppendText(StrTendril::from(">")));
		let children = div.children.borrow();
		assert_eq!(children.len(), 3);
		assert_eq!(text(&children[0]).as_deref(), Some(">"));

		// Orphans can't have siblings.
		let orphan = tree.create_comment(StrTendril::from("x"));
		tree.append_before_sibling(&orphan, NodeOrText::AppendText(StrTendril::from("y")));
		assert_eq!(tree.take_error(), Some(Error::Parse));
	}

	#[test]
	fn t_comments_kept() {
		let tree = sink(b"<html><body><!-- Hi --><p>Yo</p></body></html>");
		let body = find(&tree.root, "body").expect("Missing body.");
		let children = body.children.borrow();
		assert!(matches!(
			children[0].inner,
			SinkInner::Comment { ref contents } if contents.as_ref() == " Hi "
		));
	}

	#[test]
	fn t_post_process() {
		let tree = sink(b"<html><body><template><p>Hi</p></template></body></html>");
		let template = find(&tree.root, "template").expect("Missing template.");
		assert!(template.children.borrow().is_empty());

		tree.post_process();
		let children = template.children.borrow();
		assert_eq!(children.len(), 1);
		assert!(matches!(
			children[0].inner,
			SinkInner::Element { ref name, .. } if name.local == local_name!("p")
		));
		assert!(Rc::ptr_eq(
			&children[0].parent.borrow().upgrade().expect("Missing parent."),
			&template,
		));
	}
}
