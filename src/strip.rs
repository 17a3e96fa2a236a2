/*!
# PrettyMin: Stripping.
*/

use crate::{
	Document,
	NodeKind,
};
use html5ever::LocalName;
use regex::Regex;



/// # Strip Empty Attributes.
///
/// Remove each of the named attributes from every element where its value is
/// empty or whitespace-only.
pub fn strip_empty_attributes(doc: &mut Document, names: &[LocalName]) {
	if names.is_empty() { return; }

	for id in doc.descendants(doc.root()) {
		for name in names {
			if doc.attr(id, name).is_some_and(|v| v.trim().is_empty()) {
				doc.remove_attr(id, name);
			}
		}
	}
}

/// # Strip Comments.
///
/// Remove every comment that doesn't match at least one of the `exceptions`,
/// including those sitting outside the root element.
pub fn strip_comments(doc: &mut Document, exceptions: &[Regex]) {
	for id in doc.all_nodes() {
		if
			let NodeKind::Comment(ref v) = *doc.kind(id) &&
			! exceptions.iter().any(|re| re.is_match(v.as_ref()))
		{
			doc.detach(id);
		}
	}
}
