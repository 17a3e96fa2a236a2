/*!
# PrettyMin: Questions of Spec.
*/

use html5ever::{
	interface::QualName,
	local_name,
	ns,
};



/// # Default Inline Tags.
///
/// Whitespace around these elements separates words, so has to be kept.
pub(crate) const INLINE_TAGS: [&str; 30] = [
	"b", "big", "i", "small", "tt",
	"abbr", "acronym", "cite", "code", "dfn", "em", "kbd", "strong", "samp", "var",
	"a", "bdo", "br", "img", "map", "object", "q", "span", "sub", "sup",
	"button", "input", "label", "select", "textarea",
];

/// # Default Raw-Text Tags.
///
/// Whitespace inside these elements is preserved verbatim.
pub(crate) const RAW_TEXT_TAGS: [&str; 3] = ["script", "style", "pre"];

/// # Default Strip-If-Empty Attributes.
pub(crate) const EMPTY_ATTRIBUTES: [&str; 2] = ["style", "class"];

/// # Default Comment Exceptions.
///
/// Conditional comments, e.g. `<!--[if IE]>…<![endif]-->`, and the closing
/// half of their "downlevel-revealed" cousins, `<!--<![endif]-->`.
pub(crate) const COMMENT_EXCEPTIONS: [&str; 2] = [r"^\[if ", r"^<!\[endif\]"];

/// # Default Indentation.
pub(crate) const INDENT_UNIT: &str = "\t";



#[must_use]
/// # Is Void HTML Element?
pub(crate) const fn is_void_html_tag(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) &&
	matches!(
		tag.local,
		local_name!("area") |
		local_name!("base") |
		local_name!("basefont") |
		local_name!("bgsound") |
		local_name!("br") |
		local_name!("col") |
		local_name!("embed") |
		local_name!("frame") |
		local_name!("hr") |
		local_name!("img") |
		local_name!("input") |
		local_name!("keygen") |
		local_name!("link") |
		local_name!("meta") |
		local_name!("param") |
		local_name!("source") |
		local_name!("track") |
		local_name!("wbr")
	)
}

#[must_use]
/// # Is Plain-Text HTML Element?
///
/// Text directly inside these elements is written back out _without_ the
/// usual entity escaping.
pub(crate) const fn is_plain_text_tag(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) &&
	matches!(
		tag.local,
		local_name!("noscript") |
		local_name!("plaintext") |
		local_name!("script") |
		local_name!("style") |
		local_name!("xmp")
	)
}

#[must_use]
/// # Is Script Element?
pub(crate) const fn is_script(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) && matches!(tag.local, local_name!("script"))
}

#[must_use]
/// # Is Style Element?
pub(crate) const fn is_style(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) && matches!(tag.local, local_name!("style"))
}

#[must_use]
/// # Is Fragment?
///
/// This returns `false` if the document contains (case-insensitively)
/// `<html`, `<body`, `</body>`, or `</html>`.
pub(crate) fn is_fragment(src: &[u8]) -> bool {
	for w in src.windows(7) {
		if w[0] == b'<' {
			match w[1] {
				b'/' => if w[6] == b'>' {
					let mid = &w[2..6];
					if mid.eq_ignore_ascii_case(b"body") || mid.eq_ignore_ascii_case(b"html") {
						return false;
					}
				},
				b'b' | b'B' => if w[2..5].eq_ignore_ascii_case(b"ody") { return false; },
				b'h' | b'H' => if w[2..5].eq_ignore_ascii_case(b"tml") { return false; },
				_ => {},
			}
		}
	}

	true
}

#[must_use]
/// # Is (Only) Whitespace?
///
/// Returns `true` if the text is empty or contains only whitespace.
pub(crate) const fn is_whitespace(mut txt: &[u8]) -> bool {
	while let [b'\t' | b'\n' | b'\x0C' | b'\r' | b' ', rest @ ..] = txt { txt = rest; }
	txt.is_empty()
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_is_void_html_tag() {
		for (tag, expected) in [
			(local_name!("br"), true),
			(local_name!("img"), true),
			(local_name!("input"), true),
			(local_name!("div"), false),
			(local_name!("script"), false),
		] {
			let name = QualName::new(None, ns!(html), tag);
			assert_eq!(is_void_html_tag(&name), expected, "{name:?}");
		}

		// Foreign elements are never void.
		let name = QualName::new(None, ns!(svg), local_name!("img"));
		assert!(! is_void_html_tag(&name));
	}

	#[test]
	fn t_is_fragment() {
		assert!(! is_fragment(include_bytes!("../skel/test-assets/document.html")));
		assert!(is_fragment(include_bytes!("../skel/test-assets/fragment.html")));
		assert!(! is_fragment(b"<p>Hello</p></BODY>"));
		assert!(is_fragment(b"<p>Hello <b>World</b></p>"));
	}

	#[test]
	fn t_is_whitespace() {
		assert!(is_whitespace(b""));
		assert!(is_whitespace(b"  \t\n  \x0C\r"));
		assert!(! is_whitespace(b"  a "));
	}
}
