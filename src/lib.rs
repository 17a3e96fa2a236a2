/*!
# PrettyMin

`PrettyMin` is an HTML minifier _and_ re-indenter that works directly on the
document tree.

Both modes share a single idea of which whitespace matters: text inside
"raw-text" elements like `<pre>` and `<script>` is left exactly as-is, and a
space next to an "inline" element like `<b>` or `<a>` is kept as a word
separator. Everything else is formatting noise.

Minification then:
* Minifies inline scripts and styles;
* Strips comments, conditional comments excepted;
* Strips empty `class` and `style` attributes;
* Collapses and trims whitespace in text nodes;

Indentation normalizes the whitespace the same way, then puts every block
element on its own line, indented to match its depth.

Both the tag lists and the patterns are configurable via [`Config`].



## Use

```
use prettymin::{Config, Document, PrettyMin};

let pm = PrettyMin::new(Config::default()).unwrap();

// One-shot string to string.
let html = pm.minify_html(b"<div class=\"\">\n  <p>Hello\n  <b>World</b></p>\n</div>").unwrap();
assert_eq!(html, "<div><p>Hello <b>World</b></p></div>");

// Or work with the tree directly.
let mut doc = Document::parse(b"<ul><li>One</li><li>Two</li></ul>").unwrap();
pm.indent(&mut doc);
assert_eq!(doc.to_string(), "<ul>\n\t<li>One</li>\n\t<li>Two</li>\n</ul>");
```



## Caution

* Documents are expected to be encoded in UTF-8.
* Documents are processed as *HTML*, not XML or XHTML.
* Indentation adds whitespace, which is only safe where whitespace is noise; inline elements are left alone for that reason.
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(clippy::module_name_repetitions)]

// These are only used by the binary.
use argyle as _;
use dactyl as _;
use dowser as _;
use fyi_msg as _;
use rayon as _;
use write_atomic as _;

#[cfg(test)] use criterion as _;



mod config;
mod content;
mod dom;
mod error;
mod indent;
mod pipeline;
mod ser;
mod spec;
mod strip;
mod whitespace;

pub use config::Config;
pub use content::{
	BuiltinMinifier,
	rewrite_scripts,
	rewrite_styles,
	ScriptMinifier,
	StyleMinifier,
};
pub use dom::{
	Children,
	Document,
	NodeId,
	NodeKind,
};
pub use error::Error;
pub use indent::Indenter;
pub use pipeline::PrettyMin;
pub use strip::{
	strip_comments,
	strip_empty_attributes,
};
pub use whitespace::WhiteSpace;
