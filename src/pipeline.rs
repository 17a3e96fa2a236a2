/*!
# PrettyMin: Pipeline.
*/

use crate::{
	BuiltinMinifier,
	Config,
	content,
	Document,
	Error,
	Indenter,
	ScriptMinifier,
	strip,
	StyleMinifier,
	WhiteSpace,
};
use html5ever::LocalName;
use regex::Regex;
use std::fmt;



/// # PrettyMin.
///
/// This is a validated, ready-to-use [`Config`], along with the script and
/// style minifiers to use.
///
/// It holds no per-document state, so a single instance can be shared
/// across threads to process any number of documents.
///
/// ## Examples
///
/// ```
/// use prettymin::{Config, PrettyMin};
///
/// let pm = PrettyMin::new(Config::default().with_indent_unit("  ")).unwrap();
///
/// let min = pm.minify_html(b"<p>Hello   <b>World</b>!\n</p>").unwrap();
/// assert_eq!(min, "<p>Hello <b>World</b>!</p>");
///
/// let pretty = pm.indent_html(b"<ul><li>a</li><li>b</li></ul>").unwrap();
/// assert_eq!(pretty, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
/// ```
pub struct PrettyMin {
	/// # Whitespace Classifier.
	ws: WhiteSpace,

	/// # Comment Exceptions.
	comment_exceptions: Vec<Regex>,

	/// # Strip-If-Empty Attributes.
	empty_attributes: Vec<LocalName>,

	/// # Indentation Unit.
	indent_unit: String,

	/// # Minify Scripts?
	minify_js: bool,

	/// # Minify Styles?
	minify_css: bool,

	/// # Remove Comments?
	remove_comments: bool,

	/// # Script Minifier.
	script: Box<dyn ScriptMinifier + Send + Sync>,

	/// # Style Minifier.
	style: Box<dyn StyleMinifier + Send + Sync>,
}

impl fmt::Debug for PrettyMin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PrettyMin")
			.field("ws", &self.ws)
			.field("comment_exceptions", &self.comment_exceptions)
			.field("empty_attributes", &self.empty_attributes)
			.field("indent_unit", &self.indent_unit)
			.field("minify_js", &self.minify_js)
			.field("minify_css", &self.minify_css)
			.field("remove_comments", &self.remove_comments)
			.finish_non_exhaustive()
	}
}

impl Default for PrettyMin {
	fn default() -> Self {
		let config = Config::default();
		Self {
			ws: WhiteSpace::new(&config.raw_text_tags, &config.inline_tags),
			comment_exceptions: config.comment_exceptions.iter()
				.filter_map(|p| Regex::new(p).ok())
				.collect(),
			empty_attributes: local_names(&config.strip_empty_attributes),
			indent_unit: config.indent_unit,
			minify_js: config.minify_js,
			minify_css: config.minify_css,
			remove_comments: config.remove_comments,
			script: Box::new(BuiltinMinifier),
			style: Box::new(BuiltinMinifier),
		}
	}
}

impl PrettyMin {
	/// # New.
	///
	/// Validate the configuration and compile it for use. Script and style
	/// minification defaults to [`BuiltinMinifier`].
	///
	/// ## Errors
	///
	/// Returns [`Error::CommentPattern`] if any of the comment exceptions is
	/// not a valid regular expression, or [`Error::IndentUnit`] if the
	/// indentation unit is empty or contains anything other than whitespace.
	pub fn new(config: Config) -> Result<Self, Error> {
		let Config {
			minify_js,
			minify_css,
			remove_comments,
			comment_exceptions,
			inline_tags,
			raw_text_tags,
			strip_empty_attributes,
			indent_unit,
		} = config;

		if indent_unit.is_empty() || ! indent_unit.chars().all(char::is_whitespace) {
			return Err(Error::IndentUnit);
		}

		let comment_exceptions = comment_exceptions.into_iter()
			.map(|p| Regex::new(&p).map_err(|_| Error::CommentPattern(p)))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			ws: WhiteSpace::new(raw_text_tags, inline_tags),
			comment_exceptions,
			empty_attributes: local_names(&strip_empty_attributes),
			indent_unit,
			minify_js,
			minify_css,
			remove_comments,
			script: Box::new(BuiltinMinifier),
			style: Box::new(BuiltinMinifier),
		})
	}

	#[must_use]
	/// # With Script Minifier.
	///
	/// Replace the default script minifier.
	pub fn with_script_minifier<M>(mut self, minifier: M) -> Self
	where M: ScriptMinifier + Send + Sync + 'static {
		self.script = Box::new(minifier);
		self
	}

	#[must_use]
	/// # With Style Minifier.
	///
	/// Replace the default style minifier.
	pub fn with_style_minifier<M>(mut self, minifier: M) -> Self
	where M: StyleMinifier + Send + Sync + 'static {
		self.style = Box::new(minifier);
		self
	}

	#[must_use]
	/// # Whitespace Classifier.
	pub const fn whitespace(&self) -> &WhiteSpace { &self.ws }

	#[must_use]
	/// # Indentation Unit.
	pub fn indent_unit(&self) -> &str { &self.indent_unit }
}

impl PrettyMin {
	/// # Minify.
	///
	/// Minify the document in place. In order, this:
	/// * Minifies the inline scripts;
	/// * Minifies the inline styles;
	/// * Removes comments (other than the exceptions);
	/// * Removes empty attributes;
	/// * Normalizes the whitespace in text nodes;
	///
	/// The first three steps are subject to the corresponding configuration
	/// switches.
	///
	/// ## Errors
	///
	/// Script and style minification errors are passed through as-are. The
	/// document may be left partially processed in such cases.
	pub fn minify(&self, doc: &mut Document) -> Result<(), Error> {
		if self.minify_js { content::rewrite_scripts(doc, &*self.script)?; }
		if self.minify_css { content::rewrite_styles(doc, &*self.style)?; }
		if self.remove_comments { strip::strip_comments(doc, &self.comment_exceptions); }
		strip::strip_empty_attributes(doc, &self.empty_attributes);
		self.ws.normalize(doc);
		Ok(())
	}

	/// # Indent.
	///
	/// Normalize the whitespace and re-indent the document in place.
	///
	/// Fragments have no real root, so each of their top-level nodes is
	/// indented as a root of its own, and those that are blocks are put on
	/// their own lines.
	pub fn indent(&self, doc: &mut Document) {
		self.ws.normalize(doc);

		let indenter = Indenter::new(&self.ws, &self.indent_unit);
		let root = doc.root();
		if doc.is_fragment() {
			let children: Vec<_> = doc.children(root).collect();
			for (idx, child) in children.into_iter().enumerate() {
				if indenter.indent(doc, child, 0) && idx != 0 {
					let line = doc.create_text("\n");
					doc.insert_before(child, line);
				}
			}
		}
		else { indenter.indent(doc, root, 0); }
	}

	/// # Minify HTML.
	///
	/// Parse, minify, and serialize the markup in one go.
	///
	/// ## Errors
	///
	/// Returns an error if the markup cannot be parsed, or minification fails.
	pub fn minify_html(&self, raw: &[u8]) -> Result<String, Error> {
		let mut doc = Document::parse(raw)?;
		self.minify(&mut doc)?;
		Ok(doc.serialize())
	}

	/// # Indent HTML.
	///
	/// Parse, re-indent, and serialize the markup in one go.
	///
	/// ## Errors
	///
	/// Returns an error if the markup cannot be parsed.
	pub fn indent_html(&self, raw: &[u8]) -> Result<String, Error> {
		let mut doc = Document::parse(raw)?;
		self.indent(&mut doc);
		Ok(doc.serialize())
	}
}



/// # Local Names.
fn local_names(src: &[String]) -> Vec<LocalName> {
	src.iter().map(|s| LocalName::from(s.as_str())).collect()
}
