/*!
# PrettyMin: Configuration.
*/

use crate::spec;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Configuration.
///
/// All fields are public, but the `with_*` builder methods are usually more
/// convenient. Either way, nothing is validated until the configuration is
/// handed to [`PrettyMin::new`](crate::PrettyMin::new).
///
/// ## Examples
///
/// ```
/// use prettymin::Config;
///
/// let config = Config::default()
///     .with_remove_comments(false)
///     .with_indent_unit("  ");
///
/// assert!(config.minify_js);
/// assert!(! config.remove_comments);
/// assert_eq!(config.indent_unit, "  ");
/// ```
pub struct Config {
	/// # Minify Scripts.
	///
	/// Default: `true`
	pub minify_js: bool,

	/// # Minify Styles.
	///
	/// Default: `true`
	pub minify_css: bool,

	/// # Remove Comments.
	///
	/// Default: `true`
	pub remove_comments: bool,

	/// # Comment Exceptions.
	///
	/// Comments matching any of these regular expressions are kept when
	/// `remove_comments` is enabled.
	///
	/// Default: conditional comments.
	pub comment_exceptions: Vec<String>,

	/// # Inline Tags.
	///
	/// Default: the usual phrasing elements, `a`, `b`, `span`, etc.
	pub inline_tags: Vec<String>,

	/// # Raw-Text Tags.
	///
	/// Default: `script`, `style`, `pre`.
	pub raw_text_tags: Vec<String>,

	/// # Strip-If-Empty Attributes.
	///
	/// Default: `style`, `class`.
	pub strip_empty_attributes: Vec<String>,

	/// # Indentation Unit.
	///
	/// This must be non-empty and consist only of whitespace.
	///
	/// Default: a tab.
	pub indent_unit: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			minify_js: true,
			minify_css: true,
			remove_comments: true,
			comment_exceptions: to_strings(spec::COMMENT_EXCEPTIONS),
			inline_tags: to_strings(spec::INLINE_TAGS),
			raw_text_tags: to_strings(spec::RAW_TEXT_TAGS),
			strip_empty_attributes: to_strings(spec::EMPTY_ATTRIBUTES),
			indent_unit: spec::INDENT_UNIT.to_owned(),
		}
	}
}

impl Config {
	#[must_use]
	/// # With Script Minification.
	pub const fn with_minify_js(mut self, minify: bool) -> Self {
		self.minify_js = minify;
		self
	}

	#[must_use]
	/// # With Style Minification.
	pub const fn with_minify_css(mut self, minify: bool) -> Self {
		self.minify_css = minify;
		self
	}

	#[must_use]
	/// # With Comment Removal.
	pub const fn with_remove_comments(mut self, remove: bool) -> Self {
		self.remove_comments = remove;
		self
	}

	#[must_use]
	/// # With Comment Exceptions.
	///
	/// Replace the comment exception patterns.
	pub fn with_comment_exceptions<I, S>(mut self, patterns: I) -> Self
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.comment_exceptions = to_strings(patterns);
		self
	}

	#[must_use]
	/// # With Inline Tags.
	///
	/// Replace the inline tag list.
	pub fn with_inline_tags<I, S>(mut self, tags: I) -> Self
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.inline_tags = to_strings(tags);
		self
	}

	#[must_use]
	/// # With Raw-Text Tags.
	///
	/// Replace the raw-text tag list.
	pub fn with_raw_text_tags<I, S>(mut self, tags: I) -> Self
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.raw_text_tags = to_strings(tags);
		self
	}

	#[must_use]
	/// # With Strip-If-Empty Attributes.
	///
	/// Replace the list of attributes to remove when empty.
	pub fn with_strip_empty_attributes<I, S>(mut self, attrs: I) -> Self
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.strip_empty_attributes = to_strings(attrs);
		self
	}

	#[must_use]
	/// # With Indentation Unit.
	pub fn with_indent_unit<S: Into<String>>(mut self, unit: S) -> Self {
		self.indent_unit = unit.into();
		self
	}
}



/// # To Owned Strings.
fn to_strings<I, S>(src: I) -> Vec<String>
where I: IntoIterator<Item = S>, S: AsRef<str> {
	src.into_iter().map(|s| s.as_ref().to_owned()).collect()
}
