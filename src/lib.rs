//! treemask: pattern-based projection of nested JSON trees into sparse subtrees
//!
//! Given a large `serde_json::Value`, a pattern describes which branches
//! matter; the result is a freshly allocated sparse tree containing exactly
//! the matched branches, sharing no storage with the source.
//!
//! Pattern syntax (default separator `.`, default wildcard `*`):
//! - `user.profile.name` — literal path; fails loudly on a missing key
//! - `user.*` — every direct child of `user`; child objects are stubbed empty
//! - `user.**` — the whole subtree under `user`, any depth
//! - `[amber|blue].dark` — any one of the listed keys at that level
//! - `items.1..3.id` — integer range, expands to `items.1.id` … `items.3.id`
//! - `*` (the whole pattern) — the entire tree, deep-cloned
//!
//! Objects are the traversable containers; arrays are opaque leaf values,
//! matched and copied whole but never traversed element-by-element.
//!
//! ```
//! use serde_json::json;
//! use treemask::filter;
//!
//! let tree = json!({"hello": {"world": {"text": "Hello World"}, "test": "t"}});
//!
//! // Single-level wildcard: child objects are stubbed, scalars kept
//! let picked = filter(&tree, "hello.*").unwrap();
//! assert_eq!(picked, json!({"hello": {"world": {}, "test": "t"}}));
//!
//! // Multi-level wildcard: the full subtree
//! let picked = filter(&tree, "hello.**").unwrap();
//! assert_eq!(picked, tree);
//! ```

mod matcher;
mod merge;
mod pattern;
mod project;
mod range;

use serde_json::{Map, Value};
use std::fmt;

/// Errors from pattern parsing and strict literal traversal.
///
/// Wildcard, alternation and range patterns never fail for missing branches;
/// matching zero times is valid. Only structurally broken patterns and the
/// strict literal fast path produce errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Unbalanced brackets, an alternation with fewer than 2 or duplicate
    /// keys, or more than one range token.
    MalformedPattern(String),
    /// Range token with non-increasing or non-numeric bounds.
    InvalidRange(String),
    /// Strict literal traversal hit a missing key.
    PathNotFound { pattern: String, key: String },
    /// Strict literal traversal tried to descend into a non-container value.
    NotTraversable { pattern: String, key: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MalformedPattern(msg) => write!(f, "malformed pattern: {}", msg),
            FilterError::InvalidRange(msg) => write!(f, "invalid range: {}", msg),
            FilterError::PathNotFound { pattern, key } => {
                write!(f, "path '{}' not found: missing key '{}'", pattern, key)
            }
            FilterError::NotTraversable { pattern, key } => {
                write!(
                    f,
                    "path '{}' cannot descend into non-container value at key '{}'",
                    pattern, key
                )
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Call-level options, applying to every pattern unless overridden per
/// pattern via [`PatternOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Separator between path segments.
    pub separator: char,
    /// Wildcard character; doubled, it matches any depth.
    pub wildcard: char,
    /// Project matched leaf objects as empty stubs instead of full clones.
    pub shallow: bool,
    /// Drop matches whose path is longer than this many levels.
    pub max_depth: Option<usize>,
    /// Swallow strict-path misses; the failing pattern contributes an empty
    /// tree instead of aborting the call. Off by default so typo'd literal
    /// paths surface loudly.
    pub safe: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            separator: '.',
            wildcard: '*',
            shallow: false,
            max_depth: None,
            safe: false,
        }
    }
}

/// Per-pattern overrides; unset fields inherit the call-level [`Options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternOptions {
    pub separator: Option<char>,
    pub wildcard: Option<char>,
    pub shallow: Option<bool>,
    pub max_depth: Option<usize>,
    pub safe: Option<bool>,
}

impl PatternOptions {
    fn resolve(&self, base: &Options) -> Options {
        Options {
            separator: self.separator.unwrap_or(base.separator),
            wildcard: self.wildcard.unwrap_or(base.wildcard),
            shallow: self.shallow.unwrap_or(base.shallow),
            max_depth: self.max_depth.or(base.max_depth),
            safe: self.safe.unwrap_or(base.safe),
        }
    }
}

/// One pattern in a multi-pattern call, optionally with its own overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternEntry {
    pub pattern: String,
    pub options: PatternOptions,
}

impl PatternEntry {
    pub fn new(pattern: impl Into<String>) -> Self {
        PatternEntry {
            pattern: pattern.into(),
            options: PatternOptions::default(),
        }
    }

    pub fn with_options(pattern: impl Into<String>, options: PatternOptions) -> Self {
        PatternEntry {
            pattern: pattern.into(),
            options,
        }
    }
}

impl From<&str> for PatternEntry {
    fn from(pattern: &str) -> Self {
        PatternEntry::new(pattern)
    }
}

impl From<String> for PatternEntry {
    fn from(pattern: String) -> Self {
        PatternEntry::new(pattern)
    }
}

/// Projects the branches of `source` selected by `pattern`, with default
/// options.
///
/// ```
/// use serde_json::json;
/// use treemask::filter;
///
/// let tree = json!({
///     "amber": {"dark": {"1": "v", "a": {"1": "v"}}},
///     "blue": {"dark": {"1": "v"}},
/// });
/// let picked = filter(&tree, "[amber|blue].dark").unwrap();
/// assert_eq!(picked, tree);
/// ```
pub fn filter(source: &Value, pattern: &str) -> Result<Value, FilterError> {
    run_pattern(source, pattern, &Options::default())
}

/// Projects the branches of `source` selected by `pattern` under explicit
/// options.
///
/// ```
/// use serde_json::json;
/// use treemask::{filter_with, Options};
///
/// let tree = json!({"a": {"b": {"c": 1}}});
/// let options = Options { separator: '/', ..Options::default() };
/// let picked = filter_with(&tree, "a/b", &options).unwrap();
/// assert_eq!(picked, json!({"a": {"b": {"c": 1}}}));
/// ```
pub fn filter_with(source: &Value, pattern: &str, options: &Options) -> Result<Value, FilterError> {
    run_pattern(source, pattern, options)
}

/// Runs several patterns against `source` and deep-merges their sparse trees
/// left-to-right. Each entry's own options override the call-level ones for
/// that pattern only. An empty slice returns an empty object.
///
/// ```
/// use serde_json::json;
/// use treemask::{filter_patterns, Options, PatternEntry};
///
/// let tree = json!({"a": {"x": 1}, "b": {"y": 2}, "c": 3});
/// let patterns = [PatternEntry::new("a.x"), PatternEntry::new("b.y")];
/// let picked = filter_patterns(&tree, &patterns, &Options::default()).unwrap();
/// assert_eq!(picked, json!({"a": {"x": 1}, "b": {"y": 2}}));
/// ```
pub fn filter_patterns(
    source: &Value,
    patterns: &[PatternEntry],
    options: &Options,
) -> Result<Value, FilterError> {
    let mut acc = Value::Object(Map::new());
    for entry in patterns {
        let opts = entry.options.resolve(options);
        let tree = run_pattern(source, &entry.pattern, &opts)?;
        merge::deep_merge(&mut acc, tree);
    }
    Ok(acc)
}

fn run_pattern(source: &Value, raw: &str, opts: &Options) -> Result<Value, FilterError> {
    // The bare wildcard selects the whole subtree: a full deep clone,
    // independent of shallow/max_depth
    if raw.chars().eq(std::iter::once(opts.wildcard)) {
        return Ok(source.clone());
    }
    match range::expand(raw)? {
        Some(expanded) => {
            let mut acc = Value::Object(Map::new());
            for concrete in &expanded {
                let tree = run_single(source, concrete, opts, true)?;
                merge::deep_merge(&mut acc, tree);
            }
            Ok(acc)
        }
        None => run_single(source, raw, opts, false),
    }
}

/// Lexes, matches and projects one concrete pattern string. Strict mode
/// engages only for all-literal patterns whose raw form had no range token.
fn run_single(
    source: &Value,
    pattern_str: &str,
    opts: &Options,
    had_range: bool,
) -> Result<Value, FilterError> {
    let pattern = pattern::lex(pattern_str, opts.separator, opts.wildcard)?;
    if pattern.all_literal && !had_range {
        return match matcher::match_strict(source, &pattern, pattern_str) {
            Ok(m) => Ok(project::project(&[m], opts.shallow, opts.max_depth)),
            Err(FilterError::PathNotFound { .. } | FilterError::NotTraversable { .. })
                if opts.safe =>
            {
                Ok(Value::Object(Map::new()))
            }
            Err(e) => Err(e),
        };
    }
    let matches = matcher::match_pattern(source, &pattern);
    Ok(project::project(&matches, opts.shallow, opts.max_depth))
}
