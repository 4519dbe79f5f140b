//! Route matching logic.
//!
//! # Responsibilities
//! - Match literal paths (exact by default)
//! - Match catch-all patterns and capture the remaining path
//! - Expose captured params to the caller
//!
//! # Design Decisions
//! - Literal matching is case-sensitive unless `sensitive` is off
//! - A trailing slash is significant unless `strict` is off
//! - No regex: a catch-all is a prefix test plus a split

use std::collections::BTreeMap;

use serde::Serialize;

use crate::routing::pattern::RoutePattern;

/// Value captured by a route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    Repeated(Vec<String>),
}

/// Params captured by a successful match, keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

/// Options that loosen literal matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare literals case-sensitively.
    pub sensitive: bool,
    /// Treat `/todo/` and `/todo` as different paths.
    pub strict: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sensitive: true,
            strict: true,
        }
    }
}

/// Trait for matching a request path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the captured params if the path matches.
    fn matches(&self, path: &str, options: MatchOptions) -> Option<Params>;
}

impl Matcher for RoutePattern {
    fn matches(&self, path: &str, options: MatchOptions) -> Option<Params> {
        match self {
            RoutePattern::Literal(literal) => {
                literal_matches(literal, path, options).then(Params::new)
            }
            RoutePattern::CatchAll { prefix, param, repeatable } => {
                let rest = strip_prefix(path, prefix, options.sensitive)?;
                let rest = rest.strip_prefix('/').unwrap_or(rest);

                let value = if *repeatable {
                    ParamValue::Repeated(
                        rest.split('/')
                            .filter(|segment| !segment.is_empty())
                            .map(str::to_string)
                            .collect(),
                    )
                } else {
                    ParamValue::Single(rest.to_string())
                };

                let mut params = Params::new();
                params.insert(param.clone(), value);
                Some(params)
            }
        }
    }
}

fn literal_matches(literal: &str, path: &str, options: MatchOptions) -> bool {
    let (literal, path) = if options.strict {
        (literal, path)
    } else {
        (trim_trailing_slash(literal), trim_trailing_slash(path))
    };

    if options.sensitive {
        literal == path
    } else {
        literal.eq_ignore_ascii_case(path)
    }
}

/// Canonical form of a literal under `options`.
///
/// Two literals with the same key match exactly the same paths.
pub fn literal_key(literal: &str, options: MatchOptions) -> String {
    let literal = if options.strict {
        literal
    } else {
        trim_trailing_slash(literal)
    };

    if options.sensitive {
        literal.to_string()
    } else {
        literal.to_ascii_lowercase()
    }
}

fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Strip `prefix` from `path` on a segment boundary.
fn strip_prefix<'a>(path: &'a str, prefix: &str, sensitive: bool) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }

    let head = path.get(..prefix.len())?;
    let same = if sensitive {
        head == prefix
    } else {
        head.eq_ignore_ascii_case(prefix)
    };
    if !same {
        return None;
    }

    let rest = &path[prefix.len()..];
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}
