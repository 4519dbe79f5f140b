//! Route pattern parsing.
//!
//! Two pattern shapes are understood:
//! - Literal paths, e.g. `/todo`
//! - Catch-all captures, e.g. `/:pathMatch(.*)*` or `/docs/:rest(.*)`
//!
//! A catch-all captures everything after its (possibly empty) literal prefix.
//! The trailing `*` makes the capture repeatable: the remainder is split on
//! `/` into a list of segments instead of a single string.

use std::fmt;

use crate::routing::RoutingError;

/// Compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one exact path.
    Literal(String),

    /// Matches any path starting with `prefix`, capturing the rest.
    CatchAll {
        prefix: String,
        param: String,
        repeatable: bool,
    },
}

const CATCH_ALL_REGEX: &str = "(.*)";

impl RoutePattern {
    /// Parse a pattern as written in a route declaration.
    pub fn parse(raw: &str) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let Some(colon) = raw.find(':') else {
            if raw.contains(['(', ')', '*']) {
                return Err(invalid("literal paths cannot contain '(', ')' or '*'"));
            }
            return Ok(RoutePattern::Literal(raw.to_string()));
        };

        // The capture must start a segment: "/:name" or "/prefix/:name".
        if !raw[..colon].ends_with('/') {
            return Err(invalid("parameter must start a path segment"));
        }
        let prefix = raw[..colon - 1].to_string();
        if prefix.contains(['(', ')', '*', ':']) {
            return Err(invalid("unexpected characters before parameter"));
        }

        let rest = &raw[colon + 1..];
        let Some(open) = rest.find('(') else {
            return Err(invalid("only catch-all parameters of the form :name(.*) are supported"));
        };

        let param = &rest[..open];
        if param.is_empty() || !param.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("parameter name must be alphanumeric"));
        }

        let tail = &rest[open..];
        let repeatable = match tail.strip_prefix(CATCH_ALL_REGEX) {
            Some("") => false,
            Some("*") => true,
            _ => return Err(invalid("catch-all must be written as :name(.*) or :name(.*)*")),
        };

        Ok(RoutePattern::CatchAll {
            prefix,
            param: param.to_string(),
            repeatable,
        })
    }

    /// True for a catch-all with no prefix, which matches every path.
    pub fn is_total(&self) -> bool {
        matches!(self, RoutePattern::CatchAll { prefix, .. } if prefix.is_empty())
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, RoutePattern::Literal(_))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Literal(path) => f.write_str(path),
            RoutePattern::CatchAll { prefix, param, repeatable } => {
                write!(f, "{}/:{}{}", prefix, param, CATCH_ALL_REGEX)?;
                if *repeatable {
                    f.write_str("*")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            RoutePattern::parse("/todo").unwrap(),
            RoutePattern::Literal("/todo".into())
        );
        assert!(RoutePattern::parse("/").unwrap().is_literal());
    }

    #[test]
    fn test_parse_catch_all() {
        let pattern = RoutePattern::parse("/:pathMatch(.*)*").unwrap();
        assert_eq!(
            pattern,
            RoutePattern::CatchAll {
                prefix: String::new(),
                param: "pathMatch".into(),
                repeatable: true,
            }
        );
        assert!(pattern.is_total());
        assert_eq!(pattern.to_string(), "/:pathMatch(.*)*");

        let prefixed = RoutePattern::parse("/docs/:rest(.*)").unwrap();
        assert!(!prefixed.is_total());
        assert_eq!(prefixed.to_string(), "/docs/:rest(.*)");
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        for raw in ["todo", "", "/user/:id", "/:x(\\d+)", "/a:b(.*)", "/:(.*)*", "/todo*", "/:x(.*)+"] {
            assert!(
                matches!(RoutePattern::parse(raw), Err(RoutingError::InvalidPattern { .. })),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
