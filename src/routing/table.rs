//! Route table definitions.

use std::fmt;

use crate::pages::Page;
use crate::routing::pattern::RoutePattern;
use crate::routing::RoutingError;

/// What a matched rule asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Render(Page),
    Redirect(String),
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    /// Optional identifier for logging/metrics.
    pub name: Option<String>,
    pub pattern: RoutePattern,
    pub target: RouteTarget,
}

impl RouteRule {
    /// Rule that renders `page` when `pattern` matches.
    pub fn render(pattern: &str, page: Page) -> Result<Self, RoutingError> {
        Ok(Self {
            name: None,
            pattern: RoutePattern::parse(pattern)?,
            target: RouteTarget::Render(page),
        })
    }

    /// Rule that redirects to `to` when `pattern` matches.
    pub fn redirect(pattern: &str, to: impl Into<String>) -> Result<Self, RoutingError> {
        Ok(Self {
            name: None,
            pattern: RoutePattern::parse(pattern)?,
            target: RouteTarget::Redirect(to.into()),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label used in logs and metrics: the name if set, else the pattern.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.pattern.to_string(),
        }
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            RouteTarget::Render(page) => write!(f, "{} -> render {}", self.pattern, page),
            RouteTarget::Redirect(to) => write!(f, "{} -> redirect {}", self.pattern, to),
        }
    }
}

/// Ordered route rules. Declaration order is match order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The table the application ships with.
    ///
    /// | Order | Pattern            | Target           |
    /// |-------|--------------------|------------------|
    /// | 1     | `/todo`            | Render(TodoPage) |
    /// | 2     | `/:pathMatch(.*)*` | Redirect(`/todo`)|
    pub fn declared() -> Self {
        Self::new(vec![
            RouteRule {
                name: None,
                pattern: RoutePattern::Literal("/todo".into()),
                target: RouteTarget::Render(Page::Todo),
            },
            RouteRule {
                name: None,
                pattern: RoutePattern::CatchAll {
                    prefix: String::new(),
                    param: "pathMatch".into(),
                    repeatable: true,
                },
                target: RouteTarget::Redirect("/todo".into()),
            },
        ])
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when the last rule matches every path.
    pub fn has_catch_all(&self) -> bool {
        self.rules.last().is_some_and(|rule| rule.pattern.is_total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_table() {
        let table = RouteTable::declared();
        assert_eq!(table.len(), 2);
        assert!(table.has_catch_all());
        assert_eq!(table.rules()[0].to_string(), "/todo -> render TodoPage");
        assert_eq!(
            table.rules()[1].to_string(),
            "/:pathMatch(.*)* -> redirect /todo"
        );
    }

    #[test]
    fn test_catch_all_must_be_last() {
        let table = RouteTable::new(vec![
            RouteRule::redirect("/:pathMatch(.*)*", "/todo").unwrap(),
            RouteRule::render("/todo", Page::Todo).unwrap(),
        ]);
        assert!(!table.has_catch_all());
        assert!(!RouteTable::new(vec![]).has_catch_all());
    }

    #[test]
    fn test_rule_label() {
        let rule = RouteRule::render("/todo", Page::Todo).unwrap();
        assert_eq!(rule.label(), "/todo");
        assert_eq!(rule.named("todo").label(), "todo");
    }
}
