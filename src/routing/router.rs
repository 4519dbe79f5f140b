//! Route lookup and redirect following.
//!
//! # Responsibilities
//! - Store the compiled route table
//! - Look up the first rule matching a path
//! - Follow redirects with a bounded number of hops
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(n) scan in declaration order; first match wins
//! - Explicit NoRouteMatched rather than a silent default

use serde::Serialize;

use crate::pages::Page;
use crate::routing::matcher::{MatchOptions, Matcher, Params};
use crate::routing::table::{RouteRule, RouteTable, RouteTarget};
use crate::routing::RoutingError;

/// Redirect hops followed by [`Router::navigate`] unless configured otherwise.
pub const DEFAULT_MAX_REDIRECTS: usize = 1;

/// A path reported by the navigation source, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl NavigationRequest {
    /// Split `raw` into path, query and fragment. Never fails.
    pub fn parse(raw: &str) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Render(Page),
    Redirect(String),
}

/// The rule that matched a path, with its captured params.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    /// Position of the rule in the table.
    pub index: usize,
    pub rule: &'r RouteRule,
    pub params: Params,
}

impl RouteMatch<'_> {
    pub fn resolution(&self) -> Resolution {
        match &self.rule.target {
            RouteTarget::Render(page) => Resolution::Render(*page),
            RouteTarget::Redirect(to) => Resolution::Redirect(to.clone()),
        }
    }
}

/// A completed navigation: the page to render and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Path as reported by the navigation source.
    pub requested: String,
    /// Path the page was finally resolved from.
    pub path: String,
    pub page: Page,
    pub params: Params,
    /// First path that triggered a redirect, if any.
    pub redirected_from: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Navigation {
    /// Final path with its query and fragment, as shown in the address bar.
    pub fn location(&self) -> String {
        let mut location = self.path.clone();
        if let Some(query) = &self.query {
            location.push('?');
            location.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            location.push('#');
            location.push_str(fragment);
        }
        location
    }
}

/// Immutable route resolver.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    options: MatchOptions,
    max_redirects: usize,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            options: MatchOptions::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Find the first rule whose pattern matches `path` exactly as given.
    pub fn match_path(&self, path: &str) -> Result<RouteMatch<'_>, RoutingError> {
        self.table
            .rules()
            .iter()
            .enumerate()
            .find_map(|(index, rule)| {
                rule.pattern
                    .matches(path, self.options)
                    .map(|params| RouteMatch { index, rule, params })
            })
            .ok_or_else(|| RoutingError::NoRouteMatched {
                path: path.to_string(),
            })
    }

    /// Resolve a single navigation request without following redirects.
    ///
    /// Query and fragment are ignored for matching.
    pub fn resolve(&self, raw: &str) -> Result<Resolution, RoutingError> {
        let request = NavigationRequest::parse(raw);
        let matched = self.match_path(&request.path)?;
        let resolution = matched.resolution();

        tracing::debug!(
            path = %request.path,
            rule = %matched.rule.label(),
            resolution = ?resolution,
            "Resolved navigation"
        );

        Ok(resolution)
    }

    /// Resolve `raw`, following redirects until a page is selected.
    ///
    /// Fails with [`RoutingError::RedirectLoop`] when more than
    /// `max_redirects` hops are needed or a path is revisited.
    pub fn navigate(&self, raw: &str) -> Result<Navigation, RoutingError> {
        let mut request = NavigationRequest::parse(raw);
        let mut visited: Vec<String> = Vec::new();

        loop {
            let matched = self.match_path(&request.path)?;

            match &matched.rule.target {
                RouteTarget::Render(page) => {
                    tracing::debug!(
                        requested = %raw,
                        path = %request.path,
                        rule = %matched.rule.label(),
                        page = %page,
                        hops = visited.len(),
                        "Navigation resolved"
                    );

                    return Ok(Navigation {
                        requested: raw.to_string(),
                        page: *page,
                        params: matched.params,
                        redirected_from: visited.first().cloned(),
                        path: request.path,
                        query: request.query,
                        fragment: request.fragment,
                    });
                }
                RouteTarget::Redirect(to) => {
                    visited.push(request.path.clone());
                    let next = NavigationRequest::parse(to);

                    if visited.len() > self.max_redirects || visited.contains(&next.path) {
                        return Err(RoutingError::RedirectLoop {
                            path: raw.to_string(),
                            hops: visited.len(),
                        });
                    }

                    tracing::trace!(from = %request.path, to = %next.path, "Following redirect");
                    request = next;
                }
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::declared())
    }
}
