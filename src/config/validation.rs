//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile route declarations into a route table
//! - Prove the table is total (catch-all last, nothing unreachable)
//! - Walk every redirect target to reject loops before serving
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::app::MountTarget;
use crate::config::schema::{AppConfig, RouteConfig};
use crate::routing::{
    literal_key, MatchOptions, RoutePattern, RouteRule, RouteTable, RouteTarget, Router,
    RoutingError,
};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes declared")]
    NoRoutes,

    #[error("routes[{index}] ({path}): set either component or redirect, not both")]
    AmbiguousTarget { index: usize, path: String },

    #[error("routes[{index}] ({path}): missing component or redirect")]
    MissingTarget { index: usize, path: String },

    #[error("routes[{index}]: {source}")]
    InvalidPattern { index: usize, source: RoutingError },

    #[error("routes[{index}] ({path}): redirect target {target:?} must be an absolute path")]
    RelativeRedirect {
        index: usize,
        path: String,
        target: String,
    },

    #[error("routes[{index}] ({path}): duplicate of an earlier route")]
    DuplicateRoute { index: usize, path: String },

    #[error("routes[{index}] ({path}): unreachable after catch-all route")]
    UnreachableRoute { index: usize, path: String },

    #[error("last route must be a catch-all such as /:pathMatch(.*)*")]
    MissingCatchAll,

    #[error("redirect target {target:?} does not resolve: {source}")]
    BrokenRedirect { target: String, source: RoutingError },

    #[error("router.max_redirects must be at least 1 when redirects are declared")]
    ZeroRedirects,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("router.base {0:?} must start with '/'")]
    InvalidBase(String),

    #[error("app.mount: {0}")]
    InvalidMountTarget(String),

    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("observability.log_level: invalid filter {0:?}")]
    InvalidLogLevel(String),
}

/// Validate the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    compile_router(config).map(|_| ())
}

/// Validate the configuration and build the router it describes.
pub fn compile_router(config: &AppConfig) -> Result<Router, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.router.base.starts_with('/') {
        errors.push(ValidationError::InvalidBase(config.router.base.clone()));
    }

    if let Err(e) = MountTarget::parse(&config.app.mount) {
        errors.push(ValidationError::InvalidMountTarget(e.to_string()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if tracing_subscriber::EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let options = MatchOptions {
        sensitive: config.router.sensitive,
        strict: config.router.strict,
    };
    let table = compile_routes(&config.routes, options, &mut errors);

    let has_redirects = table
        .rules()
        .iter()
        .any(|rule| matches!(rule.target, RouteTarget::Redirect(_)));
    if has_redirects && config.router.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirects);
    }

    let router = Router::new(table)
        .with_options(options)
        .with_max_redirects(config.router.max_redirects);

    if errors.is_empty() {
        check_redirects(&router, &mut errors);
    }

    if errors.is_empty() {
        Ok(router)
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// Compile route declarations, pushing every problem found into `errors`.
///
/// Literals are compared the way `options` matches them, so `/todo` and
/// `/TODO` are duplicates when matching is case-insensitive.
fn compile_routes(
    routes: &[RouteConfig],
    options: MatchOptions,
    errors: &mut Vec<ValidationError>,
) -> RouteTable {
    if routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
        return RouteTable::new(Vec::new());
    }

    let mut rules = Vec::with_capacity(routes.len());
    let mut literals = HashSet::new();
    let mut catch_all_seen = false;

    for (index, route) in routes.iter().enumerate() {
        let path = route.path.clone();

        let target = match (&route.component, &route.redirect) {
            (Some(page), None) => RouteTarget::Render(*page),
            (None, Some(to)) => {
                if !to.starts_with('/') {
                    errors.push(ValidationError::RelativeRedirect {
                        index,
                        path: path.clone(),
                        target: to.clone(),
                    });
                }
                RouteTarget::Redirect(to.clone())
            }
            (Some(_), Some(_)) => {
                errors.push(ValidationError::AmbiguousTarget { index, path });
                continue;
            }
            (None, None) => {
                errors.push(ValidationError::MissingTarget { index, path });
                continue;
            }
        };

        let pattern = match RoutePattern::parse(&route.path) {
            Ok(pattern) => pattern,
            Err(source) => {
                errors.push(ValidationError::InvalidPattern { index, source });
                continue;
            }
        };

        if catch_all_seen {
            errors.push(ValidationError::UnreachableRoute {
                index,
                path: path.clone(),
            });
        } else if pattern.is_literal() && !literals.insert(literal_key(&path, options)) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                path: path.clone(),
            });
        }
        catch_all_seen |= pattern.is_total();

        rules.push(RouteRule {
            name: route.name.clone(),
            pattern,
            target,
        });
    }

    if !catch_all_seen {
        errors.push(ValidationError::MissingCatchAll);
    }

    RouteTable::new(rules)
}

/// Every redirect target must reach a page within the remaining hop budget.
fn check_redirects(router: &Router, errors: &mut Vec<ValidationError>) {
    let remaining = router
        .clone()
        .with_max_redirects(router.max_redirects().saturating_sub(1));

    for rule in router.table().rules() {
        if let RouteTarget::Redirect(target) = &rule.target {
            if let Err(source) = remaining.navigate(target) {
                errors.push(ValidationError::BrokenRedirect {
                    target: target.clone(),
                    source,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Page;

    fn route(path: &str, component: Option<Page>, redirect: Option<&str>) -> RouteConfig {
        RouteConfig {
            name: None,
            path: path.to_string(),
            component,
            redirect: redirect.map(str::to_string),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let router = compile_router(&AppConfig::default()).unwrap();
        assert_eq!(router.table(), &RouteTable::declared());
        assert_eq!(router.max_redirects(), 1);
    }

    #[test]
    fn test_missing_catch_all_rejected() {
        let mut config = AppConfig::default();
        config.routes.pop();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MissingCatchAll])
        );

        config.routes.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::NoRoutes));
    }

    #[test]
    fn test_collects_all_route_errors() {
        let mut config = AppConfig::default();
        config.routes = vec![
            route("/todo", Some(Page::Todo), Some("/x")),
            route("/about", None, None),
            route("/home", None, Some("home")),
            route("/user/:id", Some(Page::Home), None),
            route("/:pathMatch(.*)*", None, Some("/todo")),
            route("/late", Some(Page::About), None),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::AmbiguousTarget { index: 0, .. }));
        assert!(matches!(errors[1], ValidationError::MissingTarget { index: 1, .. }));
        assert!(matches!(errors[2], ValidationError::RelativeRedirect { index: 2, .. }));
        assert!(matches!(errors[3], ValidationError::InvalidPattern { index: 3, .. }));
        assert!(matches!(errors[4], ValidationError::UnreachableRoute { index: 5, .. }));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_duplicate_literal_rejected() {
        let mut config = AppConfig::default();
        config.routes.insert(1, route("/todo", Some(Page::Home), None));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateRoute {
                index: 1,
                path: "/todo".into()
            }]
        );
    }

    #[test]
    fn test_case_insensitive_duplicate_rejected() {
        let mut config = AppConfig::default();
        config.routes.insert(1, route("/TODO", Some(Page::Home), None));
        assert!(validate_config(&config).is_ok());

        config.router.sensitive = false;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::DuplicateRoute {
                index: 1,
                path: "/TODO".into()
            }])
        );
    }

    #[test]
    fn test_trailing_slash_duplicate_rejected() {
        let mut config = AppConfig::default();
        config.routes.insert(1, route("/todo/", Some(Page::Home), None));
        assert!(validate_config(&config).is_ok());

        config.router.strict = false;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::DuplicateRoute {
                index: 1,
                path: "/todo/".into()
            }])
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.timeouts.request_secs = 0;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::ZeroTimeout])
        );
    }

    #[test]
    fn test_redirect_chains_checked_against_hop_limit() {
        let mut config = AppConfig::default();
        config.routes = vec![
            route("/todo", Some(Page::Todo), None),
            route("/legacy", None, Some("/old")),
            route("/old", None, Some("/todo")),
            route("/:pathMatch(.*)*", None, Some("/todo")),
        ];

        // "/legacy" needs two hops.
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            &errors[..],
            [ValidationError::BrokenRedirect { target, .. }] if target == "/old"
        ));

        config.router.max_redirects = 2;
        assert!(validate_config(&config).is_ok());

        config.router.max_redirects = 0;
        assert!(validate_config(&config)
            .unwrap_err()
            .contains(&ValidationError::ZeroRedirects));
    }

    #[test]
    fn test_shell_settings_validated() {
        let mut config = AppConfig::default();
        config.router.base = "app".into();
        config.app.mount = "app".into();
        config.listener.bind_address = "localhost".into();
        config.observability.log_level = "spa_router=verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidBase("app".into())));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidMountTarget(_))));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidAddress { field: "listener.bind_address", .. }
        )));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("spa_router=verbose".into())));
    }
}
