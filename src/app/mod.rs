//! Application object.
//!
//! # Data Flow
//! ```text
//! App::new(title)
//!     → with_router(router)        install the immutable route table
//!     → mount("#app", history, renderer)
//!         → initial navigation for history.location()
//!         → MountedApp
//!
//! MountedApp::push / replace / back / forward
//!     → router.navigate(path)      first match, bounded redirects
//!     → history updated            redirects replace the entry
//!     → renderer.render(page)
//! ```
//!
//! # Design Decisions
//! - One navigation at a time: every navigation takes `&mut self`
//! - A failed navigation leaves history and the rendered page untouched

pub mod history;
pub mod render;

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::observability::metrics;
use crate::routing::{Navigation, Router, RoutingError};

pub use history::{History, MemoryHistory};
pub use render::{HtmlRenderer, Renderer};

/// Errors raised by the application object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid mount target {0:?}: expected an id selector such as \"#app\"")]
    InvalidMountTarget(String),

    #[error("cannot mount an application without a router")]
    NoRouter,

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// Element the application attaches to, written as an id selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountTarget {
    id: String,
}

impl MountTarget {
    pub fn parse(selector: &str) -> Result<Self, AppError> {
        let id = selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .filter(|id| {
                id.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
            .ok_or_else(|| AppError::InvalidMountTarget(selector.to_string()))?;

        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selector(&self) -> String {
        format!("#{}", self.id)
    }
}

/// An application that has not been mounted yet.
#[derive(Debug, Clone)]
pub struct App {
    title: String,
    router: Option<Arc<Router>>,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            router: None,
        }
    }

    /// Build from a configuration, validating its routes.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let router = config.build_router()?;
        Ok(Self::new(config.app.title.clone()).with_router(Arc::new(router)))
    }

    pub fn with_router(mut self, router: Arc<Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn router(&self) -> Option<&Arc<Router>> {
        self.router.as_ref()
    }

    /// Attach to `selector` and render the page for the current location.
    pub fn mount<H: History, R: Renderer>(
        self,
        selector: &str,
        mut history: H,
        mut renderer: R,
    ) -> Result<MountedApp<H, R>, AppError> {
        let mount = MountTarget::parse(selector)?;
        let router = self.router.ok_or(AppError::NoRouter)?;

        let navigation = navigate(&router, history.location())?;
        if navigation.redirected_from.is_some() {
            history.replace(navigation.location());
        }
        renderer.render(&mount, &self.title, &navigation);

        tracing::info!(
            mount = %mount.selector(),
            location = %history.location(),
            page = %navigation.page,
            "Application mounted"
        );

        Ok(MountedApp {
            title: self.title,
            mount,
            router,
            history,
            renderer,
            current: navigation,
        })
    }
}

/// A running application bound to a history and a renderer.
#[derive(Debug)]
pub struct MountedApp<H, R> {
    title: String,
    mount: MountTarget,
    router: Arc<Router>,
    history: H,
    renderer: R,
    current: Navigation,
}

impl<H: History, R: Renderer> MountedApp<H, R> {
    /// Navigate to `path`, adding a history entry.
    pub fn push(&mut self, path: &str) -> Result<&Navigation, AppError> {
        let navigation = navigate(&self.router, path)?;
        self.history.push(navigation.location());
        Ok(self.commit(navigation))
    }

    /// Navigate to `path`, overwriting the current history entry.
    pub fn replace(&mut self, path: &str) -> Result<&Navigation, AppError> {
        let navigation = navigate(&self.router, path)?;
        self.history.replace(navigation.location());
        Ok(self.commit(navigation))
    }

    /// Step back one entry. `Ok(None)` at the start of history.
    pub fn back(&mut self) -> Result<Option<&Navigation>, AppError> {
        self.traverse(-1)
    }

    /// Step forward one entry. `Ok(None)` at the end of history.
    pub fn forward(&mut self) -> Result<Option<&Navigation>, AppError> {
        self.traverse(1)
    }

    pub fn current(&self) -> &Navigation {
        &self.current
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn mount_target(&self) -> &MountTarget {
        &self.mount
    }

    fn traverse(&mut self, delta: isize) -> Result<Option<&Navigation>, AppError> {
        let Some(location) = self.history.go(delta).map(str::to_string) else {
            return Ok(None);
        };

        let navigation = match navigate(&self.router, &location) {
            Ok(navigation) => navigation,
            Err(e) => {
                // Undo the move so history stays consistent with what is shown.
                self.history.go(-delta);
                return Err(e);
            }
        };
        if navigation.redirected_from.is_some() {
            self.history.replace(navigation.location());
        }
        Ok(Some(self.commit(navigation)))
    }

    fn commit(&mut self, navigation: Navigation) -> &Navigation {
        self.renderer.render(&self.mount, &self.title, &navigation);
        self.current = navigation;
        &self.current
    }
}

/// Run one navigation through the router, recording metrics and logs.
fn navigate(router: &Router, path: &str) -> Result<Navigation, AppError> {
    let start = Instant::now();
    let result = router.navigate(path);
    metrics::record_navigation(&result, start);

    result.map_err(|e| {
        tracing::error!(path = %path, error = %e, "Navigation failed");
        AppError::from(e)
    })
}
