//! Page handles.
//!
//! The router never looks inside a page. It only carries one of these
//! handles from the matched rule to the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of page components shipped with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Page {
    #[serde(rename = "HomePage")]
    Home,
    #[serde(rename = "AboutPage")]
    About,
    #[serde(rename = "TodoPage")]
    Todo,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::About, Page::Todo];

    /// Component name as used in route declarations.
    pub fn component_name(self) -> &'static str {
        match self {
            Page::Home => "HomePage",
            Page::About => "AboutPage",
            Page::Todo => "TodoPage",
        }
    }

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Todo => "Todo",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Returned when a component name is not one of [`Page::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page component: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.component_name() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}
