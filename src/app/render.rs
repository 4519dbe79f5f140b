//! Rendering boundary.
//!
//! Page markup lives outside this crate. The renderer only places a page
//! handle into the mount target of an HTML shell.

use std::fmt::Write;

use crate::app::MountTarget;
use crate::routing::Navigation;

/// Receives the page selected by each navigation.
pub trait Renderer {
    fn render(&mut self, mount: &MountTarget, title: &str, navigation: &Navigation);
}

/// Renders an HTML document and keeps the latest one.
#[derive(Debug, Default, Clone)]
pub struct HtmlRenderer {
    last: Option<String>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered document.
    pub fn last_document(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Renderer for HtmlRenderer {
    fn render(&mut self, mount: &MountTarget, title: &str, navigation: &Navigation) {
        self.last = Some(render_document(mount, title, navigation));
    }
}

/// Build the HTML shell for `navigation`.
pub fn render_document(mount: &MountTarget, title: &str, navigation: &Navigation) -> String {
    let page = navigation.page;
    let mut html = String::with_capacity(512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape_html(page.title()),
        escape_html(title)
    );
    html.push_str("</head>\n<body>\n");
    let _ = write!(
        html,
        "<div id=\"{}\" data-route=\"{}\"",
        escape_html(mount.id()),
        escape_html(&navigation.path)
    );
    if let Some(from) = &navigation.redirected_from {
        let _ = write!(html, " data-redirected-from=\"{}\"", escape_html(from));
    }
    html.push_str(">\n");
    let _ = writeln!(
        html,
        "<main data-component=\"{}\"><h1>{}</h1></main>",
        page.component_name(),
        escape_html(page.title())
    );
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Router;

    #[test]
    fn test_document_contains_mount_and_page() {
        let mount = MountTarget::parse("#app").unwrap();
        let nav = Router::default().navigate("/todo").unwrap();

        let html = render_document(&mount, "Todo", &nav);
        assert!(html.contains("<div id=\"app\" data-route=\"/todo\">"));
        assert!(html.contains("data-component=\"TodoPage\""));
        assert!(html.contains("<title>Todo | Todo</title>"));
    }

    #[test]
    fn test_redirect_source_is_escaped() {
        let mount = MountTarget::parse("#app").unwrap();
        let nav = Router::default()
            .navigate("/<script>alert(1)</script>")
            .unwrap();

        let html = render_document(&mount, "Todo", &nav);
        assert!(!html.contains("<script>"));
        assert!(html.contains("data-redirected-from=\"/&lt;script&gt;alert(1)&lt;/script&gt;\""));
    }

    #[test]
    fn test_html_renderer_keeps_last_document() {
        let mount = MountTarget::parse("#app").unwrap();
        let mut renderer = HtmlRenderer::new();
        assert!(renderer.last_document().is_none());

        let nav = Router::default().navigate("/").unwrap();
        renderer.render(&mount, "Todo", &nav);
        assert!(renderer.last_document().unwrap().contains("TodoPage"));
    }
}
