//! Navigation sources.
//!
//! A [`History`] owns the list of visited locations. The router reads the
//! current location from it and writes redirect targets back into it.

/// Source and sink of navigation locations.
pub trait History {
    /// Location currently shown in the address bar.
    fn location(&self) -> &str;

    /// Add a new entry, dropping any forward entries.
    fn push(&mut self, location: String);

    /// Overwrite the current entry.
    fn replace(&mut self, location: String);

    /// Move `delta` entries through the history. Returns the new location,
    /// or `None` (without moving) if the target is out of range.
    fn go(&mut self, delta: isize) -> Option<&str>;
}

/// In-process history, used where there is no browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    position: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            position: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        &self.entries[self.position]
    }

    fn push(&mut self, location: String) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position += 1;
    }

    fn replace(&mut self, location: String) {
        self.entries[self.position] = location;
    }

    fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        Some(self.location())
    }
}

/// Normalize a base path: leading '/', no trailing '/' (except the root).
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Remove `base` from the front of a path (no query or fragment).
///
/// Paths outside the base are returned unchanged so the catch-all still
/// sees them.
pub fn strip_base<'a>(base: &str, path: &'a str) -> &'a str {
    if base == "/" {
        return path;
    }
    match path.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Prefix `location` with `base` for use in an outgoing URL.
pub fn with_base(base: &str, location: &str) -> String {
    if base == "/" {
        location.to_string()
    } else {
        format!("{base}{location}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_history_push_and_go() {
        let mut history = MemoryHistory::new("/todo");
        history.push("/about".into());
        history.push("/todo#3".into());
        assert_eq!(history.location(), "/todo#3");

        assert_eq!(history.go(-2), Some("/todo"));
        assert_eq!(history.go(-1), None);
        assert_eq!(history.position(), 0);
        assert_eq!(history.go(1), Some("/about"));

        // Pushing from the middle drops forward entries.
        history.push("/home".into());
        assert_eq!(history.entries(), ["/todo", "/about", "/home"]);
        assert_eq!(history.go(1), None);
    }

    #[test]
    fn test_memory_history_replace() {
        let mut history = MemoryHistory::default();
        history.replace("/todo".into());
        assert_eq!(history.entries(), ["/todo"]);
    }

    #[test]
    fn test_base_helpers() {
        assert_eq!(normalize_base(""), "/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("/tasks/"), "/tasks");
        assert_eq!(normalize_base("tasks"), "/tasks");

        assert_eq!(strip_base("/", "/todo"), "/todo");
        assert_eq!(strip_base("/tasks", "/tasks/todo"), "/todo");
        assert_eq!(strip_base("/tasks", "/tasks"), "/");
        assert_eq!(strip_base("/tasks", "/tasksx"), "/tasksx");
        assert_eq!(strip_base("/tasks", "/other"), "/other");

        assert_eq!(with_base("/", "/todo"), "/todo");
        assert_eq!(with_base("/tasks", "/todo"), "/tasks/todo");
    }
}
