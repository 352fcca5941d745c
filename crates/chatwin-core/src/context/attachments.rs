//! Document context built from an active file plus attachments

/// Builder for the external document context
///
/// Each unique path is fenced once; the active file wins over an attachment
/// with the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    active: Option<String>,
    attachments: Vec<String>,
}

impl DocumentContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active file path
    pub fn with_active(mut self, path: impl Into<String>) -> Self {
        self.active = Some(path.into());
        self
    }

    /// Attach another file path
    pub fn attach(mut self, path: impl Into<String>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// Paths in fence order: active first, then attachments, without repeats
    pub fn unique_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        let candidates = self
            .active
            .iter()
            .chain(self.attachments.iter())
            .map(String::as_str)
            .filter(|p| !p.is_empty());
        for path in candidates {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Render the context, reading each file through `read`
    ///
    /// Paths for which `read` returns `None` are skipped.
    pub fn build<F>(&self, read: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = String::new();
        for path in self.unique_paths() {
            let Some(content) = read(path) else {
                tracing::debug!("Skipping unreadable context file {}", path);
                continue;
            };
            let is_active = self.active.as_deref() == Some(path);
            let (begin, end) = if is_active {
                (
                    format!("--- BEGIN ACTIVE FILE: {} ---", path),
                    "--- END ACTIVE FILE ---",
                )
            } else {
                (
                    format!("--- BEGIN ATTACHED FILE: {} ---", path),
                    "--- END ATTACHED FILE ---",
                )
            };
            out.push_str(&format!("{}\n{}\n{}\n\n", begin, content, end));
        }
        out
    }
}
