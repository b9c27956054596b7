//! Page-metadata contracts: the document facts the prompt and manifest are derived from.

/// Host service answering metadata questions about the current document.
///
/// Everything the runtime needs from the page funnels through this trait so manifest assembly
/// and prompt rendering stay independent of DOM access.
pub trait PageContext {
    /// Document title, falling back to the hostname when empty.
    fn title(&self) -> String;

    /// Best available app icon URL (apple-touch-icon first, then sized icon links, then
    /// `/favicon.ico`).
    fn icon_url(&self) -> String;

    /// `<meta name="theme-color">` content, if declared.
    fn meta_theme_color(&self) -> Option<String>;

    /// Hostname of the current location.
    fn hostname(&self) -> String;

    /// Origin of the current location.
    fn origin(&self) -> String;

    /// Full URL of the current location.
    fn href(&self) -> String;

    /// Preferred UI language tag reported by the host, e.g. `en-US`.
    fn language(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
/// In-memory page context for tests and non-browser targets.
pub struct MemoryPageContext {
    /// Document title.
    pub title: String,
    /// App icon URL.
    pub icon_url: String,
    /// Declared theme color.
    pub meta_theme_color: Option<String>,
    /// Location hostname.
    pub hostname: String,
    /// Location origin.
    pub origin: String,
    /// Location href.
    pub href: String,
    /// Preferred language tag.
    pub language: Option<String>,
}

impl Default for MemoryPageContext {
    fn default() -> Self {
        Self {
            title: "Example App".to_string(),
            icon_url: "https://example.com/favicon.ico".to_string(),
            meta_theme_color: None,
            hostname: "example.com".to_string(),
            origin: "https://example.com".to_string(),
            href: "https://example.com/".to_string(),
            language: Some("en".to_string()),
        }
    }
}

impl PageContext for MemoryPageContext {
    fn title(&self) -> String {
        if self.title.is_empty() {
            self.hostname.clone()
        } else {
            self.title.clone()
        }
    }

    fn icon_url(&self) -> String {
        self.icon_url.clone()
    }

    fn meta_theme_color(&self) -> Option<String> {
        self.meta_theme_color.clone()
    }

    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn href(&self) -> String {
        self.href.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }
}
