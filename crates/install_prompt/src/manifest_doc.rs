//! Web-app manifest document model and page-derived assembly.

use install_host::PageContext;
use serde::{Deserialize, Serialize};

/// Background color used when no override is supplied.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// One icon entry in the generated manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    /// Icon resource URL.
    pub src: String,
    /// Declared pixel dimensions, e.g. `192x192`.
    pub sizes: String,
    /// MIME type of the icon resource.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Declared icon purposes.
    pub purpose: String,
}

impl ManifestIcon {
    fn png(src: &str, sizes: &str) -> Self {
        Self {
            src: src.to_string(),
            sizes: sizes.to_string(),
            mime_type: "image/png".to_string(),
            purpose: "any maskable".to_string(),
        }
    }
}

/// The manifest document handed to the platform's installability checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppManifest {
    /// Stable app identity derived from the hostname.
    pub id: String,
    /// Full application name.
    pub name: String,
    /// Short name shown under the launcher icon.
    pub short_name: String,
    /// Application description.
    pub description: String,
    /// UI theme color.
    pub theme_color: String,
    /// Splash/background color.
    pub background_color: String,
    /// Display mode requested from the platform.
    pub display: String,
    /// Orientation requested from the platform.
    pub orientation: String,
    /// URL loaded when the installed app launches.
    pub start_url: String,
    /// Navigation scope of the installed app.
    pub scope: String,
    /// Launcher icon set.
    pub icons: Vec<ManifestIcon>,
    /// Store-style category hints.
    pub categories: Vec<String>,
    /// Whether the platform should prefer a native app listing instead.
    pub prefer_related_applications: bool,
}

/// Caller overrides for generated manifest fields; unset fields keep the page-derived value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestOptions {
    /// Full application name.
    pub name: Option<String>,
    /// Short name shown under the launcher icon.
    pub short_name: Option<String>,
    /// Application description.
    pub description: Option<String>,
    /// UI theme color.
    pub theme_color: Option<String>,
    /// Splash/background color.
    pub background_color: Option<String>,
    /// Display mode requested from the platform.
    pub display: Option<String>,
    /// Orientation requested from the platform.
    pub orientation: Option<String>,
    /// URL loaded when the installed app launches.
    pub start_url: Option<String>,
    /// Navigation scope of the installed app.
    pub scope: Option<String>,
    /// Launcher icon set replacing the page-derived defaults.
    pub icons: Option<Vec<ManifestIcon>>,
}

/// Derives a stable app id from the hostname.
///
/// Uses the classic 32-bit string hash (`h = (h << 5) - h + unit`, wrapping) over UTF-16 code
/// units, rendered as `pwa-<hash in base36>` so the same hostname always maps to the same id.
pub fn generate_app_id(hostname: &str) -> String {
    let mut hash: i32 = 0;
    for unit in hostname.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    format!("pwa-{}", to_base36(hash.unsigned_abs()))
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Assembles the manifest from page metadata, the active theme color, and caller overrides.
pub fn build_manifest(
    page: &dyn PageContext,
    theme_color: &str,
    options: Option<&ManifestOptions>,
) -> WebAppManifest {
    let fallback = ManifestOptions::default();
    let options = options.unwrap_or(&fallback);

    let name = options.name.clone().unwrap_or_else(|| page.title());
    let short_name = options.short_name.clone().unwrap_or_else(|| name.clone());
    let description = match options.description.as_deref() {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => format!("{name} desktop app"),
    };
    let icon_url = page.icon_url();
    let icons = options.icons.clone().unwrap_or_else(|| {
        vec![
            ManifestIcon::png(&icon_url, "192x192"),
            ManifestIcon::png(&icon_url, "512x512"),
        ]
    });

    WebAppManifest {
        id: generate_app_id(&page.hostname()),
        name,
        short_name,
        description,
        theme_color: options
            .theme_color
            .clone()
            .unwrap_or_else(|| theme_color.to_string()),
        background_color: options
            .background_color
            .clone()
            .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
        display: options.display.clone().unwrap_or_else(|| "standalone".to_string()),
        orientation: options.orientation.clone().unwrap_or_else(|| "any".to_string()),
        start_url: options.start_url.clone().unwrap_or_else(|| page.href()),
        scope: options.scope.clone().unwrap_or_else(|| page.origin()),
        icons,
        categories: vec!["productivity".to_string(), "utilities".to_string()],
        prefer_related_applications: false,
    }
}

#[cfg(test)]
mod tests {
    use install_host::MemoryPageContext;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn app_id_is_stable_and_hostname_scoped() {
        let id = generate_app_id("example.com");
        assert_eq!(id, generate_app_id("example.com"));
        assert_ne!(id, generate_app_id("example.org"));
        assert!(id.starts_with("pwa-"));
        assert_eq!(generate_app_id(""), "pwa-0");
    }

    #[test]
    fn defaults_derive_from_the_page() {
        let page = MemoryPageContext::default();
        let manifest = build_manifest(&page, "#4f46e5", None);

        assert_eq!(manifest.name, "Example App");
        assert_eq!(manifest.short_name, "Example App");
        assert_eq!(manifest.description, "Example App desktop app");
        assert_eq!(manifest.theme_color, "#4f46e5");
        assert_eq!(manifest.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!(manifest.display, "standalone");
        assert_eq!(manifest.orientation, "any");
        assert_eq!(manifest.start_url, "https://example.com/");
        assert_eq!(manifest.scope, "https://example.com");
        assert_eq!(manifest.icons.len(), 2);
        assert_eq!(manifest.icons[0].sizes, "192x192");
        assert_eq!(manifest.icons[1].sizes, "512x512");
        assert_eq!(manifest.icons[0].src, "https://example.com/favicon.ico");
        assert!(!manifest.prefer_related_applications);
    }

    #[test]
    fn overrides_replace_individual_fields() {
        let page = MemoryPageContext::default();
        let options = ManifestOptions {
            name: Some("Custom".to_string()),
            theme_color: Some("#111111".to_string()),
            icons: Some(vec![ManifestIcon::png("https://example.com/a.png", "256x256")]),
            ..Default::default()
        };
        let manifest = build_manifest(&page, "#4f46e5", Some(&options));

        assert_eq!(manifest.name, "Custom");
        assert_eq!(manifest.short_name, "Custom");
        assert_eq!(manifest.description, "Custom desktop app");
        assert_eq!(manifest.theme_color, "#111111");
        assert_eq!(manifest.icons.len(), 1);
        assert_eq!(manifest.start_url, "https://example.com/");
    }

    #[test]
    fn manifest_serializes_with_platform_field_names() {
        let page = MemoryPageContext::default();
        let json = serde_json::to_value(build_manifest(&page, "#4f46e5", None))
            .expect("serialize manifest");
        assert_eq!(json["short_name"], "Example App");
        assert_eq!(json["icons"][0]["type"], "image/png");
        assert_eq!(json["prefer_related_applications"], serde_json::Value::Bool(false));
    }
}
