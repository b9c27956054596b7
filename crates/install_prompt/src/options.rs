//! Prompt configuration: the per-session option record and its shallow-merge patch.

use std::rc::Rc;

use crate::i18n::LocaleOverrides;
use crate::manifest_doc::ManifestOptions;

/// Default delay before showing the prompt after an eligibility signal, in milliseconds.
pub const DEFAULT_DELAY_MS: u32 = 500;
/// Default theme color for the prompt card and generated manifest.
pub const DEFAULT_THEME_COLOR: &str = "#4f46e5";
/// Default snooze window after a dismissal, in days.
pub const DEFAULT_DISMISS_EXPIRE_DAYS: u32 = 7;

/// How the prompt behaves on platforms with a native install flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Render title, description, and explicit install/dismiss actions.
    #[default]
    Interactive,
    /// Render an installing placeholder and invoke the native prompt immediately.
    Auto,
}

/// Immutable-per-session prompt configuration.
///
/// Created once at controller construction and replaced wholesale by
/// [`InstallPromptOptions::apply`]; every other component reads it through the controller.
#[derive(Clone)]
pub struct InstallPromptOptions {
    /// Delay before first showing UI after an eligibility signal, in milliseconds.
    pub delay_ms: u32,
    /// Theme color applied to the prompt card and generated manifest.
    pub theme_color: String,
    /// Days a dismissal suppresses the prompt; `0` disables the snooze window.
    pub dismiss_expire_days: u32,
    /// Emit diagnostic logging for internal decisions.
    pub debug: bool,
    /// Prompt behavior on platforms with a native install flow.
    pub install_mode: InstallMode,
    /// Caller text overrides merged over the built-in bundles per locale.
    pub custom_i18n: Option<LocaleOverrides>,
    /// Caller overrides for generated manifest fields.
    pub manifest_options: Option<ManifestOptions>,
    /// Invoked once when an installation is confirmed.
    pub on_installed: Option<Rc<dyn Fn()>>,
    /// Invoked when the user dismisses the prompt.
    pub on_dismiss: Option<Rc<dyn Fn()>>,
    /// Invoked before UI is constructed; returning `false` cancels that occasion.
    pub on_before_show: Option<Rc<dyn Fn() -> bool>>,
}

impl Default for InstallPromptOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

impl InstallPromptOptions {
    /// Options with every field at its documented default.
    pub fn defaults() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            dismiss_expire_days: DEFAULT_DISMISS_EXPIRE_DAYS,
            debug: false,
            install_mode: InstallMode::Interactive,
            custom_i18n: None,
            manifest_options: None,
            on_installed: None,
            on_dismiss: None,
            on_before_show: None,
        }
    }

    /// Shallow-merges `patch` over the current value; unset patch fields keep their value.
    pub fn apply(&mut self, patch: InstallPromptOptionsPatch) {
        if let Some(delay_ms) = patch.delay_ms {
            self.delay_ms = delay_ms;
        }
        if let Some(theme_color) = patch.theme_color {
            self.theme_color = theme_color;
        }
        if let Some(dismiss_expire_days) = patch.dismiss_expire_days {
            self.dismiss_expire_days = dismiss_expire_days;
        }
        if let Some(debug) = patch.debug {
            self.debug = debug;
        }
        if let Some(install_mode) = patch.install_mode {
            self.install_mode = install_mode;
        }
        if let Some(custom_i18n) = patch.custom_i18n {
            self.custom_i18n = custom_i18n;
        }
        if let Some(manifest_options) = patch.manifest_options {
            self.manifest_options = manifest_options;
        }
        if let Some(on_installed) = patch.on_installed {
            self.on_installed = on_installed;
        }
        if let Some(on_dismiss) = patch.on_dismiss {
            self.on_dismiss = on_dismiss;
        }
        if let Some(on_before_show) = patch.on_before_show {
            self.on_before_show = on_before_show;
        }
    }
}

/// Partial update for [`InstallPromptOptions`]; `Some` fields replace, `None` fields keep.
///
/// Optional option fields patch as `Some(None)` to clear and `Some(Some(_))` to replace.
#[derive(Clone, Default)]
pub struct InstallPromptOptionsPatch {
    /// New prompt delay in milliseconds.
    pub delay_ms: Option<u32>,
    /// New theme color.
    pub theme_color: Option<String>,
    /// New snooze window in days.
    pub dismiss_expire_days: Option<u32>,
    /// New debug-logging flag.
    pub debug: Option<bool>,
    /// New install mode.
    pub install_mode: Option<InstallMode>,
    /// New text overrides.
    pub custom_i18n: Option<Option<LocaleOverrides>>,
    /// New manifest overrides.
    pub manifest_options: Option<Option<ManifestOptions>>,
    /// New installed callback.
    pub on_installed: Option<Option<Rc<dyn Fn()>>>,
    /// New dismiss callback.
    pub on_dismiss: Option<Option<Rc<dyn Fn()>>>,
    /// New pre-show predicate.
    pub on_before_show: Option<Option<Rc<dyn Fn() -> bool>>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let options = InstallPromptOptions::defaults();
        assert_eq!(options.delay_ms, 500);
        assert_eq!(options.theme_color, "#4f46e5");
        assert_eq!(options.dismiss_expire_days, 7);
        assert!(!options.debug);
        assert_eq!(options.install_mode, InstallMode::Interactive);
        assert!(options.custom_i18n.is_none() && options.manifest_options.is_none());
    }

    #[test]
    fn apply_merges_shallowly_and_keeps_unset_fields() {
        let mut options = InstallPromptOptions::defaults();
        options.apply(InstallPromptOptionsPatch {
            theme_color: Some("#000000".to_string()),
            ..Default::default()
        });
        assert_eq!(options.theme_color, "#000000");
        assert_eq!(options.delay_ms, 500);
        assert_eq!(options.dismiss_expire_days, 7);

        options.apply(InstallPromptOptionsPatch {
            delay_ms: Some(0),
            debug: Some(true),
            install_mode: Some(InstallMode::Auto),
            ..Default::default()
        });
        assert_eq!(options.delay_ms, 0);
        assert!(options.debug);
        assert_eq!(options.install_mode, InstallMode::Auto);
        assert_eq!(options.theme_color, "#000000");
    }

    #[test]
    fn optional_fields_patch_to_cleared_and_replaced() {
        let mut options = InstallPromptOptions::defaults();
        options.apply(InstallPromptOptionsPatch {
            on_installed: Some(Some(Rc::new(|| {}))),
            ..Default::default()
        });
        assert!(options.on_installed.is_some());

        options.apply(InstallPromptOptionsPatch {
            on_installed: Some(None),
            ..Default::default()
        });
        assert!(options.on_installed.is_none());
    }
}
