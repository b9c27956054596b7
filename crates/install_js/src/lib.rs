//! Plain-JS and Vue entry: a `wasm_bindgen`-exported class over the prompt controller.
//!
//! ```js
//! const prompt = new WebToDesktop({ themeColor: '#0ea5e9', dismissExpire: 14 });
//! prompt.start();
//! ```

use std::rc::Rc;

use install_prompt::{
    InstallMode, InstallPrompt, InstallPromptOptions, InstallPromptOptionsPatch, LocaleOverrides,
    ManifestOptions,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// JS-facing option fields; callbacks are read reflectively because functions cannot cross
/// the serde boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JsOptions {
    delay: Option<u32>,
    theme_color: Option<String>,
    dismiss_expire: Option<u32>,
    debug: Option<bool>,
    install_mode: Option<String>,
    custom_i18n: Option<LocaleOverrides>,
    manifest_options: Option<ManifestOptions>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsSnapshot {
    delay: u32,
    theme_color: String,
    dismiss_expire: u32,
    debug: bool,
    install_mode: InstallMode,
    custom_i18n: Option<LocaleOverrides>,
    manifest_options: Option<ManifestOptions>,
}

fn parse_install_mode(value: Option<&str>) -> Option<InstallMode> {
    match value {
        Some("auto") => Some(InstallMode::Auto),
        Some(_) => Some(InstallMode::Interactive),
        None => None,
    }
}

fn options_patch(parsed: JsOptions) -> InstallPromptOptionsPatch {
    InstallPromptOptionsPatch {
        delay_ms: parsed.delay,
        theme_color: parsed.theme_color,
        dismiss_expire_days: parsed.dismiss_expire,
        debug: parsed.debug,
        install_mode: parse_install_mode(parsed.install_mode.as_deref()),
        custom_i18n: parsed.custom_i18n.map(Some),
        manifest_options: parsed.manifest_options.map(Some),
        on_installed: None,
        on_dismiss: None,
        on_before_show: None,
    }
}

fn callback_field(options: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(options, &name.into())
        .ok()
        .and_then(|value| value.dyn_into().ok())
}

fn js_callback(function: js_sys::Function) -> Rc<dyn Fn()> {
    Rc::new(move || {
        if let Err(err) = function.call0(&JsValue::NULL) {
            log::warn!("install prompt callback threw: {err:?}");
        }
    })
}

/// An explicit `false` cancels display; any other return (or a throw) lets it proceed.
fn js_predicate(function: js_sys::Function) -> Rc<dyn Fn() -> bool> {
    Rc::new(move || {
        function
            .call0(&JsValue::NULL)
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(true)
    })
}

fn callbacks_patch(options: &JsValue) -> InstallPromptOptionsPatch {
    InstallPromptOptionsPatch {
        on_installed: callback_field(options, "onInstalled").map(|f| Some(js_callback(f))),
        on_dismiss: callback_field(options, "onDismiss").map(|f| Some(js_callback(f))),
        on_before_show: callback_field(options, "onBeforeShow").map(|f| Some(js_predicate(f))),
        ..Default::default()
    }
}

fn decode_options(options: &JsValue) -> Result<InstallPromptOptions, JsValue> {
    let mut resolved = InstallPromptOptions::defaults();
    if options.is_undefined() || options.is_null() {
        return Ok(resolved);
    }
    let parsed: JsOptions = serde_wasm_bindgen::from_value(options.clone())
        .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?;
    resolved.apply(options_patch(parsed));
    resolved.apply(callbacks_patch(options));
    Ok(resolved)
}

fn init_runtime(debug: bool) {
    console_error_panic_hook::set_once();
    install_host_web::init_console_logging(if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
}

/// Prompts visitors to install the current site as a desktop app.
#[wasm_bindgen]
pub struct WebToDesktop {
    inner: InstallPrompt,
}

#[wasm_bindgen]
impl WebToDesktop {
    /// Builds a controller from a plain options object; every field is optional.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebToDesktop, JsValue> {
        let resolved = decode_options(&options)?;
        init_runtime(resolved.debug);
        Ok(Self {
            inner: InstallPrompt::new(install_host_web::build_host_services(), resolved),
        })
    }

    /// Runs `init` once the DOM is ready (immediately when it already is).
    pub fn start(&self) {
        let prompt = self.inner.clone();
        let run = move || {
            let prompt = prompt.clone();
            wasm_bindgen_futures::spawn_local(async move {
                prompt.init().await;
            });
        };

        #[cfg(target_arch = "wasm32")]
        {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                if document.ready_state() == "loading" {
                    let once = Closure::once_into_js(run);
                    let _ = document
                        .add_event_listener_with_callback("DOMContentLoaded", once.unchecked_ref());
                    return;
                }
            }
            run();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            run();
        }
    }

    /// Runs the gated startup sequence; idempotent.
    pub async fn init(&self) {
        self.inner.init().await;
    }

    /// On-demand install; resolves `true` only on confirmed acceptance.
    pub async fn install(&self) -> bool {
        self.inner.install().await
    }

    /// Hides the prompt if one is showing.
    pub fn hide(&self) {
        self.inner.hide();
    }

    /// Tears the controller down; idempotent.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    /// Whether an install path is currently available.
    #[wasm_bindgen(js_name = canInstall)]
    pub fn can_install(&self) -> bool {
        self.inner.can_install()
    }

    /// Whether an installation was recorded or the page runs standalone.
    #[wasm_bindgen(js_name = isInstalled)]
    pub fn is_installed(&self) -> bool {
        self.inner.is_installed()
    }

    /// Immediately shows the prompt, bypassing the delay and snooze gates.
    #[wasm_bindgen(js_name = showPromptManual)]
    pub fn show_prompt_manual(&self) -> bool {
        self.inner.show_prompt_manual()
    }

    /// Clears the persisted dismissal and installed records.
    #[wasm_bindgen(js_name = resetDismissState)]
    pub fn reset_dismiss_state(&self) {
        self.inner.reset_dismiss_state();
    }

    /// Shallow-merges a partial options object over the current configuration.
    #[wasm_bindgen(js_name = updateOptions)]
    pub fn update_options(&self, options: JsValue) -> Result<(), JsValue> {
        if options.is_undefined() || options.is_null() {
            return Ok(());
        }
        let parsed: JsOptions = serde_wasm_bindgen::from_value(options.clone())
            .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?;
        self.inner.update_options(options_patch(parsed));
        self.inner.update_options(callbacks_patch(&options));
        Ok(())
    }

    /// Snapshot of the current configuration (callbacks excluded).
    #[wasm_bindgen(js_name = getOptions)]
    pub fn get_options(&self) -> Result<JsValue, JsValue> {
        let options = self.inner.options();
        let snapshot = OptionsSnapshot {
            delay: options.delay_ms,
            theme_color: options.theme_color,
            dismiss_expire: options.dismiss_expire_days,
            debug: options.debug,
            install_mode: options.install_mode,
            custom_i18n: options.custom_i18n,
            manifest_options: options.manifest_options,
        };
        serde_wasm_bindgen::to_value(&snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Snapshot of every platform-detection boolean.
    #[wasm_bindgen(js_name = getPlatformInfo)]
    pub fn get_platform_info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.platform_info())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn install_mode_strings_map_to_variants() {
        assert_eq!(parse_install_mode(Some("auto")), Some(InstallMode::Auto));
        assert_eq!(
            parse_install_mode(Some("interactive")),
            Some(InstallMode::Interactive)
        );
        assert_eq!(parse_install_mode(None), None);
    }

    #[test]
    fn options_patch_maps_js_field_names_onto_the_core_record() {
        let parsed = JsOptions {
            delay: Some(0),
            theme_color: Some("#000000".to_string()),
            dismiss_expire: Some(30),
            debug: Some(true),
            install_mode: Some("auto".to_string()),
            ..Default::default()
        };
        let mut options = InstallPromptOptions::defaults();
        options.apply(options_patch(parsed));

        assert_eq!(options.delay_ms, 0);
        assert_eq!(options.theme_color, "#000000");
        assert_eq!(options.dismiss_expire_days, 30);
        assert!(options.debug);
        assert_eq!(options.install_mode, InstallMode::Auto);
    }

    #[test]
    fn unset_js_fields_keep_the_documented_defaults() {
        let mut options = InstallPromptOptions::defaults();
        options.apply(options_patch(JsOptions::default()));
        assert_eq!(options.delay_ms, 500);
        assert_eq!(options.theme_color, "#4f46e5");
        assert_eq!(options.dismiss_expire_days, 7);
    }
}
