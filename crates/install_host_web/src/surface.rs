//! DOM prompt surface: card markup, event binding, and the exit animation.

use std::rc::Rc;

use install_host::{PromptActions, PromptSurface, PromptSurfaceFactory, PromptView};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
use crate::styles::{stylesheet, STYLE_ELEMENT_ID};

const CLOSE_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M18 6L6 18M6 6l12 12"/></svg>"#;
const DOWNLOAD_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/><polyline points="7 10 12 15 17 10"/><line x1="12" y1="15" x2="12" y2="3"/></svg>"#;
const CHECK_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5"><polyline points="20 6 9 17 4 12"/></svg>"#;
const LOADING_ICON: &str = r#"<svg viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10" stroke-opacity="0.25"/><path d="M12 2a10 10 0 0 1 10 10" stroke-linecap="round"/></svg>"#;

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn header_html(icon_url: &str, title: &str, subtitle: &str) -> String {
    format!(
        r#"<div class="wtd-header">
  <img class="wtd-icon" src="{icon}" alt="{subtitle}" onerror="this.style.display='none'">
  <div class="wtd-title-wrap">
    <h3 class="wtd-title">{title}</h3>
    <p class="wtd-app-name">{subtitle}</p>
  </div>
</div>"#,
        icon = escape_html(icon_url),
        title = escape_html(title),
        subtitle = escape_html(subtitle),
    )
}

fn close_button_html() -> String {
    format!(r#"<button class="wtd-close" aria-label="Dismiss">{CLOSE_ICON}</button>"#)
}

fn installing_body_html(detail: &str) -> String {
    format!(
        r#"<div class="wtd-installing">
  <div class="wtd-installing-spinner">{LOADING_ICON}</div>
  <p class="wtd-installing-text">{detail}</p>
</div>"#,
        detail = escape_html(detail),
    )
}

/// Renders the inner card markup for one view.
fn card_body(view: &PromptView) -> String {
    match view {
        PromptView::Interactive {
            app_name,
            icon_url,
            title,
            description,
            install_label,
            dismiss_label,
        } => format!(
            r#"{close}
{header}
<p class="wtd-description">{description}</p>
<div class="wtd-buttons">
  <button class="wtd-btn wtd-btn-secondary wtd-dismiss-btn">{dismiss}</button>
  <button class="wtd-btn wtd-btn-primary wtd-install-btn">{DOWNLOAD_ICON}{install}</button>
</div>"#,
            close = close_button_html(),
            header = header_html(icon_url, title, app_name),
            description = escape_html(description),
            dismiss = escape_html(dismiss_label),
            install = escape_html(install_label),
        ),
        PromptView::Guided {
            app_name,
            icon_url,
            title,
            description,
            dismiss_label,
            steps,
        } => {
            let steps_html: String = steps
                .iter()
                .enumerate()
                .map(|(index, step)| {
                    format!(
                        r#"<li class="wtd-step"><span class="wtd-step-num">{number}</span><span class="wtd-step-text">{step}</span></li>"#,
                        number = index + 1,
                        step = escape_html(step),
                    )
                })
                .collect();
            format!(
                r#"{close}
{header}
<p class="wtd-description">{description}</p>
<div class="wtd-guide">
  <ol class="wtd-steps">{steps_html}</ol>
</div>
<div class="wtd-buttons" style="margin-top: 16px;">
  <button class="wtd-btn wtd-btn-secondary wtd-dismiss-btn">{dismiss}</button>
</div>"#,
                close = close_button_html(),
                header = header_html(icon_url, title, app_name),
                description = escape_html(description),
                dismiss = escape_html(dismiss_label),
            )
        }
        PromptView::Installing {
            app_name,
            icon_url,
            status,
            detail,
        } => format!(
            "{header}\n{body}",
            header = header_html(icon_url, app_name, status),
            body = installing_body_html(detail),
        ),
        PromptView::Success { title, description } => format!(
            r#"<div class="wtd-success">
  <div class="wtd-success-icon">{CHECK_ICON}</div>
  <h3 class="wtd-success-title">{title}</h3>
  <p class="wtd-success-desc">{description}</p>
</div>"#,
            title = escape_html(title),
            description = escape_html(description),
        ),
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Default)]
struct MountState {
    container: Option<web_sys::Element>,
    handlers: Vec<Closure<dyn FnMut()>>,
}

#[derive(Default)]
/// Prompt surface owning one card subtree in the live document.
pub struct WebPromptSurface {
    theme_color: String,
    #[cfg(target_arch = "wasm32")]
    state: RefCell<MountState>,
}

impl WebPromptSurface {
    fn new(theme_color: &str) -> Self {
        Self {
            theme_color: theme_color.to_string(),
            #[cfg(target_arch = "wasm32")]
            state: RefCell::new(MountState::default()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn inject_styles(&self, document: &web_sys::Document) -> Result<(), String> {
        if let Some(existing) = document.get_element_by_id(STYLE_ELEMENT_ID) {
            existing.remove();
        }
        let style = document
            .create_element("style")
            .map_err(|err| format!("style element creation failed: {err:?}"))?;
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(&stylesheet(&self.theme_color)));
        document
            .head()
            .ok_or_else(|| "document head unavailable".to_string())?
            .append_child(&style)
            .map_err(|err| format!("style injection failed: {err:?}"))?;
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    fn bind_click(
        &self,
        container: &web_sys::Element,
        selector: &str,
        action: Rc<dyn Fn()>,
    ) {
        let Ok(Some(element)) = container.query_selector(selector) else {
            return;
        };
        let handler = Closure::wrap(Box::new(move || action()) as Box<dyn FnMut()>);
        let _ = element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
        self.state.borrow_mut().handlers.push(handler);
    }
}

impl PromptSurface for WebPromptSurface {
    fn mount(&self, view: &PromptView, actions: PromptActions) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()
                .and_then(|window| window.document())
                .ok_or_else(|| "document unavailable".to_string())?;
            let body = document
                .body()
                .ok_or_else(|| "document body unavailable".to_string())?;
            self.inject_styles(&document)?;

            let container = document
                .create_element("div")
                .map_err(|err| format!("container creation failed: {err:?}"))?;
            container.set_class_name("wtd-container");
            container.set_inner_html(&format!(
                r#"<div class="wtd-card">{}</div>"#,
                card_body(view)
            ));
            body.append_child(&container)
                .map_err(|err| format!("container attach failed: {err:?}"))?;
            self.state.borrow_mut().container = Some(container.clone());

            if let Some(on_install) = actions.on_install {
                self.bind_click(&container, ".wtd-install-btn", on_install);
            }
            self.bind_click(&container, ".wtd-dismiss-btn", actions.on_dismiss.clone());
            self.bind_click(&container, ".wtd-close", actions.on_dismiss);
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (&self.theme_color, view, actions);
            Err("prompt surface unavailable".to_string())
        }
    }

    fn swap(&self, view: &PromptView) {
        #[cfg(target_arch = "wasm32")]
        {
            let state = self.state.borrow();
            let Some(container) = state.container.as_ref() else {
                return;
            };
            if let Ok(Some(card)) = container.query_selector(".wtd-card") {
                card.set_inner_html(&card_body(view));
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = view;
        }
    }

    fn begin_exit(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let state = self.state.borrow();
            let Some(container) = state.container.as_ref() else {
                return;
            };
            if let Some(element) = container.dyn_ref::<web_sys::HtmlElement>() {
                let style = element.style();
                let _ = style.set_property("transition", "opacity 0.3s, transform 0.3s");
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", "translateY(20px)");
            }
        }
    }

    fn detach(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut state = self.state.borrow_mut();
            if let Some(container) = state.container.take() {
                container.remove();
            }
            state.handlers.clear();
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Factory creating one [`WebPromptSurface`] per prompt instance.
pub struct WebPromptSurfaceFactory;

impl PromptSurfaceFactory for WebPromptSurfaceFactory {
    fn create(&self, theme_color: &str) -> Rc<dyn PromptSurface> {
        Rc::new(WebPromptSurface::new(theme_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactive_view() -> PromptView {
        PromptView::Interactive {
            app_name: "Example <App>".to_string(),
            icon_url: "https://example.com/icon.png".to_string(),
            title: "Install Desktop App".to_string(),
            description: "Install this website as a desktop app".to_string(),
            install_label: "Install Now".to_string(),
            dismiss_label: "Not Now".to_string(),
        }
    }

    #[test]
    fn interactive_card_renders_both_actions_and_escapes_text() {
        let html = card_body(&interactive_view());
        assert!(html.contains("wtd-install-btn"));
        assert!(html.contains("wtd-dismiss-btn"));
        assert!(html.contains("wtd-close"));
        assert!(html.contains("Example &lt;App&gt;"));
        assert!(!html.contains("Example <App>"));
    }

    #[test]
    fn guided_card_renders_numbered_steps_without_an_install_action() {
        let html = card_body(&PromptView::Guided {
            app_name: "Example".to_string(),
            icon_url: String::new(),
            title: "Add to Home Screen".to_string(),
            description: "desc".to_string(),
            dismiss_label: "Not Now".to_string(),
            steps: ["one".to_string(), "two".to_string(), "three".to_string()],
        });
        assert!(html.contains("wtd-step-num\">1<"));
        assert!(html.contains("wtd-step-num\">3<"));
        assert!(html.contains("three"));
        assert!(!html.contains("wtd-install-btn"));
    }

    #[test]
    fn installing_and_success_cards_have_no_controls() {
        let installing = card_body(&PromptView::Installing {
            app_name: "Example".to_string(),
            icon_url: String::new(),
            status: "Installing".to_string(),
            detail: "Confirm in the popup".to_string(),
        });
        assert!(installing.contains("wtd-installing-spinner"));
        assert!(!installing.contains("wtd-btn"));

        let success = card_body(&PromptView::Success {
            title: "Installation Complete".to_string(),
            description: "Launch from your desktop".to_string(),
        });
        assert!(success.contains("wtd-success-icon"));
        assert!(!success.contains("wtd-btn"));
    }

    #[test]
    fn escape_html_neutralizes_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
