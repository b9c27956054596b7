//! DOM page-metadata scrapers.

use install_host::PageContext;

/// Icon link selectors in preference order; larger declared sizes win.
#[cfg(target_arch = "wasm32")]
const ICON_SELECTORS: [&str; 10] = [
    "link[rel=\"apple-touch-icon\"]",
    "link[rel=\"icon\"][sizes=\"192x192\"]",
    "link[rel=\"icon\"][sizes=\"180x180\"]",
    "link[rel=\"icon\"][sizes=\"152x152\"]",
    "link[rel=\"icon\"][sizes=\"144x144\"]",
    "link[rel=\"icon\"][sizes=\"128x128\"]",
    "link[rel=\"icon\"][sizes=\"96x96\"]",
    "link[rel=\"icon\"][type=\"image/png\"]",
    "link[rel=\"shortcut icon\"]",
    "link[rel=\"icon\"]",
];

#[derive(Debug, Clone, Copy, Default)]
/// Page context backed by the live document and location.
pub struct WebPageContext;

#[cfg(target_arch = "wasm32")]
impl WebPageContext {
    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|window| window.document())
    }

    fn location_part(read: impl Fn(&web_sys::Location) -> Result<String, wasm_bindgen::JsValue>) -> String {
        web_sys::window()
            .map(|window| window.location())
            .and_then(|location| read(&location).ok())
            .unwrap_or_default()
    }
}

impl PageContext for WebPageContext {
    fn title(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            let title = Self::document().map(|document| document.title()).unwrap_or_default();
            if title.is_empty() {
                self.hostname()
            } else {
                title
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn icon_url(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            if let Some(document) = Self::document() {
                for selector in ICON_SELECTORS {
                    let Ok(Some(element)) = document.query_selector(selector) else {
                        continue;
                    };
                    // `href` on the link element resolves relative URLs against the document.
                    if let Ok(link) = element.dyn_into::<web_sys::HtmlLinkElement>() {
                        let href = link.href();
                        if !href.is_empty() {
                            return href;
                        }
                    }
                }
            }
            format!("{}/favicon.ico", self.origin())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn meta_theme_color(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::document()?
                .query_selector("meta[name=\"theme-color\"]")
                .ok()
                .flatten()
                .and_then(|meta| meta.get_attribute("content"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn hostname(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            Self::location_part(web_sys::Location::hostname)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn origin(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            Self::location_part(web_sys::Location::origin)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn href(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            Self::location_part(web_sys::Location::href)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            String::new()
        }
    }

    fn language(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window().and_then(|window| window.navigator().language())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}
