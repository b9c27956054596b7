//! Blob-URL manifest provisioning.

use install_host::{ManifestHandle, ManifestHost};

/// Serializes `content` into a Blob and returns its object URL.
#[cfg(target_arch = "wasm32")]
pub(crate) fn create_object_url(content: &str, mime_type: &str) -> Result<String, String> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| format!("blob creation failed: {err:?}"))?;
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("object URL creation failed: {err:?}"))
}

/// Whether the host can mint object URLs for in-memory documents.
pub(crate) fn resource_urls_supported() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().is_some_and(|window| {
            js_sys::Reflect::get(window.as_ref(), &"URL".into())
                .ok()
                .filter(|url| !url.is_undefined())
                .map(|url| {
                    js_sys::Reflect::has(&url, &"createObjectURL".into()).unwrap_or(false)
                })
                .unwrap_or(false)
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Manifest host publishing the document through a Blob URL and a `link[rel=manifest]`.
pub struct WebManifestHost;

impl ManifestHost for WebManifestHost {
    fn provision(&self, manifest_json: &str) -> Result<ManifestHandle, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()
                .and_then(|window| window.document())
                .ok_or_else(|| "document unavailable".to_string())?;
            let head = document
                .head()
                .ok_or_else(|| "document head unavailable".to_string())?;
            let url = create_object_url(manifest_json, "application/json")?;

            // A page-authored manifest link would shadow ours.
            if let Ok(Some(existing)) = document.query_selector("link[rel=\"manifest\"]") {
                existing.remove();
            }

            let link = document
                .create_element("link")
                .map_err(|err| format!("link element creation failed: {err:?}"))?;
            link.set_attribute("rel", "manifest")
                .and_then(|_| link.set_attribute("href", &url))
                .map_err(|err| format!("link attribute write failed: {err:?}"))?;
            head.append_child(&link)
                .map_err(|err| format!("link injection failed: {err:?}"))?;
            Ok(ManifestHandle { url })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = manifest_json;
            Err("manifest provisioning unavailable".to_string())
        }
    }

    fn revoke(&self, handle: &ManifestHandle) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                let selector = format!("link[rel=\"manifest\"][href=\"{}\"]", handle.url);
                if let Ok(Some(link)) = document.query_selector(&selector) {
                    link.remove();
                }
            }
            let _ = web_sys::Url::revoke_object_url(&handle.url);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = handle;
        }
    }
}
