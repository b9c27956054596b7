//! Service-worker registrar: reuse an existing registration or register a Blob-URL worker.

use install_host::{WorkerFuture, WorkerRegistrar, WorkerRegistration};

#[cfg(target_arch = "wasm32")]
fn service_worker_container() -> Option<web_sys::ServiceWorkerContainer> {
    let navigator = web_sys::window()?.navigator();
    js_sys::Reflect::has(navigator.as_ref(), &"serviceWorker".into())
        .unwrap_or(false)
        .then(|| navigator.service_worker())
}

#[derive(Debug, Clone, Copy, Default)]
/// Registrar backed by `navigator.serviceWorker`.
pub struct WebWorkerRegistrar;

impl WorkerRegistrar for WebWorkerRegistrar {
    fn ensure_registered<'a>(
        &'a self,
        script: &'a str,
    ) -> WorkerFuture<'a, Result<WorkerRegistration, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen_futures::JsFuture;

                let Some(container) = service_worker_container() else {
                    return Ok(WorkerRegistration::Unsupported);
                };

                let registrations = JsFuture::from(container.get_registrations())
                    .await
                    .map_err(|err| format!("service worker enumeration failed: {err:?}"))?;
                if js_sys::Array::from(&registrations).length() > 0 {
                    return Ok(WorkerRegistration::Reused);
                }

                let url = crate::manifest::create_object_url(script, "text/javascript")?;
                let options = web_sys::RegistrationOptions::new();
                options.set_scope("/");
                JsFuture::from(container.register_with_options(&url, &options))
                    .await
                    .map_err(|err| format!("service worker registration failed: {err:?}"))?;
                Ok(WorkerRegistration::Created)
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = script;
                Ok(WorkerRegistration::Unsupported)
            }
        })
    }

    fn unregister_all<'a>(&'a self) -> WorkerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsCast;
                use wasm_bindgen_futures::JsFuture;

                let Some(container) = service_worker_container() else {
                    return Ok(());
                };
                let registrations = JsFuture::from(container.get_registrations())
                    .await
                    .map_err(|err| format!("service worker enumeration failed: {err:?}"))?;
                for registration in js_sys::Array::from(&registrations).iter() {
                    let registration: web_sys::ServiceWorkerRegistration = registration
                        .dyn_into()
                        .map_err(|_| "unexpected registration object".to_string())?;
                    let pending = registration
                        .unregister()
                        .map_err(|err| format!("service worker unregister failed: {err:?}"))?;
                    JsFuture::from(pending)
                        .await
                        .map_err(|err| format!("service worker unregister failed: {err:?}"))?;
                }
                Ok(())
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                Ok(())
            }
        })
    }
}
