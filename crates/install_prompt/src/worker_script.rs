//! Generated service-worker source.

/// Pass-through service worker registered to satisfy platform installability checks.
///
/// Install skips waiting, activate claims open clients, and every fetch goes straight to the
/// network so the host page's own request handling is never disturbed.
pub const PASS_THROUGH_WORKER_JS: &str = r#"self.addEventListener('install', () => {
  self.skipWaiting();
});

self.addEventListener('activate', (event) => {
  event.waitUntil(clients.claim());
});

self.addEventListener('fetch', (event) => {
  event.respondWith(fetch(event.request));
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_script_is_a_pure_pass_through() {
        assert!(PASS_THROUGH_WORKER_JS.contains("skipWaiting"));
        assert!(PASS_THROUGH_WORKER_JS.contains("clients.claim"));
        assert!(PASS_THROUGH_WORKER_JS.contains("fetch(event.request)"));
        assert!(!PASS_THROUGH_WORKER_JS.contains("caches"));
    }
}
