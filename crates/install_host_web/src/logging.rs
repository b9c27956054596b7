//! Console-backed writer for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("{}", record.args());

        #[cfg(target_arch = "wasm32")]
        {
            use log::Level;

            let value = wasm_bindgen::JsValue::from_str(&message);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::log_1(&value),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{}: {message}", record.level());
        }
    }

    fn flush(&self) {}
}

/// Routes `log` output to the browser console.
///
/// Safe to call more than once; only the first installation wins, and a logger installed by
/// the host application is left in place.
pub fn init_console_logging(max_level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}
