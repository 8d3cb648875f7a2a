use crate::config::Logging;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct GalleryLogger;

static LOGGER: GalleryLogger = GalleryLogger;

impl Log for GalleryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

fn format_line(level: Level, args: &std::fmt::Arguments) -> String {
    format!("[{}] gallery: {}", level.as_str().to_lowercase(), args)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, line: &str) {
    let color = match level {
        Level::Error => "1;31",
        Level::Warn => "1;33",
        _ => "2",
    };
    eprintln!("\x1b[{}m{}\x1b[0m", color, line);
}

/// Installs the console sink unless another logger is already registered,
/// then applies the level allowed for `host`.
pub fn init(config: &Logging, host: &str) -> LevelFilter {
    let _ = log::set_logger(&LOGGER);
    let level = config.effective_level(host);
    log::set_max_level(level);
    level
}
