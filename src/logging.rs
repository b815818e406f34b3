//! Console logging bootstrap.

/// Route `log` records to the browser console and surface panics there.
pub fn init(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}
