//! One-time logging setup.
//!
//! The crate itself only emits through the [`log`] facade; hosts that want
//! the messages on a console call [`init`] once at startup. On native
//! targets the sink is `env_logger`, on the web target it is the browser
//! console via `console_log`.

/// Install the platform log sink.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            log::debug!("logger already initialized: {e}");
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
