//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic frame clock, wall-clock timestamps)
//! - Confirmation prompts
//! - Re-entrant host callbacks

use std::cell::RefCell;

/// Synchronous yes/no question shown before destructive actions
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Run `f` on the shared value unless it is already borrowed.
///
/// Host callbacks can fire while another handler is still running, e.g. a
/// window blur delivered during a modal `confirm()`. Those nested events are
/// dropped instead of panicking on a second mutable borrow.
pub fn try_dispatch<T, R>(shared: &RefCell<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    match shared.try_borrow_mut() {
        Ok(mut value) => Some(f(&mut value)),
        Err(_) => {
            log::debug!("Dropped event delivered during another handler");
            None
        }
    }
}

/// `window.confirm()` dialog
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConfirm;

#[cfg(target_arch = "wasm32")]
impl ConfirmPrompt for BrowserConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// Monotonic time in milliseconds (same clock as requestAnimationFrame)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Current wall-clock time as an ISO-8601 string
#[cfg(target_arch = "wasm32")]
pub fn iso_timestamp() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// Monotonic time in milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Current wall-clock time as an ISO-8601 string (UTC, millisecond precision)
#[cfg(not(target_arch = "wasm32"))]
pub fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
