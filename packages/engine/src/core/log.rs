//! Console logging
//!
//! On wasm32 every line goes to the browser console through `web_sys::console`.
//! Native builds (unit tests, headless hosts) capture lines in a thread-local
//! ring so tests can assert on warnings.
//!
//! ```rust
//! use toast_pet_engine::core::log::{take_captured, LogLevel};
//!
//! toast_pet_engine::pet_warn!("unknown action: {}", "dance");
//! let lines = take_captured();
//! assert_eq!(lines[0].0, LogLevel::Warn);
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[cfg(not(target_arch = "wasm32"))]
const CAPTURE_LIMIT: usize = 256;

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static CAPTURED: RefCell<Vec<(LogLevel, String)>> = RefCell::new(Vec::new());
}

pub fn emit(level: LogLevel, message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let line = format!("🍞 {}", message);
        match level {
            LogLevel::Info => web_sys::console::log_1(&line.into()),
            LogLevel::Warn => web_sys::console::warn_1(&line.into()),
            LogLevel::Error => web_sys::console::error_1(&line.into()),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        CAPTURED.with(|c| {
            let mut lines = c.borrow_mut();
            if lines.len() >= CAPTURE_LIMIT {
                lines.remove(0);
            }
            lines.push((level, message.to_string()));
        });
    }
}

/// Drain captured lines (native only)
#[cfg(not(target_arch = "wasm32"))]
pub fn take_captured() -> Vec<(LogLevel, String)> {
    CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

#[macro_export]
macro_rules! pet_log {
    ($($arg:tt)*) => {
        $crate::core::log::emit($crate::core::log::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! pet_warn {
    ($($arg:tt)*) => {
        $crate::core::log::emit($crate::core::log::LogLevel::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! pet_error {
    ($($arg:tt)*) => {
        $crate::core::log::emit($crate::core::log::LogLevel::Error, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_levels_in_order() {
        let _ = take_captured();
        pet_log!("hello {}", 1);
        pet_error!("boom");
        let lines = take_captured();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (LogLevel::Info, "hello 1".to_string()));
        assert_eq!(lines[1].0, LogLevel::Error);
        assert!(take_captured().is_empty());
    }

    #[test]
    fn capture_is_bounded() {
        let _ = take_captured();
        for i in 0..(CAPTURE_LIMIT + 10) {
            pet_log!("line {}", i);
        }
        let lines = take_captured();
        assert_eq!(lines.len(), CAPTURE_LIMIT);
        assert_eq!(lines[0].1, "line 10");
    }
}
