//! log macro's for offers logging

/// Writes a debug! message to the app::offers logger
#[macro_export]
macro_rules! offers_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::offers", $($arg)+)
    };
}

/// Writes an info! message to the app::offers logger
#[macro_export]
macro_rules! offers_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::offers", $($arg)+)
    };
}

/// Writes an warn! message to the app::offers logger
#[macro_export]
macro_rules! offers_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::offers", $($arg)+)
    };
}

/// Writes an error! message to the app::offers logger
#[macro_export]
macro_rules! offers_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::offers", $($arg)+)
    };
}
