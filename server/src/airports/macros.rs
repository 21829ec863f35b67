//! log macro's for airports logging

/// Writes a debug! message to the app::airports logger
#[macro_export]
macro_rules! airports_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::airports", $($arg)+)
    };
}

/// Writes an info! message to the app::airports logger
#[macro_export]
macro_rules! airports_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::airports", $($arg)+)
    };
}

/// Writes an warn! message to the app::airports logger
#[macro_export]
macro_rules! airports_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::airports", $($arg)+)
    };
}

/// Writes an error! message to the app::airports logger
#[macro_export]
macro_rules! airports_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::airports", $($arg)+)
    };
}
