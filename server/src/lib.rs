#![doc = include_str!("../README.md")]

use tokio::sync::OnceCell;

#[cfg(test)]
#[macro_use]
pub mod test_util;

pub mod airports;
pub mod config;
pub mod offers;
pub mod router;
pub use crate::config::Config;

/// Initialized log4rs handle
pub static LOG_HANDLE: OnceCell<Option<log4rs::Handle>> = OnceCell::const_new();

/// Get the log handle, setting up a stderr logger on first use.
pub async fn get_log_handle() -> Option<log4rs::Handle> {
    LOG_HANDLE
        .get_or_init(|| async move {
            // Set up basic logger on stderr, stdout carries the results
            let stderr = log4rs::append::console::ConsoleAppender::builder()
                .encoder(Box::new(log4rs::encode::pattern::PatternEncoder::new(
                    "{d(%Y-%m-%d %H:%M:%S)} | {I} | {h({l}):5.5} | {f}:{L} | {m}{n}",
                )))
                .target(log4rs::append::console::Target::Stderr)
                .build();
            match log4rs::config::Config::builder()
                .appender(log4rs::config::Appender::builder().build("stderr", Box::new(stderr)))
                .build(
                    log4rs::config::Root::builder()
                        .appender("stderr")
                        .build(log::LevelFilter::Debug),
                ) {
                Ok(config) => log4rs::init_config(config).ok(),
                Err(_) => None,
            }
        })
        .await
        .to_owned()
}

/// Initialize a log4rs logger with provided configuration file path
pub async fn load_logger_config_from_file(config_file: &str) -> Result<(), String> {
    let log_handle = get_log_handle()
        .await
        .ok_or("(load_logger_config_from_file) Could not get the log handle.")?;
    match log4rs::config::load_config_file(config_file, Default::default()) {
        Ok(config) => {
            log_handle.set_config(config);
            Ok(())
        }
        Err(e) => Err(format!(
            "(logger) Could not parse log config file [{}]: {}.",
            config_file, e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_logger_config_from_missing_file() {
        get_log_handle().await;
        ut_info!("(test_load_logger_config_from_missing_file) Start.");

        let result = load_logger_config_from_file("/nonexistent/log4rs.yaml").await;
        assert!(result.is_err());

        ut_info!("(test_load_logger_config_from_missing_file) Success.");
    }
}
