//! Leveled Rotating Logger
//!
//! ----------------------------------------------------------------------------
//!
//! このクレートには、レベル付きのログを出力する`Logger`構造体が含まれている。
//! `Logger`は、ログのレベルを設定された閾値と比較し、閾値以上のログをテンプレートに
//! 従って整形して、コンソールとファイルに出力する。
//!
//! また、ファイルサイズによるログファイルのローテーションを行う`rotate`関数をもつ。
//! ローテーションは、ログファイルを`{path}.0`、`{path}.0`を`{path}.1`というように
//! 番号付きのファイルにずらし、最も古いファイルを削除する。
//!
//! ```no_run
//! use leveled_rotating_logger::{Config, Logger};
//!
//! let mut config = Config::default();
//! config
//!     .initialize(["--logfile", "app.log", "--loglevel", "DEBUG"])
//!     .unwrap();
//!
//! let logger = Logger::new(config);
//! logger.info("application started");
//! leveled_rotating_logger::warning!(logger, "{} retries left", 3);
//!
//! logger.rotate().unwrap();
//! ```

pub mod appenders;
pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod rotation;

pub use config::Config;
pub use error::{Error, Result};
pub use format::Substitution;
pub use level::Level;
pub use logger::Logger;
pub use rotation::{rotate, Rotation};

/// 呼び出し元のモジュールパスを識別子として、ログを出力する。
///
/// ```no_run
/// use leveled_rotating_logger::{log, Level, Logger};
///
/// let logger = Logger::default();
/// log!(logger, Level::Info, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_from($level, ::std::module_path!(), &::std::format!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::appenders::testing::Buffer;

    #[test]
    fn test_macros_use_module_path() {
        let console = Buffer::default();
        let mut logger = Logger::default()
            .with_console(console.clone())
            .with_clock(|| datetime!(2024-01-15 10:30:00 UTC));
        logger.config_mut().set_format("[%l] [%s] %m");
        logger.config_mut().set_threshold(Level::Debug);

        debug!(logger, "value={}", 1);
        info!(logger, "value={}", 2);
        warning!(logger, "value={}", 3);
        error!(logger, "value={}", 4);
        critical!(logger, "value={}", 5);

        assert_eq!(
            "[DEBUG] [leveled_rotating_logger::tests] value=1\n\
             [INFO] [leveled_rotating_logger::tests] value=2\n\
             [WARNING] [leveled_rotating_logger::tests] value=3\n\
             [ERROR] [leveled_rotating_logger::tests] value=4\n\
             [CRITICAL] [leveled_rotating_logger::tests] value=5\n",
            console.contents()
        );
    }

    #[test]
    fn test_macros_respect_threshold() {
        let console = Buffer::default();
        let logger = Logger::default().with_console(console.clone());

        debug!(logger, "hidden");
        assert_eq!("", console.contents());
    }
}
