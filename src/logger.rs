//! レベル付きのログを出力するロガー
use std::{panic::Location, path::Path};

use tracing_subscriber::fmt::MakeWriter;

use crate::{
    appenders::{Appender, SinkWriter},
    clock::{self, Clock, SystemClock},
    config::Config,
    error::Result,
    format::{self, Record, UNKNOWN_SOURCE},
    level::Level,
    rotation::{self, Rotation},
};

/// レベル付きのログを、設定に従って整形してシンクに出力する。
///
/// ログの出力でエラーが発生しても、呼び出し元には返却しない。
pub struct Logger {
    config: Config,
    appender: Appender,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("appender", &self.appender)
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Logger {
    /// `Logger`を作成する。
    ///
    /// コンソールシンクは標準エラー出力になる。
    pub fn new(config: Config) -> Self {
        Self {
            config,
            appender: Appender::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// コンソールシンクとして使用するストリームを設定する。
    pub fn with_console(mut self, console: impl std::io::Write + Send + 'static) -> Self {
        self.appender = Appender::new(console);
        self
    }

    /// タイムスタンプに使用する`Clock`を設定する。
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// ディレクティブを設定に適用する。`Config::initialize`を参照。
    pub fn initialize<I, S>(&mut self, options: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.initialize(options)
    }

    /// 設定されたログファイルをローテーションする。
    ///
    /// ログファイルのパスが設定されていない場合は何もしない。
    pub fn rotate(&self) -> Result<Rotation> {
        match self.config.file_path() {
            Some(path) => rotation::rotate(
                path,
                self.config.rotation_size(),
                self.config.rotation_keep(),
            ),
            None => Ok(Rotation::Skipped),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// ログを出力する。
    ///
    /// 呼び出し元の識別子は、呼び出し元のソースファイル名（拡張子を除く）になる。
    #[track_caller]
    pub fn log(&self, level: Level, message: &str) {
        let source = caller_source(Location::caller());
        self.log_from(level, source, message);
    }

    /// 呼び出し元の識別子を指定して、ログを出力する。
    ///
    /// # 引数
    ///
    /// * level: ログのレベル。
    /// * source: 呼び出し元の識別子。空の場合は`unknown`になる。
    /// * message: メッセージ。
    pub fn log_from(&self, level: Level, source: &str, message: &str) {
        if !self.config.should_emit(level) {
            return;
        }

        let timestamp = clock::timestamp(&self.clock.now());
        let record = Record {
            level_name: level.name(),
            message,
            source,
            timestamp: &timestamp,
        };
        let line = format::format(self.config.format(), &record, self.config.substitution());

        if self.config.auto_rotate() && self.config.active_file().is_some() {
            if let Err(e) = self.rotate() {
                tracing::warn!(error = %e, "failed to rotate log file before writing");
            }
        }

        let failures = self.appender.emit(&self.config, &line);
        self.appender.report(&self.config, &failures);
    }
}

impl<'a> MakeWriter<'a> for Logger {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter::new(&self.appender, &self.config)
    }
}

fn caller_source(location: &'static Location<'static>) -> &'static str {
    Path::new(location.file())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
}
