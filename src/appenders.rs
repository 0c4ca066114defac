//! ログを出力するシンク
//!
//! コンソール（補助ストリーム）とファイルの2つのシンクをもつ。どちらに出力するかは
//! `Config`で指定する。一方のシンクへの書き込みに失敗しても、もう一方には書き込む。
use std::{
    fmt::Debug,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::{Mutex, MutexGuard},
};

use crate::{
    config::Config,
    error::{Error, SinkKind},
};

/// コンソールとファイルにログを出力する。
pub struct Appender {
    console: Mutex<Box<dyn Write + Send>>,
}

impl Debug for Appender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Appender").finish_non_exhaustive()
    }
}

/// コンソールシンクを標準エラー出力とする`Appender`
///
/// 標準出力とは独立した補助ストリームとして、標準エラー出力を使用する。専用の
/// ストリームに出力する場合は`Appender::new`を使用する。
impl Default for Appender {
    fn default() -> Self {
        Self::new(io::stderr())
    }
}

impl Appender {
    /// `Appender`を作成する。
    ///
    /// コンソールシンクは補助ストリームであり、標準出力や標準エラー出力とは別の
    /// ストリームを指定できる。`Appender::default`は標準エラー出力を使用する。
    ///
    /// # 引数
    ///
    /// * console: コンソールシンクとして使用するストリーム。
    ///
    /// # 戻り値
    ///
    /// `Appender`インスタンス。
    pub fn new(console: impl Write + Send + 'static) -> Self {
        Self {
            console: Mutex::new(Box::new(console)),
        }
    }

    /// 1行のログを有効なシンクに出力する。
    ///
    /// 行末には改行を付加する。
    ///
    /// # 引数
    ///
    /// * config: ロガーの設定。
    /// * line: 整形したログ。
    ///
    /// # 戻り値
    ///
    /// 書き込みに失敗したシンクのエラー。すべて成功した場合は空。
    pub fn emit(&self, config: &Config, line: &str) -> Vec<Error> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        self.write_all(config, buf.as_bytes())
    }

    /// バイト列を、そのまま有効なシンクに出力する。
    pub(crate) fn write_all(&self, config: &Config, buf: &[u8]) -> Vec<Error> {
        let mut failures = Vec::new();
        if config.console_enabled() {
            if let Err(e) = self.write_console(buf) {
                failures.push(e);
            }
        }
        if let Some(path) = config.active_file() {
            if let Err(e) = append_file(path, buf) {
                failures.push(e);
            }
        }

        failures
    }

    /// 書き込みの失敗を診断情報として報告する。
    ///
    /// `tracing`で警告を出力する。詳細出力が有効な場合は、ファイルへの書き込みの
    /// 失敗をコンソールにも出力する。
    pub fn report(&self, config: &Config, failures: &[Error]) {
        for failure in failures {
            tracing::warn!(error = %failure, "failed to emit log line");

            let file_failed = matches!(
                failure,
                Error::SinkWrite {
                    sink: SinkKind::File,
                    ..
                }
            );
            if config.verbose() && config.console_enabled() && file_failed {
                let diagnostic = format!("logger: {}\n", failure);
                let _ = self.write_console(diagnostic.as_bytes());
            }
        }
    }

    fn write_console(&self, buf: &[u8]) -> Result<(), Error> {
        let mut console = self.lock_console();
        console
            .write_all(buf)
            .and_then(|_| console.flush())
            .map_err(|source| Error::SinkWrite {
                sink: SinkKind::Console,
                source,
            })
    }

    fn lock_console(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.console
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// `tracing-subscriber`から有効なシンクに書き込むライター
///
/// `Logger`の`MakeWriter`実装が作成する。書き込まれたバイト列は整形せずに出力する。
#[derive(Debug)]
pub struct SinkWriter<'a> {
    appender: &'a Appender,
    config: &'a Config,
}

impl<'a> SinkWriter<'a> {
    pub(crate) fn new(appender: &'a Appender, config: &'a Config) -> Self {
        Self { appender, config }
    }
}

impl Write for SinkWriter<'_> {
    /// いずれかのシンクに書き込めた場合は成功とし、失敗したシンクは報告のみ行う。
    /// すべてのシンクへの書き込みに失敗した場合はエラーを返却する。
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let sinks = usize::from(self.config.console_enabled())
            + usize::from(self.config.active_file().is_some());
        let mut failures = self.appender.write_all(self.config, buf);
        if failures.len() < sinks || failures.is_empty() {
            self.appender.report(self.config, &failures);
            return Ok(buf.len());
        }

        match failures.swap_remove(0) {
            Error::SinkWrite { source, .. } => Err(source),
            e => Err(io::Error::other(e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.config.console_enabled() {
            self.appender.lock_console().flush()?;
        }
        Ok(())
    }
}

/// ファイルの末尾にバイト列を追記する。
///
/// ファイルが存在しない場合は作成する。
fn append_file(path: &Path, buf: &[u8]) -> Result<(), Error> {
    create_writer(path)
        .and_then(|mut file| file.write_all(buf))
        .map_err(|source| Error::SinkWrite {
            sink: SinkKind::File,
            source,
        })
}

/// ライターを作成する。
///
/// 親ディレクトリが存在しない場合は、作成してから再度ファイルを開く。
///
/// # 引数
///
/// * path: ログファイルパス。
///
/// # 戻り値
///
/// `File`インスタンス。
fn create_writer(path: &Path) -> io::Result<File> {
    let mut open_options = OpenOptions::new();
    open_options.append(true).create(true);

    let new_file = open_options.open(path);
    if new_file.is_err() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
            return open_options.open(path);
        }
    }

    new_file
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        io::{self, Write},
        sync::{Arc, Mutex},
    };

    /// 書き込まれた内容を保持するコンソール
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 常に書き込みに失敗するコンソール
    #[derive(Debug, Clone, Copy, Default)]
    pub(crate) struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken console"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
