//! ロガーの設定
//!
//! 設定は`Config`構造体で保持し、セッターまたは`Config::initialize`に渡す
//! ディレクティブで変更する。
//!
//! | ディレクティブ | 値 | 効果 |
//! |---|---|---|
//! | `logfile` | パス | ファイルのパスを設定して、ファイル出力を有効にする |
//! | `verbose` | なし | 補助コンソールストリームへの出力を有効にする |
//! | `loglevel` | レベル名 | 出力するレベルの閾値を設定する |
//! | `logformat` | テンプレート | テンプレートを設定する |
//!
//! ディレクティブは、`--logfile`のように先頭に`-`を付けて指定してもよい。
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    format::{Substitution, DEFAULT_FORMAT},
    level::Level,
};

/// ローテーションするファイルサイズのデフォルト（バイト）
pub const DEFAULT_ROTATION_SIZE: u64 = 1_000_000;

/// ローテーションで残す世代のデフォルト
pub const DEFAULT_ROTATION_KEEP: u32 = 5;

/// ロガーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    threshold: Level,
    format: String,
    substitution: Substitution,
    console_enabled: bool,
    file_enabled: bool,
    file_path: Option<PathBuf>,
    verbose: bool,
    rotation_size: u64,
    rotation_keep: u32,
    auto_rotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: Level::Info,
            format: DEFAULT_FORMAT.to_string(),
            substitution: Substitution::default(),
            console_enabled: true,
            file_enabled: false,
            file_path: None,
            verbose: false,
            rotation_size: DEFAULT_ROTATION_SIZE,
            rotation_keep: DEFAULT_ROTATION_KEEP,
            auto_rotate: false,
        }
    }
}

impl Config {
    /// ディレクティブを順に適用する。
    ///
    /// 認識できないディレクティブや不正な値があった場合は、そこで処理を中断して
    /// エラーを返却する。それより前のディレクティブは適用されたままとなる。
    ///
    /// # 引数
    ///
    /// * options: ディレクティブとその値の並び。
    ///
    /// # 戻り値
    ///
    /// 成功した場合は`()`。
    pub fn initialize<I, S>(&mut self, options: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = options.into_iter();
        while let Some(option) = options.next() {
            let option = option.as_ref();
            match option.trim_start_matches('-') {
                "logfile" => {
                    let path = required_value(option, options.next())?;
                    self.set_file(path);
                }
                "verbose" => self.set_verbose(true),
                "loglevel" => {
                    let name = required_value(option, options.next())?;
                    self.set_level(&name)?;
                }
                "logformat" => {
                    let template = required_value(option, options.next())?;
                    self.set_format(template);
                }
                _ => return Err(Error::InvalidOption(option.to_string())),
            }
        }

        Ok(())
    }

    /// レベル名から閾値を設定する。
    ///
    /// レベル名が不正な場合、閾値は変更しない。
    pub fn set_level(&mut self, name: &str) -> Result<()> {
        self.threshold = name.parse()?;
        Ok(())
    }

    pub fn set_threshold(&mut self, level: Level) {
        self.threshold = level;
    }

    /// ファイルのパスを設定して、ファイル出力を有効にする。
    ///
    /// ファイルの存在は確認しない。
    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
        self.file_enabled = true;
    }

    /// テンプレートを設定する。テンプレートの内容は検証しない。
    pub fn set_format(&mut self, template: impl Into<String>) {
        self.format = template.into();
    }

    pub fn set_substitution(&mut self, substitution: Substitution) {
        self.substitution = substitution;
    }

    pub fn set_console(&mut self, enabled: bool) {
        self.console_enabled = enabled;
    }

    pub fn set_file_enabled(&mut self, enabled: bool) {
        self.file_enabled = enabled;
    }

    /// 補助コンソールストリームへの出力を有効にする。
    ///
    /// 有効な場合、ファイルへの書き込みに失敗したことをコンソールにも出力する。
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
        if verbose {
            self.console_enabled = true;
        }
    }

    /// ローテーションの閾値を設定する。
    ///
    /// # 引数
    ///
    /// * size: ローテーションするファイルサイズ（バイト）。
    /// * keep: 残す世代の最大の番号。
    pub fn set_rotation(&mut self, size: u64, keep: u32) {
        self.rotation_size = size;
        self.rotation_keep = keep;
    }

    /// ファイルに書き込む前に、ローテーションするかどうかを設定する。
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// 指定されたレベルのログを出力するかどうかを返却する。
    pub fn should_emit(&self, level: Level) -> bool {
        level >= self.threshold
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn substitution(&self) -> Substitution {
        self.substitution
    }

    pub fn console_enabled(&self) -> bool {
        self.console_enabled
    }

    pub fn file_enabled(&self) -> bool {
        self.file_enabled
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// ファイル出力が有効で、パスが空でない場合に、そのパスを返却する。
    pub fn active_file(&self) -> Option<&Path> {
        self.file_path()
            .filter(|path| self.file_enabled && !path.as_os_str().is_empty())
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn rotation_size(&self) -> u64 {
        self.rotation_size
    }

    pub fn rotation_keep(&self) -> u32 {
        self.rotation_keep
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }
}

fn required_value<S: AsRef<str>>(option: &str, value: Option<S>) -> Result<String> {
    value
        .map(|value| value.as_ref().to_string())
        .ok_or_else(|| Error::MissingValue(option.to_string()))
}
