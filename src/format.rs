//! テンプレートによるログ行の整形
//!
//! テンプレートでは、以下のプレースホルダを使用できる。
//!
//! - `%d`: タイムスタンプ（`YYYY-MM-DD HH:MM:SS`）
//! - `%l`: レベル名
//! - `%s`: 呼び出し元の識別子（空の場合は`unknown`）
//! - `%m`: メッセージ
//!
//! これ以外の`%`で始まる文字列は、そのまま出力される。
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// デフォルトのテンプレート
pub const DEFAULT_FORMAT: &str = "%d [%l] [%s] %m";

/// 呼び出し元を特定できなかったときの識別子
pub const UNKNOWN_SOURCE: &str = "unknown";

/// プレースホルダの置換方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Substitution {
    /// テンプレートを1回だけ走査して置換する。
    ///
    /// 置換後の文字列は再走査しないため、メッセージに`%l`などが含まれていても
    /// そのまま出力される。
    #[default]
    SinglePass,
    /// `%d`、`%l`、`%s`、`%m`の順に、文字列全体を置換する。
    ///
    /// 前の置換で挿入された文字列も後の置換の対象になる。例えば、呼び出し元の
    /// 識別子に含まれる`%m`は、メッセージに置換される。
    Sequential,
}

/// 整形する1件のログ
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level_name: &'a str,
    pub message: &'a str,
    pub source: &'a str,
    pub timestamp: &'a str,
}

impl Record<'_> {
    fn source(&self) -> &str {
        if self.source.is_empty() {
            UNKNOWN_SOURCE
        } else {
            self.source
        }
    }
}

/// テンプレートに従って、ログを1行の文字列に整形する。
///
/// # 引数
///
/// - template: テンプレート。
/// - record: 整形するログ。
/// - substitution: プレースホルダの置換方法。
///
/// # 戻り値
///
/// 整形した文字列（改行を含まない）。
pub fn format(template: &str, record: &Record<'_>, substitution: Substitution) -> String {
    match substitution {
        Substitution::SinglePass => format_single_pass(template, record),
        Substitution::Sequential => format_sequential(template, record),
    }
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new("%[dlsm]").expect(
            "Unable to compile the placeholder pattern; this is a bug in leveled-rotating-logger",
        )
    })
}

fn format_single_pass(template: &str, record: &Record<'_>) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures<'_>| match &caps[0] {
            "%d" => record.timestamp.to_string(),
            "%l" => record.level_name.to_string(),
            "%s" => record.source().to_string(),
            _ => record.message.to_string(),
        })
        .into_owned()
}

fn format_sequential(template: &str, record: &Record<'_>) -> String {
    template
        .replace("%d", record.timestamp)
        .replace("%l", record.level_name)
        .replace("%s", record.source())
        .replace("%m", record.message)
}
