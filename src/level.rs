use std::{fmt, str::FromStr};

use crate::error::Error;

/// ログの重要度
///
/// 数値が大きいほど重要度が高い。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
}

impl Level {
    /// 重要度の低い順に並べたすべてのレベル
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// レベル名を返却する。
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// レベルの数値を返却する。
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// レベル名からレベルを得る。
///
/// 大文字と小文字は区別しない。レベル名以外は`Error::UnknownLevel`になる。
impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_fixed() {
        let values: Vec<u8> = Level::ALL.iter().map(|l| l.value()).collect();
        assert_eq!(vec![1, 2, 3, 4, 5], values);
    }

    #[test]
    fn test_ordering_follows_values() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_parse_names() {
        for level in Level::ALL {
            assert_eq!(level, level.name().parse::<Level>().unwrap());
        }
        assert_eq!(Level::Warning, "warning".parse::<Level>().unwrap());
    }

    #[test]
    fn test_parse_unknown() {
        match "VERBOSE".parse::<Level>() {
            Err(Error::UnknownLevel(name)) => assert_eq!("VERBOSE", name),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!("WARN".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }
}
