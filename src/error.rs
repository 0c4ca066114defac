use std::{fmt, io, path::PathBuf};

/// ロガーのエラー
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 認識できないディレクティブ
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// 値を必要とするディレクティブに値が指定されていない
    #[error("missing value for option: {0}")]
    MissingValue(String),

    /// 認識できないログレベル名
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    /// シンクへの書き込みに失敗
    #[error("failed to write to {sink} sink: {source}")]
    SinkWrite {
        sink: SinkKind,
        #[source]
        source: io::Error,
    },

    /// ローテーション中のファイル操作に失敗
    #[error("failed to {op} {}: {source}", .path.display())]
    Rotation {
        op: RotationOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// 書き込みに失敗したシンクの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => f.write_str("console"),
            SinkKind::File => f.write_str("file"),
        }
    }
}

/// 失敗したローテーションの操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOp {
    Stat,
    Remove,
    Rename,
    Create,
}

impl fmt::Display for RotationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            RotationOp::Stat => "stat",
            RotationOp::Remove => "remove",
            RotationOp::Rename => "rename",
            RotationOp::Create => "create",
        };
        f.write_str(op)
    }
}

impl Error {
    pub(crate) fn rotation(op: RotationOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Rotation {
            op,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_write_message() {
        let err = Error::SinkWrite {
            sink: SinkKind::File,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!("failed to write to file sink: denied", err.to_string());
    }

    #[test]
    fn test_rotation_message() {
        let err = Error::rotation(
            RotationOp::Rename,
            "/var/log/app.log",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!("failed to rename /var/log/app.log: gone", err.to_string());
    }
}
