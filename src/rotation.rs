//! ファイルサイズによるログファイルのローテーション
//!
//! ログファイルが指定されたサイズ以上になったとき、ログファイルを`{path}.0`に、
//! `{path}.0`を`{path}.1`にというように、番号付きのファイルに1世代ずつずらす。
//! 番号が`keep`のファイルは削除するため、番号付きのファイルは最大で`keep + 1`個になる。
//!
//! ローテーションは、書き込みのたびに自動で行われるわけではない。ホストが任意の
//! タイミングで`rotate`を呼び出す。
use std::{
    ffi::OsString,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use regex::Regex;

use crate::error::{Error, Result, RotationOp};

/// ローテーションの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// ファイルが存在しない、通常のファイルでない、またはサイズが閾値未満のため、何もしなかった
    Skipped,
    /// ローテーションした
    Rotated,
}

/// ログファイルをローテーションする。
///
/// 途中のファイル操作に失敗した場合は、そこでエラーを返却する。それまでに
/// 行ったファイル操作は元に戻さない。
///
/// # 引数
///
/// * path: ログファイルのパス。
/// * max_size: ローテーションするファイルサイズ（バイト）。
/// * keep: 残す世代の最大の番号。
///
/// # 戻り値
///
/// ローテーションの結果。
pub fn rotate(path: impl AsRef<Path>, max_size: u64, keep: u32) -> Result<Rotation> {
    let path = path.as_ref();
    let size = match fs::metadata(path) {
        // ディレクトリなど通常のファイル以外はローテーションしない
        Ok(metadata) if !metadata.is_file() => return Ok(Rotation::Skipped),
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Rotation::Skipped),
        Err(e) => return Err(Error::rotation(RotationOp::Stat, path, e)),
    };
    if size < max_size {
        return Ok(Rotation::Skipped);
    }

    for i in (0..=keep).rev() {
        let generation = generation_path(path, i);
        if !exists(&generation)? {
            continue;
        }
        if i == keep {
            fs::remove_file(&generation)
                .map_err(|e| Error::rotation(RotationOp::Remove, &generation, e))?;
        } else {
            fs::rename(&generation, generation_path(path, i + 1))
                .map_err(|e| Error::rotation(RotationOp::Rename, &generation, e))?;
        }
    }

    fs::rename(path, generation_path(path, 0))
        .map_err(|e| Error::rotation(RotationOp::Rename, path, e))?;
    File::create(path).map_err(|e| Error::rotation(RotationOp::Create, path, e))?;

    tracing::debug!(path = %path.display(), size, keep, "rotated log file");

    Ok(Rotation::Rotated)
}

/// 世代のファイルパス（`{path}.{index}`）を返却する。
pub fn generation_path(path: impl AsRef<Path>, index: u32) -> PathBuf {
    let mut generation = OsString::from(path.as_ref().as_os_str());
    generation.push(format!(".{}", index));
    PathBuf::from(generation)
}

/// 存在する世代のファイルを、番号の小さい順に返却する。
///
/// # 引数
///
/// * path: ログファイルのパス。
///
/// # 戻り値
///
/// 世代の番号とファイルパスの組の一覧。
pub fn generations(path: impl AsRef<Path>) -> Result<Vec<(u32, PathBuf)>> {
    let path = path.as_ref();
    let filename = match path.file_name().and_then(|name| name.to_str()) {
        Some(filename) => filename,
        None => return Ok(Vec::new()),
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let pattern = Regex::new(&format!(r"^{}\.(\d+)$", regex::escape(filename)))
        .map_err(|e| Error::rotation(RotationOp::Stat, path, io::Error::other(e)))?;

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::rotation(RotationOp::Stat, directory, e)),
    };

    let mut generations = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::rotation(RotationOp::Stat, directory, e))?;
        let name = entry.file_name();
        let index = name
            .to_str()
            .and_then(|name| pattern.captures(name))
            .and_then(|caps| caps[1].parse::<u32>().ok());
        if let Some(index) = index {
            generations.push((index, generation_path(path, index)));
        }
    }
    generations.sort_by_key(|(index, _)| *index);

    Ok(generations)
}

fn exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::rotation(RotationOp::Stat, path, e)),
    }
}
