//! # 输入文件写出
//!
//! 所有检查（内容为空、未指定目录、未指定文件名）都在打开目标文件之前完成，
//! 失败时不会留下半截文件。已存在的文件直接覆盖。
//!
//! ## 依赖关系
//! - 被 `qe/generator.rs` 使用

use crate::error::{DftgenError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 将文本原样写入 `location/filename`，返回写入的路径
pub fn write_input_file(
    text: &str,
    location: Option<&Path>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    if text.trim().is_empty() {
        return Err(DftgenError::NothingToWrite);
    }
    let location = location.ok_or(DftgenError::MissingLocation)?;
    let filename = filename
        .filter(|name| !name.is_empty())
        .ok_or(DftgenError::MissingFilename)?;

    let path = location.join(filename);
    fs::write(&path, text).map_err(|e| DftgenError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_before_touching_filesystem() {
        let missing = Path::new("/path/to/write_location");

        assert!(matches!(
            write_input_file("\n  \n", Some(missing), Some("pw.in")),
            Err(DftgenError::NothingToWrite)
        ));
        assert!(matches!(
            write_input_file("&CONTROL\n/", None, Some("pw.in")),
            Err(DftgenError::MissingLocation)
        ));
        assert!(matches!(
            write_input_file("&CONTROL\n/", Some(missing), None),
            Err(DftgenError::MissingFilename)
        ));
        assert!(matches!(
            write_input_file("&CONTROL\n/", Some(missing), Some("")),
            Err(DftgenError::MissingFilename)
        ));
        assert!(!missing.exists());
    }

    #[test]
    fn test_writes_verbatim_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("scf.in");
        fs::write(&target, "old content that is longer than the new one").unwrap();

        let path = write_input_file("&CONTROL\n/", Some(dir.path()), Some("scf.in")).unwrap();
        assert_eq!(path, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "&CONTROL\n/");
    }

    #[test]
    fn test_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let nowhere = dir.path().join("does").join("not").join("exist");
        assert!(matches!(
            write_input_file("&CONTROL\n/", Some(&nowhere), Some("pw.in")),
            Err(DftgenError::FileWriteError { .. })
        ));
    }
}
