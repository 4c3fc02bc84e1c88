//! ワークブックの単一書き込みロック
//!
//! `<workbook>.lock` に OS のアドバイザリロック（fs2）をかける。
//! 同時実行された2つ目のプロセスは `WorkbookLocked` で失敗する。
//! ロックはファイルを閉じた時点で解放され、プロセスが強制終了した場合もカーネルが解放する。
//! ロックファイル自体は残す。

use crate::error::{FxReportError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct WorkbookLock {
    path: PathBuf,
    file: File,
}

impl WorkbookLock {
    pub fn acquire(workbook_path: &Path) -> Result<Self> {
        let path = Self::lock_path(workbook_path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(lock = %path.display(), "workbook lock acquired");
                Ok(Self { path, file })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(FxReportError::WorkbookLocked(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn lock_path(workbook_path: &Path) -> PathBuf {
        let mut name = workbook_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        workbook_path.with_file_name(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkbookLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release workbook lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lock_path() {
        let path = WorkbookLock::lock_path(Path::new("/data/exchange_rates.xlsx"));
        assert_eq!(path, PathBuf::from("/data/exchange_rates.xlsx.lock"));
    }

    #[test]
    fn test_second_acquire_fails_until_released() {
        let dir = tempdir().unwrap();
        let workbook = dir.path().join("exchange_rates.xlsx");

        let lock = WorkbookLock::acquire(&workbook).unwrap();
        assert!(lock.path().exists());

        let second = WorkbookLock::acquire(&workbook);
        assert!(matches!(second, Err(FxReportError::WorkbookLocked(_))));

        drop(lock);
        assert!(WorkbookLock::acquire(&workbook).is_ok());
    }

    #[test]
    fn test_stale_lock_file_does_not_block() {
        let dir = tempdir().unwrap();
        let workbook = dir.path().join("exchange_rates.xlsx");

        // 強制終了したプロセスが残したロックファイル（ロックは保持されていない）
        std::fs::write(WorkbookLock::lock_path(&workbook), "12345\n").unwrap();

        let lock = WorkbookLock::acquire(&workbook);
        assert!(lock.is_ok(), "stale lock file blocked acquire: {:?}", lock.err());
    }
}
