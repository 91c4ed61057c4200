// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Key material on the local filesystem, laid out as `<root>/<secret>/<file>`.

use crate::error::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalKeyStore {
    root: PathBuf,
}

impl LocalKeyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, secret: &str, file: &str) -> PathBuf {
        self.root.join(secret).join(file)
    }

    /// Read one file; a missing file surfaces as `ErrorKind::NotFound`
    pub fn read(&self, secret: &str, file: &str) -> io::Result<Vec<u8>> {
        fs::read(self.path(secret, file))
    }

    /// Write one file, readable by the owner only
    pub fn write(&self, secret: &str, file: &str, contents: &[u8]) -> Result<()> {
        let dir = self.root.join(secret);
        create_private_dir(&dir)?;

        let path = dir.join(file);
        let mut f = private_file_options().open(&path)?;
        f.write_all(contents)?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

fn private_file_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalKeyStore::new(dir.path());

        let err = store.read("gogs-ssh", "ssh-key").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalKeyStore::new(dir.path());

        store.write("gogs-ssh", "ssh-key.pub", b"ssh-rsa AAAA\n").unwrap();

        assert_eq!(store.read("gogs-ssh", "ssh-key.pub").unwrap(), b"ssh-rsa AAAA\n");
        assert_eq!(
            store.path("gogs-ssh", "ssh-key.pub"),
            dir.path().join("gogs-ssh").join("ssh-key.pub")
        );
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalKeyStore::new(dir.path());

        store.write("hub", "hub", b"a much longer token").unwrap();
        store.write("hub", "hub", b"short").unwrap();

        assert_eq!(store.read("hub", "hub").unwrap(), b"short");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = LocalKeyStore::new(dir.path());
        store.write("gogs-ssh", "ssh-key", b"private").unwrap();

        let file_mode = fs::metadata(store.path("gogs-ssh", "ssh-key"))
            .unwrap()
            .permissions()
            .mode();
        let dir_mode = fs::metadata(dir.path().join("gogs-ssh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(file_mode & 0o777, 0o600);
        assert_eq!(dir_mode & 0o777, 0o700);
    }
}
