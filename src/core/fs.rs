use std::fs;
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};

/// What a handler needs to know about a path before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileStat {
    pub exists: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Permission bits only (`0o7777` mask).
    pub mode: u32,
    pub size: u64,
    pub nlink: u64,
}

impl FileStat {
    pub fn missing() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub stat: FileStat,
}

/// Filesystem operations the command handlers are built on.
///
/// `stat` is total: a missing path is reported through
/// [`FileStat::exists`], everything else surfaces as an `io::Error`.
pub trait FileSystem {
    fn stat(&self, path: &Path) -> io::Result<FileStat>;
    /// Entries of `dir`, sorted by name.
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Creates or truncates `path`.
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    fn copy(&self, src: &Path, dst: &Path) -> io::Result<()>;
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()>;
    fn remove(&self, path: &Path, recursive: bool) -> io::Result<()>;
    fn mkdir(&self, path: &Path, parents: bool) -> io::Result<()>;
    fn chmod(&self, path: &Path, mode: u32) -> io::Result<()>;
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`FileSystem`] backed by the host OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn stat_from(metadata: &fs::Metadata) -> FileStat {
    FileStat {
        exists: true,
        is_dir: metadata.is_dir(),
        is_symlink: metadata.file_type().is_symlink(),
        mode: metadata.permissions().mode() & 0o7777,
        size: metadata.len(),
        nlink: metadata.nlink(),
    }
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(stat_from(&metadata)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileStat::missing()),
            Err(e) => Err(e),
        }
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| {
                let entry = entry?;
                // lstat so a dangling link is still listed
                let metadata = fs::symlink_metadata(entry.path())?;
                Ok(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    stat: stat_from(&metadata),
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }

    fn copy(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::copy(src, dst).map(|_| ())
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::rename(src, dst)
    }

    fn remove(&self, path: &Path, recursive: bool) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if !metadata.is_dir() {
            fs::remove_file(path)
        } else if recursive {
            fs::remove_dir_all(path)
        } else {
            fs::remove_dir(path)
        }
    }

    fn mkdir(&self, path: &Path, parents: bool) -> io::Result<()> {
        if parents {
            fs::create_dir_all(path)
        } else {
            fs::create_dir(path)
        }
    }

    fn chmod(&self, path: &Path, mode: u32) -> io::Result<()> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}
