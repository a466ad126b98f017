//! # syno-fs
//!
//! A read-only, hierarchical filesystem view over Synology File
//! Station, built on [`syno_api`].
//!
//! A [`SynoFs`] is mounted at a remote directory and resolves every
//! operation against that root. Nothing is cached: each `open`, `stat`
//! and `read_dir` is one remote call returning a snapshot. Directory
//! listings return the server's first page in server order.
//!
//! ```ignore
//! use std::sync::Arc;
//! use syno_fs::{FileSystem, SynoFs};
//!
//! let fs = SynoFs::mount(Arc::clone(&client), "/home")?;
//! for entry in fs.read_dir("")? {
//!     println!("{} {}", entry.name(), entry.size());
//! }
//! let photos = fs.sub("photos")?; // rooted at /home/photos
//! ```

use std::io::Read;
use std::sync::Arc;

use syno_api::filestation::{FileStationApi, ListRequest};
use syno_api::{ByteStream, Client};

mod entry;
mod error;

pub use entry::DirEntry;
pub use error::Error;

/// Augmentation fields every metadata-bearing call asks for.
const STAT_FIELDS: [&str; 2] = ["size", "time"];

/// Read-only filesystem capability.
///
/// Paths are resolved against the implementation's mount root by plain
/// concatenation; the empty path names the root itself. No `..`
/// normalization is performed, so callers supply already-sane relative
/// paths.
pub trait FileSystem: Sized {
    /// Open a file for reading as a byte stream.
    fn open(&self, name: &str) -> Result<File, Error>;

    /// Fetch metadata for a single entry.
    fn stat(&self, name: &str) -> Result<DirEntry, Error>;

    /// List a directory, in server order. Only the first page of an
    /// oversized directory is returned.
    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>, Error>;

    /// A new filesystem rooted at `name`, which must be an existing
    /// directory.
    fn sub(&self, name: &str) -> Result<Self, Error>;
}

/// File Station-backed [`FileSystem`].
///
/// Holds only the mount root and a shared API client; every operation
/// re-issues a remote call.
#[derive(Debug, Clone)]
pub struct SynoFs {
    client: Arc<Client>,
    root: String,
}

impl SynoFs {
    /// Mount at `root`, an absolute remote path such as `/home`.
    ///
    /// Fails if the path does not resolve to an existing directory;
    /// there is no unmounted state.
    pub fn mount(client: Arc<Client>, root: &str) -> Result<Self, Error> {
        let root = root.trim_end_matches('/');
        if root.is_empty() || !root.starts_with('/') {
            return Err(Error::InvalidRoot {
                message: format!("{:?}: mount root must be an absolute path", root),
            });
        }
        let fs = Self {
            client,
            root: root.to_string(),
        };
        let entry = fs.stat_absolute(&fs.root)?;
        if !entry.is_dir() {
            return Err(Error::NotADirectory {
                path: fs.root.clone(),
            });
        }
        Ok(fs)
    }

    /// The absolute remote path this filesystem treats as `/`.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn resolve(&self, name: &str) -> String {
        if name.is_empty() {
            self.root.clone()
        } else {
            format!("{}/{}", self.root, name)
        }
    }

    fn stat_absolute(&self, path: &str) -> Result<DirEntry, Error> {
        let response = FileStationApi::new(&self.client)
            .get_info(&[path], &STAT_FIELDS)
            .map_err(|e| Error::not_found_on_api_code(e, path))?;
        // A record without the requested augmentation means the entry is
        // absent or inaccessible; both look like not-found to consumers.
        let record = response
            .files
            .into_iter()
            .next()
            .filter(|file| file.additional.is_some())
            .ok_or_else(|| Error::NotFound {
                path: path.to_string(),
            })?;
        Ok(DirEntry::new(record))
    }
}

impl FileSystem for SynoFs {
    fn open(&self, name: &str) -> Result<File, Error> {
        let path = self.resolve(name);
        let stream = FileStationApi::new(&self.client)
            .download(&[path.as_str()], "download")
            .map_err(|e| Error::not_found_on_api_code(e, &path))?;
        Ok(File {
            fs: self.clone(),
            path,
            stream,
        })
    }

    fn stat(&self, name: &str) -> Result<DirEntry, Error> {
        self.stat_absolute(&self.resolve(name))
    }

    fn read_dir(&self, name: &str) -> Result<Vec<DirEntry>, Error> {
        let path = self.resolve(name);
        let page = FileStationApi::new(&self.client)
            .list(&ListRequest {
                folder_path: path.clone(),
                additional: STAT_FIELDS.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            })
            .map_err(|e| Error::not_found_on_api_code(e, &path))?;
        Ok(page.files.into_iter().map(DirEntry::new).collect())
    }

    fn sub(&self, name: &str) -> Result<Self, Error> {
        let path = self.resolve(name);
        let entry = self.stat_absolute(&path)?;
        if !entry.is_dir() {
            return Err(Error::NotADirectory { path });
        }
        Ok(Self {
            client: Arc::clone(&self.client),
            root: path,
        })
    }
}

/// An open file: a caller-owned byte stream plus enough identity to
/// answer [`File::stat`] by re-issuing a metadata call. Dropping the
/// file releases the underlying connection.
pub struct File {
    fs: SynoFs,
    path: String,
    stream: ByteStream,
}

impl File {
    /// The resolved absolute path of this file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current metadata for this file's logical path. Not cached at
    /// open time; this is a fresh remote call.
    pub fn stat(&self) -> Result<DirEntry, Error> {
        self.fs.stat_absolute(&self.path)
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.stream.read(buf)
    }
}
