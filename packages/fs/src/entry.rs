//! Directory entries derived from File Station records.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use syno_api::filestation;

/// A single file or directory entry.
///
/// Wraps the wire record verbatim; derived accessors use sentinels for
/// absent augmentation rather than inventing values: `size` is `-1`
/// when size metadata was not returned (distinguishing "unknown" from
/// an actual zero-byte file) and `mod_time` is the Unix epoch when time
/// metadata was not returned.
#[derive(Debug, Clone)]
pub struct DirEntry {
    record: filestation::File,
}

impl DirEntry {
    pub(crate) fn new(record: filestation::File) -> Self {
        Self { record }
    }

    /// Last segment of the record's path.
    pub fn name(&self) -> &str {
        self.record
            .path
            .rsplit('/')
            .next()
            .unwrap_or(self.record.path.as_str())
    }

    pub fn is_dir(&self) -> bool {
        self.record.is_dir
    }

    /// Size in bytes, or `-1` when size augmentation is absent.
    pub fn size(&self) -> i64 {
        match &self.record.additional {
            Some(additional) => additional.size,
            None => -1,
        }
    }

    /// Modification time, or the Unix epoch when time augmentation is
    /// absent. Pre-1970 timestamps are preserved, not clamped.
    pub fn mod_time(&self) -> SystemTime {
        match self.record.additional.as_ref().and_then(|a| a.time) {
            Some(time) if time.mtime >= 0 => UNIX_EPOCH + Duration::from_secs(time.mtime as u64),
            Some(time) => UNIX_EPOCH - Duration::from_secs(time.mtime.unsigned_abs()),
            None => UNIX_EPOCH,
        }
    }

    /// The underlying wire record, for callers that need fields beyond
    /// the generic entry surface (owner, permissions, real path).
    pub fn record(&self) -> &filestation::File {
        &self.record
    }

    pub fn into_record(self) -> filestation::File {
        self.record
    }
}
