//! File Station endpoints: directory listing, metadata lookup, download.
//!
//! Covers `SYNO.FileStation.List` (list, list_share, getinfo) and
//! `SYNO.FileStation.Download`. Listing calls return exactly one page;
//! pagination, when wanted, is driven by the caller through
//! `offset`/`limit`.

use serde::{Deserialize, Serialize};

use crate::client::{ByteStream, Client, Params};
use crate::error::Error;

const LIST_API: &str = "SYNO.FileStation.List";
const DOWNLOAD_API: &str = "SYNO.FileStation.Download";

/// One page of a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub total: u64,
    pub offset: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

/// A file or directory record.
///
/// `children` is present only when the call explicitly asked for nested
/// expansion (`goto_path`); `additional` only when augmentation fields
/// were requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isdir")]
    pub is_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<Folder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<FileAdditional>,
}

/// Augmentation metadata, returned only when requested per call.
/// Every field is a snapshot at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAdditional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_path: Option<String>,
    #[serde(default)]
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perm: Option<Permissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point_type: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub uid: i64,
    #[serde(default)]
    pub gid: i64,
}

/// Unix timestamps, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Time {
    #[serde(default)]
    pub atime: i64,
    #[serde(default)]
    pub mtime: i64,
    #[serde(default)]
    pub ctime: i64,
    #[serde(default)]
    pub crtime: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default)]
    pub posix: u32,
    #[serde(default)]
    pub is_acl_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Acl>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Acl {
    #[serde(default)]
    pub append: bool,
    #[serde(default)]
    pub del: bool,
    #[serde(default)]
    pub exec: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
}

/// One page of the shared-folder (volume root) listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFolderPage {
    pub total: u64,
    pub offset: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shares: Vec<SharedFolder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFolder {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<SharedFolderAdditional>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFolderAdditional {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_status: Option<VolumeStatus>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeStatus {
    #[serde(default)]
    pub freespace: i64,
    #[serde(default)]
    pub totalspace: i64,
    #[serde(default)]
    pub readonly: bool,
}

/// Request for [`FileStationApi::list`]. Zero/empty fields are omitted
/// from the query.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub folder_path: String,
    pub offset: u64,
    pub limit: u64,
    pub sort_by: String,
    pub sort_direction: String,
    pub pattern: Vec<String>,
    pub file_type: String,
    pub goto_path: String,
    /// Augmentation fields to request, e.g. `size`, `time`, `owner`.
    pub additional: Vec<String>,
}

/// Request for [`FileStationApi::list_share`].
#[derive(Debug, Clone, Default)]
pub struct ListShareRequest {
    pub offset: u64,
    pub limit: u64,
    pub sort_by: String,
    pub sort_direction: String,
    pub only_writable: bool,
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetInfoResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

pub struct FileStationApi<'a> {
    client: &'a Client,
}

impl<'a> FileStationApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the contents of a folder. Returns the single requested page
    /// in server order.
    pub fn list(&self, req: &ListRequest) -> Result<Folder, Error> {
        let mut params = Params::new().with("offset", req.offset.to_string());
        if !req.folder_path.is_empty() {
            params = params.with("folder_path", req.folder_path.as_str());
        }
        if req.limit != 0 {
            params = params.with("limit", req.limit.to_string());
        }
        if !req.sort_by.is_empty() {
            params = params.with("sort_by", req.sort_by.as_str());
        }
        if !req.sort_direction.is_empty() {
            params = params.with("sort_direction", req.sort_direction.as_str());
        }
        if !req.pattern.is_empty() {
            params = params.with("pattern", req.pattern.join(","));
        }
        if !req.file_type.is_empty() {
            params = params.with("filetype", req.file_type.as_str());
        }
        if !req.goto_path.is_empty() {
            params = params.with("goto_path", req.goto_path.as_str());
        }
        if !req.additional.is_empty() {
            params = params.with_json("additional", &req.additional)?;
        }
        self.client.invoke(LIST_API, 2, "list", &params)
    }

    /// List shared folders, the roots of the remote namespace.
    pub fn list_share(&self, req: &ListShareRequest) -> Result<SharedFolderPage, Error> {
        let mut params = Params::new().with("offset", req.offset.to_string());
        if req.limit != 0 {
            params = params.with("limit", req.limit.to_string());
        }
        if !req.sort_by.is_empty() {
            params = params.with("sort_by", req.sort_by.as_str());
        }
        if !req.sort_direction.is_empty() {
            params = params.with("sort_direction", req.sort_direction.as_str());
        }
        if req.only_writable {
            params = params.with("onlywritable", "true");
        }
        if !req.additional.is_empty() {
            params = params.with_json("additional", &req.additional)?;
        }
        self.client.invoke(LIST_API, 2, "list_share", &params)
    }

    /// Fetch metadata for specific paths. Paths travel as one JSON-array
    /// query value, so one call can cover several entries.
    pub fn get_info(&self, paths: &[&str], additional: &[&str]) -> Result<GetInfoResponse, Error> {
        let mut params = Params::new();
        if !paths.is_empty() {
            params = params.with_json("path", &paths)?;
        }
        if !additional.is_empty() {
            params = params.with_json("additional", &additional)?;
        }
        self.client.invoke(LIST_API, 2, "getinfo", &params)
    }

    /// Download file content as a raw byte stream. Several paths yield a
    /// zip archive; `mode` is normally `"download"`.
    pub fn download(&self, paths: &[&str], mode: &str) -> Result<ByteStream, Error> {
        let mut params = Params::new();
        if !paths.is_empty() {
            params = params.with_json("path", &paths)?;
        }
        if !mode.is_empty() {
            params = params.with("mode", mode);
        }
        self.client.invoke_raw(DOWNLOAD_API, 2, "download", &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_decodes_wire_names() {
        let json = r#"{
            "path": "/home/notes.txt",
            "name": "notes.txt",
            "isdir": false,
            "additional": {
                "real_path": "/volume1/homes/admin/notes.txt",
                "size": 1234,
                "time": {"atime": 1, "mtime": 2, "ctime": 3, "crtime": 4},
                "type": "txt"
            }
        }"#;
        let file: File = serde_json::from_str(json).unwrap();
        assert!(!file.is_dir);
        let additional = file.additional.unwrap();
        assert_eq!(additional.size, 1234);
        assert_eq!(additional.kind.as_deref(), Some("txt"));
        assert_eq!(additional.time.unwrap().mtime, 2);
    }

    #[test]
    fn folder_tolerates_missing_files_field() {
        let folder: Folder = serde_json::from_str(r#"{"total":0,"offset":0}"#).unwrap();
        assert!(folder.files.is_empty());
    }
}
