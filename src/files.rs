//! Upload storage on the local filesystem, one folder per day.

use std::path::{Path, PathBuf};

use chrono::Utc;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// URL prefix under which saved uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Everything outside the RFC 3986 unreserved set is escaped in a segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One file received from a client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileElementResponse {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FilesService {
    root: PathBuf,
}

impl FilesService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write every file into today's folder, overwriting same-named files.
    pub async fn save(&self, files: Vec<UploadedFile>) -> ServiceResult<Vec<FileElementResponse>> {
        let folder = Utc::now().format("%Y-%m-%d").to_string();
        let dir = self.root.join(&folder);

        // Check all names before touching the disk.
        let named = files
            .into_iter()
            .map(|file| Ok((sanitize_name(&file.name)?, file.data)))
            .collect::<ServiceResult<Vec<_>>>()?;

        tokio::fs::create_dir_all(&dir).await?;

        let mut saved = Vec::with_capacity(named.len());
        for (name, data) in named {
            tokio::fs::write(dir.join(&name), &data).await?;
            tracing::debug!(file = %name, bytes = data.len(), "upload stored");
            saved.push(FileElementResponse {
                url: format!(
                    "{UPLOADS_URL_PREFIX}/{folder}/{}",
                    utf8_percent_encode(&name, PATH_SEGMENT)
                ),
                name,
            });
        }
        Ok(saved)
    }
}

/// Reduce a client-supplied name to its last path component.
fn sanitize_name(raw: &str) -> ServiceResult<String> {
    let normalized = raw.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(|| ServiceError::InvalidFile(format!("unusable file name {raw:?}")))
}
