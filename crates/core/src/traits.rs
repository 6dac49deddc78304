//! ObjectStore trait definition
//!
//! The two storage operations s3url needs. The S3 adapter implements it;
//! tests use the generated mock.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::error::Result;
use crate::location::ObjectLocation;

/// Result of uploading a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadInfo {
    /// Absolute path of the uploaded file
    pub path: PathBuf,

    /// Size in bytes
    pub size_bytes: u64,

    /// Content type sent with the object
    pub content_type: String,

    /// ETag returned by the service
    pub etag: Option<String>,
}

/// A signed GET URL and the moment it stops working
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: String,
    pub expires_at: Timestamp,
}

/// Storage operations used by s3url
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `path` as the body of `location`
    ///
    /// The file is opened for the duration of the call only.
    async fn put_object_from_path(&self, location: &ObjectLocation, path: &Path)
        -> Result<UploadInfo>;

    /// Produce a presigned GET URL valid for `expires` from now
    async fn presign_get(&self, location: &ObjectLocation, expires: Duration)
        -> Result<PresignedUrl>;
}
