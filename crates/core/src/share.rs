//! Upload-then-presign orchestration

use jiff::Timestamp;

use crate::error::Result;
use crate::request::ShareRequest;
use crate::traits::{ObjectStore, UploadInfo};

/// Everything produced by one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    /// Presigned GET URL
    pub url: String,
    /// When the URL stops being accepted
    pub expires_at: Timestamp,
    /// Present when a file was uploaded first
    pub uploaded: Option<UploadInfo>,
}

/// Upload the requested file (if any), then presign the object
///
/// The upload finishes before signing starts. A failed presign does not
/// remove an object that was already uploaded.
pub async fn share(store: &dyn ObjectStore, request: &ShareRequest) -> Result<ShareOutcome> {
    let uploaded = match &request.upload {
        Some(path) => {
            tracing::debug!(path = %path.display(), location = %request.location, "uploading");
            let info = store.put_object_from_path(&request.location, path).await?;
            tracing::info!(
                path = %info.path.display(),
                size_bytes = info.size_bytes,
                "upload complete"
            );
            Some(info)
        }
        None => None,
    };

    let presigned = store
        .presign_get(&request.location, request.expires_in())
        .await?;

    Ok(ShareOutcome {
        url: presigned.url,
        expires_at: presigned.expires_at,
        uploaded,
    })
}
