//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3url-core.

use std::path::Path;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use jiff::Timestamp;

use s3url_core::{
    ClientOptions, Error, ObjectLocation, ObjectStore, PresignedUrl, Result, UploadInfo,
};

/// Error codes that mean the caller is not allowed in
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

/// Error codes that mean the bucket or object is missing
const NOT_FOUND_ERROR_CODES: &[&str] = &["NoSuchBucket", "NoSuchKey", "NotFound"];

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client
    ///
    /// Credentials come from the named profile when one is set, otherwise
    /// from the SDK default provider chain.
    pub async fn new(options: &ClientOptions) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &options.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let Some(region) = config.region() else {
            return Err(Error::Config(
                "No region configured. Use --region, set AWS_REGION, or add one to your profile"
                    .into(),
            ));
        };

        tracing::debug!(
            profile = options.profile.as_deref().unwrap_or("default"),
            region = %region,
            endpoint = options.endpoint_url.as_deref().unwrap_or("aws"),
            path_style = options.force_path_style,
            "created S3 client"
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object_from_path(
        &self,
        location: &ObjectLocation,
        path: &Path,
    ) -> Result<UploadInfo> {
        let local_error = |message: String| Error::LocalFile {
            path: path.to_path_buf(),
            message,
        };

        let metadata = std::fs::metadata(path).map_err(|e| local_error(e.to_string()))?;
        if !metadata.is_file() {
            return Err(local_error("not a regular file".into()));
        }

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        // The file handle lives inside the body and is dropped with the request.
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| local_error(e.to_string()))?;

        tracing::debug!(
            bucket = %location.bucket,
            key = %location.key,
            size_bytes = metadata.len(),
            content_type = %content_type,
            "PutObject"
        );

        let response = self
            .inner
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .content_type(&content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| map_sdk_error(&e, location))?;

        Ok(UploadInfo {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
            content_type,
            etag: response.e_tag().map(|etag| etag.trim_matches('"').to_string()),
        })
    }

    async fn presign_get(
        &self,
        location: &ObjectLocation,
        expires: Duration,
    ) -> Result<PresignedUrl> {
        let start = SystemTime::now();
        let presigning = PresigningConfig::builder()
            .start_time(start)
            .expires_in(expires)
            .build()
            .map_err(|e| Error::InvalidDuration(e.to_string()))?;

        tracing::debug!(
            bucket = %location.bucket,
            key = %location.key,
            expires_secs = expires.as_secs(),
            "presigning GetObject"
        );

        let request = self
            .inner
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .presigned(presigning)
            .await
            .map_err(|e| map_sdk_error(&e, location))?;

        let expires_at =
            Timestamp::try_from(start + expires).map_err(|e| Error::General(e.to_string()))?;

        Ok(PresignedUrl {
            url: request.uri().to_string(),
            expires_at,
        })
    }
}

/// Classify an SDK error by its service error code, keeping the full message
fn map_sdk_error<E>(err: &E, location: &ObjectLocation) -> Error
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = DisplayErrorContext(err).to_string();
    match err.code() {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => Error::Auth(message),
        Some(code) if NOT_FOUND_ERROR_CODES.contains(&code) => {
            Error::NotFound(format!("{location}: {message}"))
        }
        _ => Error::Network(message),
    }
}
