//! Request resolution
//!
//! Turns raw command-line input plus configuration defaults into a
//! validated [`ShareRequest`].

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Defaults;
use crate::error::{Error, Result};
use crate::location::{parse_url, ObjectLocation};

/// Longest lifetime SigV4 allows for a presigned URL (7 days)
pub const MAX_DURATION_MINUTES: u64 = 7 * 24 * 60;

/// Raw input as collected from the command line
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    /// Positional storage URL; overrides bucket and key when present
    pub url: Option<String>,
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub duration_minutes: Option<u64>,
    pub profile: Option<String>,
    pub upload: Option<PathBuf>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// Connection settings handed to the storage client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Named profile; `None` uses the SDK default chain
    pub profile: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// A validated request to presign (and optionally upload) one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub location: ObjectLocation,
    pub duration_minutes: u64,
    /// Absolute path of the file to upload before signing
    pub upload: Option<PathBuf>,
    pub client: ClientOptions,
}

impl ShareRequest {
    /// URL lifetime as a Duration
    pub fn expires_in(&self) -> Duration {
        Duration::from_secs(self.duration_minutes * 60)
    }
}

/// Resolve raw input against configuration defaults
///
/// Flags win over config defaults. A URL, when given, replaces any
/// `--bucket`/`--key` values. Bucket and key must both end up non-empty.
/// `load_defaults` runs only after bucket and key have been validated.
pub fn resolve<F>(input: RequestInput, load_defaults: F) -> Result<ShareRequest>
where
    F: FnOnce() -> Result<Defaults>,
{
    let (bucket, key) = match input.url.as_deref() {
        Some(url) => {
            let location = parse_url(url)?;
            (location.bucket, location.key)
        }
        None => (
            input.bucket.unwrap_or_default(),
            input.key.unwrap_or_default(),
        ),
    };

    if bucket.is_empty() {
        return Err(Error::MissingBucket);
    }
    if key.is_empty() {
        return Err(Error::MissingKey);
    }

    let defaults = load_defaults()?;

    let duration_minutes = input.duration_minutes.unwrap_or(defaults.duration_minutes);
    validate_duration(duration_minutes)?;

    let upload = input.upload.map(absolute_path).transpose()?;

    let request = ShareRequest {
        location: ObjectLocation::new(bucket, key),
        duration_minutes,
        upload,
        client: ClientOptions {
            profile: input.profile.or(defaults.profile),
            region: input.region.or(defaults.region),
            endpoint_url: input.endpoint_url.or(defaults.endpoint_url),
            force_path_style: input.force_path_style || defaults.force_path_style,
        },
    };

    tracing::debug!(
        location = %request.location,
        duration_minutes = request.duration_minutes,
        upload = ?request.upload,
        "resolved request"
    );

    Ok(request)
}

fn validate_duration(minutes: u64) -> Result<()> {
    if minutes == 0 || minutes > MAX_DURATION_MINUTES {
        return Err(Error::InvalidDuration(format!(
            "{minutes} minutes (must be between 1 and {MAX_DURATION_MINUTES})"
        )));
    }
    Ok(())
}

/// Make `path` absolute against the current directory without touching the file
fn absolute_path(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::LocalFile {
            path,
            message: "upload path cannot be empty".into(),
        });
    }
    Ok(std::path::absolute(&path)?)
}
