//! Storage URL decomposition
//!
//! Accepts the two URL shapes operators paste around:
//! - `s3://bucket/key`
//! - `https://<endpoint>/bucket/key` (path-style)

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

/// URL scheme that addresses objects natively
pub const NATIVE_SCHEME: &str = "s3";

/// Bucket and key of a single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// Bucket name
    pub bucket: String,
    /// Object key, slashes included
    pub key: String,
}

impl ObjectLocation {
    /// Create a new ObjectLocation
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Render as `s3://bucket/key`
    pub fn to_s3_url(&self) -> String {
        format!("{NATIVE_SCHEME}://{}/{}", self.bucket, self.key)
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_s3_url())
    }
}

/// Parse a storage URL into bucket and key
///
/// For `s3://` URLs the host is the bucket and the rest of the path is the key.
/// For any other scheme the path must look like `/bucket/key...`.
/// Bucket and key may come back empty; callers decide whether that is fatal.
///
/// The key is taken verbatim from the input: dot segments and backslashes
/// are legal in object keys and are not normalised away.
pub fn parse_url(input: &str) -> Result<ObjectLocation> {
    let url = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{input} ({e})")))?;
    let path = decode_path(input, raw_path(input))?;

    if url.scheme() == NATIVE_SCHEME {
        let bucket = url.host_str().unwrap_or_default();
        let key = path.strip_prefix('/').unwrap_or(&*path);
        return Ok(ObjectLocation::new(bucket, key));
    }

    match path.strip_prefix('/').and_then(|rest| rest.split_once('/')) {
        Some((bucket, key)) => Ok(ObjectLocation::new(bucket, key)),
        None => Err(Error::InvalidUrl(format!(
            "{input} (expected a path of the form /BUCKET/KEY)"
        ))),
    }
}

/// Path component of `input` as written, before any normalisation
///
/// Skips `scheme:` and the `//authority` part, and stops at the query or fragment.
fn raw_path(input: &str) -> &str {
    let input = input.trim_matches(|c: char| c <= ' ');
    let rest = input.split_once(':').map_or(input, |(_, rest)| rest);
    let rest = match rest.strip_prefix("//") {
        Some(authority) => authority
            .find(['/', '?', '#'])
            .map_or("", |start| &authority[start..]),
        None => rest,
    };
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

fn decode_path<'a>(input: &str, path: &'a str) -> Result<Cow<'a, str>> {
    percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| Error::InvalidUrl(format!("{input} (path is not valid UTF-8)")))
}
