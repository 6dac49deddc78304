//! s3url-core: Core library for the s3url presigned URL generator
//!
//! This crate provides everything that does not depend on the AWS SDK:
//! - Storage URL decomposition
//! - Request resolution and validation
//! - Configuration defaults
//! - The ObjectStore trait and the upload-then-presign flow

pub mod config;
pub mod error;
pub mod location;
pub mod request;
pub mod share;
pub mod traits;

pub use config::{Config, ConfigManager, Defaults};
pub use error::{Error, Result};
pub use location::{parse_url, ObjectLocation};
pub use request::{resolve, ClientOptions, RequestInput, ShareRequest};
pub use share::{share, ShareOutcome};
pub use traits::{ObjectStore, PresignedUrl, UploadInfo};
