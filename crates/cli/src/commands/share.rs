//! Presign (and optionally upload) one object
//!
//! Resolves the request, builds the S3 client, uploads if asked, and prints
//! the signed URL.

use s3url_core::{ConfigManager, Defaults, ObjectStore, RequestInput, ShareOutcome, ShareRequest};
use s3url_s3::S3Client;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

#[derive(Debug, Serialize)]
pub struct ShareOutput {
    url: String,
    bucket: String,
    key: String,
    expires_in_minutes: u64,
    expires_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uploaded: Option<UploadOutput>,
}

#[derive(Debug, Serialize)]
struct UploadOutput {
    path: String,
    size_bytes: u64,
    size_human: String,
    content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

impl ShareOutput {
    pub fn new(request: &ShareRequest, outcome: &ShareOutcome) -> Self {
        Self {
            url: outcome.url.clone(),
            bucket: request.location.bucket.clone(),
            key: request.location.key.clone(),
            expires_in_minutes: request.duration_minutes,
            expires_at: outcome.expires_at.to_string(),
            uploaded: outcome.uploaded.as_ref().map(|info| UploadOutput {
                path: info.path.display().to_string(),
                size_bytes: info.size_bytes,
                size_human: humansize::format_size(info.size_bytes, humansize::BINARY),
                content_type: info.content_type.clone(),
                etag: info.etag.clone(),
            }),
        }
    }
}

/// Execute the share flow
pub async fn execute(input: RequestInput, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let request = match s3url_core::resolve(input, load_defaults) {
        Ok(request) => request,
        Err(e) => {
            formatter.error(&e.to_string());
            if e.is_usage() {
                formatter.hint("Run 's3url --help' for usage.");
            }
            return ExitCode::GeneralError;
        }
    };

    let client = match S3Client::new(&request.client).await {
        Ok(client) => client,
        Err(e) => {
            formatter.error(&format!("Failed to create S3 client: {e}"));
            return ExitCode::GeneralError;
        }
    };

    run(&client, &request, &output_config, &formatter).await
}

fn load_defaults() -> s3url_core::Result<Defaults> {
    let config = ConfigManager::new()?.load()?;
    Ok(config.defaults)
}

/// Upload (if asked), sign, and print the result
async fn run(
    store: &dyn ObjectStore,
    request: &ShareRequest,
    output_config: &OutputConfig,
    formatter: &Formatter,
) -> ExitCode {
    let spinner = request
        .upload
        .as_ref()
        .map(|path| Spinner::start(output_config, &format!("Uploading {}", path.display())));

    let result = s3url_core::share(store, request).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };

    if let Some(notice) = upload_notice(&outcome) {
        formatter.diagnostic(&notice);
    }

    if formatter.is_json() {
        formatter.json(&ShareOutput::new(request, &outcome));
    } else {
        formatter.url(&outcome.url);
    }

    ExitCode::Success
}

/// The stderr line announcing a finished upload
fn upload_notice(outcome: &ShareOutcome) -> Option<String> {
    outcome
        .uploaded
        .as_ref()
        .map(|info| format!("uploaded: {}", info.path.display()))
}
