//! CLI definition and dispatch
//!
//! s3url has a single flat command line; `--completions` is the only
//! alternative mode.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use s3url_core::RequestInput;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

mod completions;
pub mod share;

const EXAMPLES: &str = "\
Examples:
  s3url s3://BUCKET/KEY [-d DURATION]
  s3url https://s3-REGION.amazonaws.com/BUCKET/KEY [-d DURATION]
  s3url -b BUCKET -k KEY [-d DURATION] [--profile NAME] [--upload PATH]";

/// s3url - presigned download URLs for S3 objects
///
/// Prints a time-limited GET URL for an object. With --upload, the local
/// file is uploaded to the object first.
#[derive(Parser, Debug)]
#[command(name = "s3url")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Object URL (s3://BUCKET/KEY or https://ENDPOINT/BUCKET/KEY); overrides --bucket/--key
    pub url: Option<String>,

    /// Bucket name
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Object key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Valid duration in minutes [default: 5]
    #[arg(short, long, value_name = "MINUTES")]
    pub duration: Option<u64>,

    /// AWS profile name
    #[arg(long, env = "S3URL_PROFILE")]
    pub profile: Option<String>,

    /// File to upload before signing
    #[arg(long, value_name = "PATH")]
    pub upload: Option<PathBuf>,

    /// Region override
    #[arg(long)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style addressing
    #[arg(long, default_value = "false")]
    pub path_style: bool,

    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Disable the upload spinner
    #[arg(long, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error diagnostics
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Raw request input, before config defaults and validation
    pub fn request_input(&self) -> RequestInput {
        RequestInput {
            url: self.url.clone(),
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            duration_minutes: self.duration,
            profile: self.profile.clone(),
            upload: self.upload.clone(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.path_style,
        }
    }

    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color || !std::io::stderr().is_terminal(),
            no_progress: self.no_progress,
            quiet: self.quiet,
        }
    }
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    if let Some(shell) = cli.completions {
        return completions::execute(shell);
    }

    let output_config = cli.output_config();
    share::execute(cli.request_input(), output_config).await
}
