//! s3url - presigned download URLs for S3 objects
//!
//! Prints a time-limited GET URL for an object, optionally uploading a
//! local file to it first.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use s3url::commands::{self, Cli};
use s3url::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    // Logs go to stderr; stdout carries only the URL
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
