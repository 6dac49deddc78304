//! Binary tests for s3url that need no server
//!
//! Every test isolates the process from the user's AWS files and s3url
//! config. Presigning is a local computation, so static credentials in the
//! environment are enough to exercise the full flow.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Build a command with an isolated environment rooted at `home`
fn s3url(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_s3url"));
    cmd.env("S3URL_CONFIG_DIR", home.join("s3url"))
        .env("AWS_CONFIG_FILE", home.join("aws-config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", home.join("aws-credentials"))
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("AWS_PROFILE")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env_remove("AWS_REGION")
        .env_remove("AWS_DEFAULT_REGION")
        .env_remove("AWS_ENDPOINT_URL")
        .env_remove("AWS_ENDPOINT_URL_S3")
        .env_remove("S3URL_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Same as [`s3url`] with static credentials and a region
fn s3url_with_credentials(home: &Path) -> Command {
    let mut cmd = s3url(home);
    cmd.env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .env("AWS_REGION", "us-east-1");
    cmd
}

fn run(mut cmd: Command, args: &[&str]) -> Output {
    cmd.args(args).output().expect("Failed to execute s3url")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod validation {
    use super::*;

    #[test]
    fn test_no_arguments_requires_bucket() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &[]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Bucket name is required."));
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn test_bucket_without_key() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["-b", "mybucket"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Object key is required."));
    }

    #[test]
    fn test_key_without_bucket() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["--key", "file.txt"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Bucket name is required."));
    }

    #[test]
    fn test_url_without_key() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["s3://mybucket/"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Object key is required."));
    }

    #[test]
    fn test_https_url_without_key_segment() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["https://s3.amazonaws.com/mybucket"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Invalid URL"));
    }

    #[test]
    fn test_malformed_url() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["https://exa mple.com/mybucket/key"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Invalid URL"));
        assert!(stderr(&output).contains("s3url --help"));
    }

    #[test]
    fn test_duration_out_of_range() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["s3://mybucket/key", "-d", "0"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Invalid duration"));
    }

    #[test]
    fn test_json_error_output() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["--json", "-b", "mybucket"]);

        assert_eq!(output.status.code(), Some(1));
        let value: serde_json::Value = serde_json::from_str(&stderr(&output)).unwrap();
        assert_eq!(value["error"], "Object key is required.");
    }

    #[test]
    fn test_extra_positional_is_usage_error() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["s3://b/one", "s3://b/two"]);

        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_missing_arguments_reported_before_config_errors() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join("s3url");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "defaults = [").unwrap();

        let output = run(s3url(home.path()), &[]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Bucket name is required."));

        let output = run(s3url(home.path()), &["-b", "mybucket"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Object key is required."));

        let output = run(s3url(home.path()), &["-b", "mybucket", "-k", "file.txt"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("TOML parse error"));
    }

    #[test]
    fn test_config_from_newer_version_rejected() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join("s3url");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "schema_version = 99\n").unwrap();

        let output = run(s3url(home.path()), &["s3://mybucket/key"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("newer than supported"));
    }
}

mod presign {
    use super::*;

    #[test]
    fn test_presign_s3_url_default_duration() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &["s3://mybucket/a/b/c.txt"],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let url = stdout(&output);
        assert!(url.starts_with("https://mybucket.s3."));
        assert!(url.contains("/a/b/c.txt?"));
        assert!(url.contains("X-Amz-Expires=300"));
        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("AKIDEXAMPLE"));
        assert_eq!(url.lines().count(), 1);
    }

    #[test]
    fn test_presign_explicit_duration() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &["-b", "mybucket", "-k", "file.txt", "-d", "60"],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("X-Amz-Expires=3600"));
    }

    #[test]
    fn test_presign_path_style_url() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &[
                "https://s3-ap-northeast-1.amazonaws.com/mybucket/file.txt",
                "--path-style",
                "--region",
                "ap-northeast-1",
            ],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let url = stdout(&output);
        assert!(url.starts_with("https://s3.ap-northeast-1.amazonaws.com/"));
        assert!(url.contains("/mybucket/file.txt?"));
    }

    #[test]
    fn test_presign_custom_endpoint() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &[
                "s3://data/report.csv",
                "--endpoint-url",
                "http://localhost:9000",
                "--path-style",
            ],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).starts_with("http://localhost:9000/data/report.csv?"));
    }

    #[test]
    fn test_config_defaults_apply() {
        let home = TempDir::new().unwrap();
        let config_dir = home.path().join("s3url");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "schema_version = 1\n\n[defaults]\nduration_minutes = 15\n",
        )
        .unwrap();

        let output = run(s3url_with_credentials(home.path()), &["s3://mybucket/key"]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert!(stdout(&output).contains("X-Amz-Expires=900"));

        let output = run(
            s3url_with_credentials(home.path()),
            &["s3://mybucket/key", "-d", "2"],
        );
        assert!(stdout(&output).contains("X-Amz-Expires=120"));
    }

    #[test]
    fn test_presign_json_output() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &["s3://mybucket/file.txt", "--json", "-d", "10"],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(value["bucket"], "mybucket");
        assert_eq!(value["key"], "file.txt");
        assert_eq!(value["expires_in_minutes"], 10);
        assert!(value["url"].as_str().unwrap().contains("X-Amz-Expires=600"));
        assert!(value.get("uploaded").is_none());
    }

    #[test]
    fn test_presign_keeps_dot_segments_in_key() {
        let home = TempDir::new().unwrap();
        let output = run(
            s3url_with_credentials(home.path()),
            &["s3://mybucket/a/../b.txt", "--json"],
        );

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(value["bucket"], "mybucket");
        assert_eq!(value["key"], "a/../b.txt");
    }

    #[test]
    fn test_missing_region() {
        let home = TempDir::new().unwrap();
        let mut cmd = s3url_with_credentials(home.path());
        cmd.env_remove("AWS_REGION");
        let output = run(cmd, &["s3://mybucket/file.txt"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("No region configured"));
    }

    #[test]
    fn test_upload_missing_file_fails_before_signing() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("missing.bin");
        let output = run(
            s3url_with_credentials(home.path()),
            &[
                "s3://mybucket/missing.bin",
                "--upload",
                missing.to_str().unwrap(),
                "--endpoint-url",
                "http://127.0.0.1:9",
            ],
        );

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Cannot read"));
        assert!(stdout(&output).is_empty());
    }
}

mod completions {
    use super::*;

    #[test]
    fn test_bash_completions() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["--completions", "bash"]);

        assert!(output.status.success());
        assert!(stdout(&output).contains("s3url"));
    }

    #[test]
    fn test_help_lists_examples() {
        let home = TempDir::new().unwrap();
        let output = run(s3url(home.path()), &["--help"]);

        assert!(output.status.success());
        let help = stdout(&output);
        assert!(help.contains("--upload"));
        assert!(help.contains("s3url -b BUCKET -k KEY"));
    }
}
