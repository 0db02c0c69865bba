//! CLI argument parsing

use crate::auth::DEFAULT_TOKEN_FILE;
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

/// API Load Pro - Universal REST API data creator
#[derive(Parser, Debug)]
#[command(name = "api-load-pro")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  api-load-pro --data-file sample_data.json\n  api-load-pro -d test_data.json --verbose")]
pub struct Cli {
    /// JSON file containing the test data and API requests
    #[arg(short, long)]
    pub data_file: PathBuf,

    /// Enable verbose output for detailed request information
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (INI)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Do not save the test data and API requests
    #[arg(long)]
    pub no_save: bool,

    /// Directory to save the test data and API requests
    #[arg(long, default_value = "results")]
    pub result_dir: PathBuf,

    /// File the last auth response is written to
    #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    /// Reuse a still-valid token from the token file instead of authenticating
    #[arg(long)]
    pub reuse_token: bool,
}

impl Cli {
    /// Default tracing filter; `--verbose` only raises this crate to debug
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info,api_load_pro=debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["api-load-pro", "--data-file", "data.json"]).unwrap();
        assert_eq!(cli.data_file, PathBuf::from("data.json"));
        assert!(!cli.verbose);
        assert_eq!(cli.config, PathBuf::from("config.ini"));
        assert!(!cli.no_save);
        assert_eq!(cli.result_dir, PathBuf::from("results"));
        assert_eq!(cli.token_file, PathBuf::from("access_token.json"));
        assert!(!cli.reuse_token);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["api-load-pro", "-d", "test_data.json", "-v"]).unwrap();
        assert_eq!(cli.data_file, PathBuf::from("test_data.json"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_log_filter() {
        let quiet = Cli::try_parse_from(["api-load-pro", "-d", "data.json"]).unwrap();
        assert_eq!(quiet.log_filter(), "info");

        let verbose = Cli::try_parse_from(["api-load-pro", "-d", "data.json", "-v"]).unwrap();
        assert_eq!(verbose.log_filter(), "info,api_load_pro=debug");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "api-load-pro",
            "-d",
            "data.json",
            "--config",
            "prod.ini",
            "--no-save",
            "--result-dir",
            "out",
            "--token-file",
            "/tmp/token.json",
            "--reuse-token",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("prod.ini"));
        assert!(cli.no_save);
        assert_eq!(cli.result_dir, PathBuf::from("out"));
        assert_eq!(cli.token_file, PathBuf::from("/tmp/token.json"));
        assert!(cli.reuse_token);
    }

    #[test]
    fn test_data_file_required() {
        assert!(Cli::try_parse_from(["api-load-pro"]).is_err());
    }
}
