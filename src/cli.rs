// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same analysis options:
//   md-lens file README.md --json
//   md-lens github https://github.com/user/repo --file README.md
// Options given here override the config file.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use md_lens::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "md-lens",
    version,
    about = "Analyze markdown files: words, headings, links, images and broken links",
    long_about = "md-lens counts words and headings in markdown files, extracts links and images, \
                  and checks every absolute link for reachability. It exits with 1 when broken \
                  links are found, which makes it usable as a CI check."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a local markdown file
    ///
    /// Example: md-lens file docs/guide.md
    File {
        /// Path to a .md or .markdown file
        path: PathBuf,

        #[command(flatten)]
        options: AnalysisOptions,
    },

    /// Analyze the markdown files in the root of a GitHub repository
    ///
    /// Example: md-lens github https://github.com/rust-lang/rust --file README.md
    Github {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Only analyze this file (default: every markdown file in the root)
        #[arg(long, value_name = "NAME")]
        file: Option<String>,

        #[command(flatten)]
        options: AnalysisOptions,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Output the summary as JSON instead of a report
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ./config.json when it exists)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Per-link timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Number of links checked at the same time (1 = one after another)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Also check image URLs
    #[arg(long)]
    pub validate_images: bool,

    /// Stop checking links after this many seconds and report what finished
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<f64>,

    /// Show diagnostic logs on stderr (same as RUST_LOG=md_lens=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl AnalysisOptions {
    /// Applies command-line overrides on top of a loaded config.
    ///
    /// The result still has to be validated by the caller.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.validate_images {
            config.validate_images = true;
        }
        config
    }
}

impl Commands {
    pub fn options(&self) -> &AnalysisOptions {
        match self {
            Commands::File { options, .. } | Commands::Github { options, .. } => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_command() {
        let cli = Cli::parse_from(["md-lens", "file", "README.md", "--json", "--timeout", "2.5"]);
        match cli.command {
            Commands::File { path, options } => {
                assert_eq!(path, PathBuf::from("README.md"));
                assert!(options.json);
                assert_eq!(options.timeout, Some(2.5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_github_command() {
        let cli = Cli::parse_from([
            "md-lens",
            "github",
            "https://github.com/user/repo",
            "--file",
            "README.md",
            "--concurrency",
            "1",
        ]);
        let options = cli.command.options().clone();
        assert_eq!(options.concurrency, Some(1));
        assert!(matches!(cli.command, Commands::Github { file: Some(_), .. }));
    }

    #[test]
    fn test_overrides_win_over_config() {
        let options = AnalysisOptions {
            timeout: Some(1.0),
            validate_images: true,
            ..AnalysisOptions::default()
        };
        let config = options.apply(Config::default());
        assert_eq!(config.timeout, 1.0);
        assert!(config.validate_images);
        assert_eq!(config.concurrency, Config::default().concurrency);
    }

    #[test]
    fn test_negative_override_is_caught_by_validation() {
        let options = AnalysisOptions {
            timeout: Some(-3.0),
            ..AnalysisOptions::default()
        };
        assert!(options.apply(Config::default()).validate().is_err());
    }
}
