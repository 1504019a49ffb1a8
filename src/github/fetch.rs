// src/github/fetch.rs
// =============================================================================
// This module fetches markdown files from a GitHub repository.
//
// Strategy:
// - Parse the GitHub URL to extract owner and repo name
// - List the repository root with the contents API
//   (GET https://api.github.com/repos/{owner}/{repo}/contents)
// - Keep .md / .markdown files and download each through its download_url
//
// The contents API is rate limited for anonymous callers; `github_token`
// from the config is sent as `Authorization: token ...` when set.
// =============================================================================

use crate::config::Config;
use crate::document::{is_markdown_file, Document};
use anyhow::{anyhow, bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const API_BASE: &str = "https://api.github.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// One entry of the contents API listing (only the fields we use)
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// A markdown file found in the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    pub name: String,
    pub download_url: String,
}

/// Lists and downloads the markdown files in a repository root.
///
/// `only` restricts the download to one file name (case-insensitive).
/// Files that fail to download are logged and skipped; an empty result is
/// not an error.
pub async fn fetch_repo_documents(
    repo_url: &str,
    config: &Config,
    only: Option<&str>,
) -> Result<Vec<Document>> {
    let (owner, repo) = parse_github_url(repo_url)?;
    let client = build_client(config)?;

    let mut files = list_markdown_files(&client, &owner, &repo).await?;
    info!(owner = %owner, repo = %repo, count = files.len(), "found markdown files");

    if let Some(wanted) = only {
        files.retain(|f| f.name.eq_ignore_ascii_case(wanted));
        if files.is_empty() {
            bail!("{} not found in the root of {}/{}", wanted, owner, repo);
        }
    }

    let mut documents = Vec::new();
    for file in &files {
        match download_file(&client, file).await {
            Ok(doc) => documents.push(doc),
            Err(e) => warn!(file = %file.name, error = %e, "skipping file"),
        }
    }

    Ok(documents)
}

// Parses a GitHub URL to extract owner and repository name
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/main/docs  (extra segments ignored)
//   - github.com/owner/repo
fn parse_github_url(repo_url: &str) -> Result<(String, String)> {
    let trimmed = repo_url.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| anyhow!("Invalid URL '{}': {}", repo_url, e))?;

    match url.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => bail!("Not a GitHub URL: {}", repo_url),
    }

    let mut segments = url
        .path_segments()
        .map(|s| s.filter(|part| !part.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let (Some(owner), Some(repo)) = (segments.next(), segments.next()) else {
        bail!("Invalid GitHub URL format (expected github.com/owner/repo): {}", repo_url);
    };

    let repo = repo.trim_end_matches(".git");
    Ok((owner.to_string(), repo.to_string()))
}

fn build_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    if let Some(token) = &config.github_token {
        let value = HeaderValue::from_str(&format!("token {}", token))
            .context("github_token contains characters not allowed in a header")?;
        headers.insert(AUTHORIZATION, value);
    }

    let client = Client::builder()
        // GitHub rejects requests without a User-Agent
        .user_agent(concat!("md-lens/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(FETCH_TIMEOUT)
        .build()?;

    Ok(client)
}

async fn list_markdown_files(client: &Client, owner: &str, repo: &str) -> Result<Vec<RepoFile>> {
    let api_url = format!("{}/repos/{}/{}/contents", API_BASE, owner, repo);

    let response = client
        .get(&api_url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", api_url))?;

    if !response.status().is_success() {
        bail!("Failed to fetch repository {}/{}: HTTP {}", owner, repo, response.status());
    }

    let entries: Vec<ContentEntry> = response
        .json()
        .await
        .context("Unexpected response from the GitHub contents API")?;

    Ok(markdown_entries(entries))
}

// Keeps regular markdown files that can be downloaded
fn markdown_entries(entries: Vec<ContentEntry>) -> Vec<RepoFile> {
    entries
        .into_iter()
        .filter(|entry| entry.kind == "file" && is_markdown_file(&entry.name))
        .filter_map(|entry| {
            Some(RepoFile {
                download_url: entry.download_url?,
                name: entry.name,
            })
        })
        .collect()
}

async fn download_file(client: &Client, file: &RepoFile) -> Result<Document> {
    let response = client.get(&file.download_url).send().await?;

    if !response.status().is_success() {
        bail!("Failed to download {}: HTTP {}", file.name, response.status());
    }

    let bytes = response.bytes().await?;
    Ok(Document::from_bytes(file.name.clone(), &bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_github_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_github_url("https://github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_github_url_without_scheme() {
        let (owner, repo) = parse_github_url("github.com/user/repo/tree/main/docs").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("user", "repo"));
    }

    #[test]
    fn test_parse_invalid_url() {
        assert!(parse_github_url("https://gitlab.com/user/repo").is_err());
        assert!(parse_github_url("https://github.com/just-owner").is_err());
    }

    #[test]
    fn test_markdown_entries_filter() {
        let listing = r#"[
            {"name": "README.md", "type": "file", "download_url": "https://raw.example/README.md"},
            {"name": "CHANGES.markdown", "type": "file", "download_url": "https://raw.example/CHANGES.markdown"},
            {"name": "Cargo.toml", "type": "file", "download_url": "https://raw.example/Cargo.toml"},
            {"name": "docs.md", "type": "dir", "download_url": null},
            {"name": "LINK.md", "type": "file", "download_url": null}
        ]"#;
        let entries: Vec<ContentEntry> = serde_json::from_str(listing).unwrap();

        let files = markdown_entries(entries);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["README.md", "CHANGES.markdown"]);
    }
}
