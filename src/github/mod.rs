// src/github/mod.rs
// =============================================================================
// This module handles fetching markdown files from GitHub repositories.
//
// Currently implements:
// - Parsing GitHub URLs to extract owner/repo
// - Listing the repository root through the contents API
// - Downloading every markdown file found there (or one chosen by name)
// =============================================================================

mod fetch;

pub use fetch::{fetch_repo_documents, RepoFile};
